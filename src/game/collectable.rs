//! Collectables
//!
//! Crystals and goodies wait for the avatar to share their tile, then
//! pay out and disappear. A goodie currently held by a thief-bot is not
//! collectable and ignores the avatar entirely.

use crate::game::actor::{ActorKind, CollectableKind, INITIAL_AMMO, PLAYER_INITIAL_HEALTH};
use crate::game::arena::Arena;
use crate::game::events::Sound;

/// Collectable tick: resolve pickup if the avatar is here.
pub(crate) fn act_collectable(arena: &mut Arena, idx: usize) {
    let kind = match arena.actors[idx].kind {
        ActorKind::Collectable {
            kind,
            collectable: true,
        } => kind,
        _ => return,
    };
    if arena.avatar.pos != arena.actors[idx].pos {
        return;
    }

    arena.actors[idx].alive = false;
    arena.play_sound(Sound::GotGoodie);
    match kind {
        CollectableKind::Crystal => {
            arena.add_score(50);
            arena.avatar.crystals += 1;
        }
        CollectableKind::ExtraLife => {
            arena.add_score(1000);
            arena.scoreboard.lives += 1;
        }
        CollectableKind::RestoreHealth => {
            arena.add_score(500);
            arena.avatar.health = PLAYER_INITIAL_HEALTH;
        }
        CollectableKind::Ammo => {
            arena.add_score(100);
            arena.avatar.ammo += INITIAL_AMMO;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
