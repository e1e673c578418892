//! Avatar Behavior
//!
//! The avatar consumes at most one key press per tick: escape aborts the
//! level, fire spends ammo for a pea, and arrow keys first turn the
//! avatar, then push a marble if one is directly ahead, then step.

use tracing::debug;

use crate::game::arena::Arena;
use crate::game::events::Sound;
use crate::game::input::KeyPress;
use crate::game::terrain;

/// Act on this tick's key press, if any.
pub(crate) fn act(arena: &mut Arena, key: Option<KeyPress>) {
    let Some(key) = key else {
        return;
    };

    match key {
        KeyPress::Escape => {
            debug!("avatar aborted level");
            arena.avatar.alive = false;
            arena.play_sound(Sound::PlayerDie);
        }
        KeyPress::Fire => {
            if arena.avatar.ammo > 0 {
                arena.avatar.ammo -= 1;
                let (pos, facing) = (arena.avatar.pos, arena.avatar.facing);
                arena.fire_pea(pos, facing);
                arena.play_sound(Sound::PlayerFire);
            }
        }
        KeyPress::Up | KeyPress::Down | KeyPress::Left | KeyPress::Right => {
            // Turning always succeeds even when the step does not.
            let dir = key.direction().unwrap_or_default();
            arena.avatar.facing = dir;
            let ahead = arena.avatar.pos.step(dir);
            if let Some(idx) = arena.can_be_pushed_at(ahead) {
                terrain::push_marble(arena, idx);
            }
            arena.attempt_move_avatar(dir);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
