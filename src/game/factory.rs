//! Thief-Bot Factories
//!
//! Each factory rolls a 1-in-50 spawn chance per tick, gated by a local
//! census: fewer than 3 thief-bots in the surrounding 7x7 neighborhood
//! (clipped at the grid edge), and none standing on the factory itself.

use tracing::debug;

use crate::core::grid::{Direction, TilePos};
use crate::game::actor::ActorKind;
use crate::game::arena::Arena;
use crate::game::events::Sound;

/// Thief-bots in the 7x7 block centered on `center`, clipped to the grid.
fn census(arena: &Arena, center: TilePos) -> usize {
    let mut count = 0;
    for dx in -3..=3 {
        for dy in -3..=3 {
            let pos = TilePos::new(center.x + dx, center.y + dy);
            if pos.in_bounds() && arena.counted_by_factories_at(pos).is_some() {
                count += 1;
            }
        }
    }
    count
}

/// Factory tick: maybe produce a thief-bot on the factory's own tile.
pub(crate) fn act_factory(arena: &mut Arena, idx: usize) {
    let (pos, mean) = {
        let actor = &arena.actors[idx];
        match actor.kind {
            ActorKind::Factory { mean } => (actor.pos, mean),
            _ => return,
        }
    };

    // A bot parked on the factory suppresses production entirely, even
    // when the neighborhood count is otherwise low.
    if census(arena, pos) >= 3 || arena.counted_by_factories_at(pos).is_some() {
        return;
    }
    if !arena.rng.one_in(50) {
        return;
    }

    let level = arena.scoreboard.level;
    let kind = {
        let rng = &mut arena.rng;
        ActorKind::thief_bot(level, mean, rng)
    };
    debug!(x = pos.x, y = pos.y, mean, "factory produced thief-bot");
    arena.spawn(kind, pos, Direction::Right);
    arena.play_sound(Sound::RobotBorn);
}

// =============================================================================
// TESTS
// =============================================================================
