//! Terrain Behavior
//!
//! Marble pushing, pits, and the exit. These pieces are passive most of
//! the time but carry the level's win condition: collecting every
//! crystal reveals the exit, and stepping on the revealed exit finishes
//! the level.

use crate::game::actor::ActorKind;
use crate::game::arena::Arena;
use crate::game::events::Sound;

/// Push the marble at `idx` one tile away from the avatar.
///
/// The marble moves only into an empty tile or onto an actor that
/// explicitly lets marbles enter (a pit). Anything else, avatar-pushable
/// or not, stops it.
pub(crate) fn push_marble(arena: &mut Arena, idx: usize) {
    let dir = arena.avatar.facing;
    let beyond = arena.actors[idx].pos.step(dir);
    if !beyond.in_bounds() {
        return;
    }
    let open = arena.allows_marble_movement_at(beyond).is_some()
        || arena.any_actor_at(beyond).is_none();
    if open && beyond != arena.avatar.pos {
        arena.actors[idx].pos = beyond;
    }
}

/// Pit tick: swallow a marble sharing the tile, destroying both.
pub(crate) fn act_pit(arena: &mut Arena, idx: usize) {
    let pos = arena.actors[idx].pos;
    if let Some(marble_idx) = arena.can_be_swallowed_at(pos) {
        if marble_idx != idx {
            arena.actors[marble_idx].alive = false;
            arena.actors[idx].alive = false;
        }
    }
}

/// Exit tick: reveal once all crystals are held, then finish the level
/// when the avatar stands on it.
pub(crate) fn act_exit(arena: &mut Arena, idx: usize) {
    let revealed = match arena.actors[idx].kind {
        ActorKind::Exit { revealed } => revealed,
        _ => return,
    };

    if !revealed && arena.has_collected_all_crystals() {
        if let ActorKind::Exit { revealed } = &mut arena.actors[idx].kind {
            *revealed = true;
        }
        arena.actors[idx].visible = true;
        arena.play_sound(Sound::RevealExit);
    }

    let now_revealed = matches!(arena.actors[idx].kind, ActorKind::Exit { revealed: true });
    if now_revealed && arena.avatar.pos == arena.actors[idx].pos {
        arena.play_sound(Sound::FinishedLevel);
        arena.set_completed_level();
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::{Direction, TilePos};
    use crate::game::arena::testutil::arena_from;

    #[test]
    fn test_push_marble_onto_pit() {
        let mut arena = arena_from(&["@mo  "], 1);
        arena.avatar.facing = Direction::Right;
        let idx = arena.can_be_pushed_at(TilePos::new(1, 14)).unwrap();
        push_marble(&mut arena, idx);
        assert_eq!(arena.actors()[idx].pos, TilePos::new(2, 14));
    }

    #[test]
    fn test_push_marble_blocked_by_marble() {
        let mut arena = arena_from(&["@mm  "], 1);
        arena.avatar.facing = Direction::Right;
        let idx = arena.can_be_pushed_at(TilePos::new(1, 14)).unwrap();
        push_marble(&mut arena, idx);
        assert_eq!(arena.actors()[idx].pos, TilePos::new(1, 14));
    }

    #[test]
    fn test_pit_swallows_marble_on_its_tile() {
        let mut arena = arena_from(&["@mo  "], 1);
        arena.avatar.facing = Direction::Right;
        let marble = arena.can_be_pushed_at(TilePos::new(1, 14)).unwrap();
        push_marble(&mut arena, marble);

        let pit = arena
            .actors()
            .iter()
            .position(|a| a.kind.allows_marble_movement())
            .unwrap();
        act_pit(&mut arena, pit);
        assert!(!arena.actors()[marble].alive);
        assert!(!arena.actors()[pit].alive);
    }

    #[test]
    fn test_empty_pit_stays() {
        let mut arena = arena_from(&["@ o  "], 1);
        let pit = arena.any_actor_at(TilePos::new(2, 14)).unwrap();
        act_pit(&mut arena, pit);
        assert!(arena.actors()[pit].alive);
    }

    #[test]
    fn test_exit_reveals_once_crystals_collected() {
        let mut arena = arena_from(&["@ x c"], 1);
        let exit = arena.any_actor_at(TilePos::new(2, 14)).unwrap();

        // Crystal outstanding: exit stays hidden.
        act_exit(&mut arena, exit);
        assert!(!arena.actors()[exit].visible);
        assert!(arena.take_sounds().is_empty());

        arena.avatar.crystals = 1;
        act_exit(&mut arena, exit);
        assert!(arena.actors()[exit].visible);
        assert_eq!(arena.take_sounds(), vec![Sound::RevealExit]);

        // The reveal sound plays exactly once.
        act_exit(&mut arena, exit);
        assert!(arena.take_sounds().is_empty());
    }

    #[test]
    fn test_exit_finishes_level_when_avatar_arrives() {
        let mut arena = arena_from(&["@ x  "], 1);
        let exit = arena.any_actor_at(TilePos::new(2, 14)).unwrap();
        // No crystals in this maze, so the first tick reveals the exit.
        act_exit(&mut arena, exit);
        assert!(!arena.take_completed_level());
        let _ = arena.take_sounds();

        arena.avatar.pos = TilePos::new(2, 14);
        act_exit(&mut arena, exit);
        assert!(arena.take_completed_level());
        assert_eq!(arena.take_sounds(), vec![Sound::FinishedLevel]);
    }
}
