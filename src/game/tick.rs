//! Tick Loop
//!
//! One call to [`tick`] advances the level by one frame:
//!
//! 1. The avatar acts on this tick's key press.
//! 2. Every actor that existed at the start of the pass acts, in spawn
//!    order. Actors spawned mid-pass wait until the next tick.
//! 3. After the avatar and after EVERY actor, the pass short-circuits
//!    if the avatar died or the level completed.
//! 4. On the normal path, dead actors are purged and the bonus drains.

use tracing::trace;

use crate::game::actor::ActorKind;
use crate::game::arena::Arena;
use crate::game::events::Sound;
use crate::game::input::KeyPress;
use crate::game::{avatar, collectable, factory, pea, robot, terrain};

/// How a tick left the level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The level goes on.
    Continue,
    /// The avatar died; a life was already deducted.
    PlayerDied,
    /// The avatar reached the exit; the finish award was already paid.
    LevelFinished,
}

/// Everything the presentation layer needs from one tick.
#[derive(Clone, Debug)]
pub struct TickResult {
    /// How the tick ended.
    pub outcome: TickOutcome,
    /// Sounds queued during the tick, in emission order.
    pub sounds: Vec<Sound>,
    /// Status line reflecting the post-tick state.
    pub status: String,
}

/// Lightweight behavior tag, copied out before dispatch so the behavior
/// functions can borrow the arena mutably.
#[derive(Clone, Copy)]
enum Dispatch {
    RageBot,
    ThiefBot,
    Factory,
    Collectable,
    Pit,
    Exit,
    Pea,
    Inert,
}

fn dispatch_tag(kind: &ActorKind) -> Dispatch {
    match kind {
        ActorKind::RageBot { .. } => Dispatch::RageBot,
        ActorKind::ThiefBot { .. } => Dispatch::ThiefBot,
        ActorKind::Factory { .. } => Dispatch::Factory,
        ActorKind::Collectable { .. } => Dispatch::Collectable,
        ActorKind::Pit => Dispatch::Pit,
        ActorKind::Exit { .. } => Dispatch::Exit,
        ActorKind::Pea => Dispatch::Pea,
        ActorKind::Wall | ActorKind::Marble { .. } => Dispatch::Inert,
    }
}

fn finish(arena: &mut Arena, outcome: TickOutcome) -> TickResult {
    TickResult {
        outcome,
        sounds: arena.take_sounds(),
        status: arena.status_line(),
    }
}

/// True if the pass must stop right now.
///
/// Checked after the avatar and after every single actor: a mid-pass
/// death or finish means the rest of the field never acts this tick.
fn short_circuit(arena: &mut Arena) -> Option<TickOutcome> {
    if !arena.avatar.alive {
        arena.scoreboard.lives = arena.scoreboard.lives.saturating_sub(1);
        return Some(TickOutcome::PlayerDied);
    }
    if arena.take_completed_level() {
        let award = 2000 + arena.bonus();
        arena.add_score(award);
        return Some(TickOutcome::LevelFinished);
    }
    None
}

/// Advance the level by one tick.
pub fn tick(arena: &mut Arena, key: Option<KeyPress>) -> TickResult {
    arena.tick += 1;
    trace!(tick = arena.tick, "tick start");

    // Snapshot the bound before anyone acts: actors spawned during this
    // tick (avatar-fired peas, robot peas, new thief-bots) sit it out.
    let count = arena.actors.len();

    if arena.avatar.alive {
        avatar::act(arena, key);
    }
    if let Some(outcome) = short_circuit(arena) {
        return finish(arena, outcome);
    }

    for idx in 0..count {
        if !arena.actors[idx].alive {
            continue;
        }
        match dispatch_tag(&arena.actors[idx].kind) {
            Dispatch::RageBot => robot::act_rage_bot(arena, idx),
            Dispatch::ThiefBot => robot::act_thief_bot(arena, idx),
            Dispatch::Factory => factory::act_factory(arena, idx),
            Dispatch::Collectable => collectable::act_collectable(arena, idx),
            Dispatch::Pit => terrain::act_pit(arena, idx),
            Dispatch::Exit => terrain::act_exit(arena, idx),
            Dispatch::Pea => pea::act_pea(arena, idx),
            Dispatch::Inert => {}
        }
        if let Some(outcome) = short_circuit(arena) {
            return finish(arena, outcome);
        }
    }

    arena.purge_dead();
    arena.drain_bonus();
    finish(arena, TickOutcome::Continue)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::TilePos;
    use crate::game::arena::testutil::arena_from;

    #[test]
    fn test_continue_tick_drains_bonus() {
        let mut arena = arena_from(&["@    "], 1);
        let result = tick(&mut arena, None);
        assert_eq!(result.outcome, TickOutcome::Continue);
        assert_eq!(arena.bonus(), 999);
        assert_eq!(arena.tick_count(), 1);
    }

    #[test]
    fn test_bonus_stops_at_zero() {
        let mut arena = arena_from(&["@    "], 1);
        for _ in 0..1_500 {
            tick(&mut arena, None);
        }
        assert_eq!(arena.bonus(), 0);
    }

    #[test]
    fn test_escape_deducts_life() {
        let mut arena = arena_from(&["@    "], 1);
        let result = tick(&mut arena, Some(KeyPress::Escape));
        assert_eq!(result.outcome, TickOutcome::PlayerDied);
        assert_eq!(arena.scoreboard.lives, 2);
        assert!(result.sounds.contains(&Sound::PlayerDie));
    }

    #[test]
    fn test_level_finish_pays_base_plus_bonus() {
        let mut arena = arena_from(&["@x   "], 1);
        // Tick 1: the exit reveals (no crystals to collect).
        let result = tick(&mut arena, None);
        assert_eq!(result.outcome, TickOutcome::Continue);
        assert!(result.sounds.contains(&Sound::RevealExit));

        // Tick 2: step onto the exit; bonus is 999 after tick 1.
        let result = tick(&mut arena, Some(KeyPress::Right));
        assert_eq!(result.outcome, TickOutcome::LevelFinished);
        assert_eq!(arena.scoreboard.score, 2000 + 999);
        assert!(result.sounds.contains(&Sound::FinishedLevel));
    }

    #[test]
    fn test_fired_pea_does_not_act_on_spawn_tick() {
        let mut arena = arena_from(&["@    "], 1);
        let result = tick(&mut arena, Some(KeyPress::Fire));
        assert_eq!(result.outcome, TickOutcome::Continue);
        // The pea spawned at (1, 14) and has not flown yet.
        assert!(arena.any_actor_at(TilePos::new(1, 14)).is_some());

        let result = tick(&mut arena, None);
        assert_eq!(result.outcome, TickOutcome::Continue);
        assert!(arena.any_actor_at(TilePos::new(1, 14)).is_none());
        assert!(arena.any_actor_at(TilePos::new(2, 14)).is_some());
    }

    #[test]
    fn test_pea_kills_marble_then_purge() {
        let mut arena = arena_from(&["@m   "], 1);
        let before = arena.actors().len();
        // 5 hits at 2 damage each; one pea per shot, fired point-blank.
        for _ in 0..5 {
            tick(&mut arena, Some(KeyPress::Fire));
            tick(&mut arena, None);
        }
        // Marble and all five peas are gone.
        assert!(arena.can_be_attacked_at(TilePos::new(1, 14)).is_none());
        assert_eq!(arena.actors().len(), before - 1);
        assert!(arena.actors().iter().all(|a| a.alive));
    }

    #[test]
    fn test_marble_into_pit_then_walk_through() {
        let mut arena = arena_from(&["@mo  "], 1);
        // Push the marble onto the pit; the pit swallows it this tick.
        tick(&mut arena, Some(KeyPress::Right));
        assert!(arena.any_actor_at(TilePos::new(2, 14)).is_none());
        // The tile is now open ground.
        tick(&mut arena, Some(KeyPress::Right));
        assert_eq!(arena.avatar.pos, TilePos::new(2, 14));
    }

    #[test]
    fn test_collect_all_crystals_reveals_exit() {
        let mut arena = arena_from(&["@c x "], 1);
        let exit_pos = TilePos::new(3, 14);
        let result = tick(&mut arena, Some(KeyPress::Right));
        // Crystal collected and the exit revealed in the same pass
        // (the exit acts after the crystal in spawn order).
        assert!(result.sounds.contains(&Sound::GotGoodie));
        assert!(result.sounds.contains(&Sound::RevealExit));
        let exit = arena.any_actor_at(exit_pos).unwrap();
        assert!(arena.actors()[exit].visible);
    }

    #[test]
    fn test_determinism_same_seed_same_hash() {
        let rows = &["@c m ", " h   ", "  o x"];
        let keys = [
            Some(KeyPress::Right),
            None,
            Some(KeyPress::Fire),
            Some(KeyPress::Down),
            None,
            Some(KeyPress::Left),
            None,
            None,
            Some(KeyPress::Up),
            Some(KeyPress::Fire),
        ];

        let run = |seed: u64| {
            let mut arena = arena_from(rows, seed);
            for key in keys.iter().cycle().take(200) {
                if tick(&mut arena, *key).outcome != TickOutcome::Continue {
                    break;
                }
            }
            arena.compute_hash()
        };

        assert_eq!(run(42), run(42));
        assert_ne!(run(42), run(43));
    }
}
