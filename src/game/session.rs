//! Game Session
//!
//! Drives consecutive levels through one [`LevelProvider`]: loads level
//! 0 on creation, reloads the current level after a death with lives
//! remaining, advances after a finish, and ends the game when lives run
//! out or the provider runs out of levels (which counts as winning).

use tracing::info;

use crate::game::arena::{Arena, Scoreboard};
use crate::game::input::KeyPress;
use crate::game::level::{LevelError, LevelProvider};
use crate::game::tick::{self, TickOutcome, TickResult};

/// Highest playable level number.
pub const LAST_LEVEL: u32 = 99;

/// Seed mixing constant (golden-ratio increment) so per-level seeds
/// derived from one base seed do not correlate.
const LEVEL_SEED_MIX: u64 = 0x9E3779B97F4A7C15;

/// Where the session stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    /// A level is in progress.
    Playing,
    /// All levels cleared.
    Won,
    /// No lives left.
    GameOver,
}

enum SessionState {
    Playing(Arena),
    Won,
    GameOver,
}

/// A full game: scoreboard, current arena, and the level source.
pub struct Session<P: LevelProvider> {
    provider: P,
    base_seed: u64,
    scoreboard: Scoreboard,
    state: SessionState,
}

impl<P: LevelProvider> Session<P> {
    /// Start a game at level 0.
    ///
    /// A provider with no level 0 at all means there is nothing to play,
    /// which counts as an immediate win.
    pub fn new(provider: P, base_seed: u64) -> Result<Self, LevelError> {
        let scoreboard = Scoreboard::new();
        let state = Self::load_level(&provider, base_seed, scoreboard)?;
        Ok(Self {
            provider,
            base_seed,
            scoreboard,
            state,
        })
    }

    fn load_level(
        provider: &P,
        base_seed: u64,
        scoreboard: Scoreboard,
    ) -> Result<SessionState, LevelError> {
        let level = scoreboard.level;
        if level > LAST_LEVEL {
            return Ok(SessionState::Won);
        }
        let maze = match provider.load(level) {
            Ok(maze) => maze,
            Err(LevelError::NotFound(_)) => return Ok(SessionState::Won),
            Err(e) => return Err(e),
        };
        let seed = base_seed ^ (level as u64).wrapping_mul(LEVEL_SEED_MIX);
        info!(level, "starting level");
        Ok(SessionState::Playing(Arena::from_maze(
            &maze, scoreboard, seed,
        )))
    }

    /// Advance the game by one tick; `None` once the game is over.
    pub fn tick(&mut self, key: Option<KeyPress>) -> Result<Option<TickResult>, LevelError> {
        let SessionState::Playing(arena) = &mut self.state else {
            return Ok(None);
        };

        let result = tick::tick(arena, key);
        self.scoreboard = arena.scoreboard;

        match result.outcome {
            TickOutcome::Continue => {}
            TickOutcome::PlayerDied => {
                if self.scoreboard.lives == 0 {
                    info!(score = self.scoreboard.score, "game over");
                    self.state = SessionState::GameOver;
                } else {
                    self.state =
                        Self::load_level(&self.provider, self.base_seed, self.scoreboard)?;
                }
            }
            TickOutcome::LevelFinished => {
                self.scoreboard.level += 1;
                self.state = Self::load_level(&self.provider, self.base_seed, self.scoreboard)?;
                if matches!(self.state, SessionState::Won) {
                    info!(score = self.scoreboard.score, "game won");
                }
            }
        }
        Ok(Some(result))
    }

    /// Current session status.
    pub fn status(&self) -> SessionStatus {
        match self.state {
            SessionState::Playing(_) => SessionStatus::Playing,
            SessionState::Won => SessionStatus::Won,
            SessionState::GameOver => SessionStatus::GameOver,
        }
    }

    /// Cross-level scoreboard.
    pub fn scoreboard(&self) -> Scoreboard {
        self.scoreboard
    }

    /// The live arena while a level is in progress.
    pub fn arena(&self) -> Option<&Arena> {
        match &self.state {
            SessionState::Playing(arena) => Some(arena),
            _ => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::arena::testutil::maze_text;
    use crate::game::level::MemoryLevels;

    fn one_level(rows: &[&str]) -> MemoryLevels {
        MemoryLevels::new(vec![maze_text(rows)])
    }

    #[test]
    fn test_empty_provider_is_instant_win() {
        let session = Session::new(MemoryLevels::default(), 1).unwrap();
        assert_eq!(session.status(), SessionStatus::Won);
    }

    #[test]
    fn test_new_session_starts_level_zero() {
        let session = Session::new(one_level(&["@    "]), 1).unwrap();
        assert_eq!(session.status(), SessionStatus::Playing);
        assert_eq!(session.scoreboard().level, 0);
        assert!(session.arena().is_some());
    }

    #[test]
    fn test_death_reloads_level_until_lives_run_out() {
        let mut session = Session::new(one_level(&["@    "]), 1).unwrap();
        for expected_lives in [2, 1] {
            let result = session.tick(Some(KeyPress::Escape)).unwrap().unwrap();
            assert_eq!(result.outcome, TickOutcome::PlayerDied);
            assert_eq!(session.scoreboard().lives, expected_lives);
            assert_eq!(session.status(), SessionStatus::Playing);
            // The reloaded arena starts fresh.
            assert_eq!(session.arena().unwrap().tick_count(), 0);
        }
        session.tick(Some(KeyPress::Escape)).unwrap();
        assert_eq!(session.status(), SessionStatus::GameOver);
        assert!(session.tick(None).unwrap().is_none());
    }

    #[test]
    fn test_finishing_last_level_wins() {
        let mut session = Session::new(one_level(&["@x   "]), 1).unwrap();
        // Reveal tick, then step onto the exit.
        session.tick(None).unwrap();
        let result = session.tick(Some(KeyPress::Right)).unwrap().unwrap();
        assert_eq!(result.outcome, TickOutcome::LevelFinished);
        // No level 1 in the provider: the game is won.
        assert_eq!(session.status(), SessionStatus::Won);
        assert_eq!(session.scoreboard().level, 1);
        assert_eq!(session.scoreboard().score, 2000 + 999);
    }

    #[test]
    fn test_finishing_advances_to_next_level() {
        let provider = MemoryLevels::new(vec![
            maze_text(&["@x   "]),
            maze_text(&["@ c  "]),
        ]);
        let mut session = Session::new(provider, 1).unwrap();
        session.tick(None).unwrap();
        session.tick(Some(KeyPress::Right)).unwrap();
        assert_eq!(session.status(), SessionStatus::Playing);
        assert_eq!(session.scoreboard().level, 1);
        // Score carried over; the new arena has the crystal.
        assert_eq!(session.scoreboard().score, 2000 + 999);
        assert_eq!(session.arena().unwrap().crystals_total(), 1);
    }

    #[test]
    fn test_score_persists_across_death() {
        let mut session = Session::new(one_level(&["@c   "]), 1).unwrap();
        let result = session.tick(Some(KeyPress::Right)).unwrap().unwrap();
        assert!(result.sounds.contains(&crate::game::events::Sound::GotGoodie));
        assert_eq!(session.arena().unwrap().scoreboard.score, 50);

        session.tick(Some(KeyPress::Escape)).unwrap();
        // The reloaded arena snapshots the scoreboard taken at death,
        // which includes the crystal points.
        assert_eq!(session.scoreboard().score, 50);
        assert_eq!(session.arena().unwrap().crystals_total(), 1);
    }
}
