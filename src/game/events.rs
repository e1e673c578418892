//! Sound Events
//!
//! Sound identifiers emitted by the simulation and drained once per tick.
//! The presentation layer plays them by name; the core never blocks on
//! playback (fire-and-forget, per the external presentation contract).

use serde::{Serialize, Deserialize};

/// A sound the simulation asked the presentation layer to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Sound {
    /// Avatar died (pea damage or escape key).
    PlayerDie = 0,
    /// Avatar fired a pea.
    PlayerFire = 1,
    /// Avatar took non-lethal damage.
    PlayerImpact = 2,
    /// A robot fired a pea.
    EnemyFire = 3,
    /// A robot took non-lethal damage.
    RobotImpact = 4,
    /// A robot died.
    RobotDie = 5,
    /// A thief-bot captured a goodie.
    RobotMunch = 6,
    /// A factory produced a new thief-bot.
    RobotBorn = 7,
    /// Avatar collected a crystal or goodie.
    GotGoodie = 8,
    /// The exit became visible.
    RevealExit = 9,
    /// Avatar stepped on the visible exit.
    FinishedLevel = 10,
}

impl Sound {
    /// Stable name for the play-by-name presentation contract.
    pub fn name(self) -> &'static str {
        match self {
            Sound::PlayerDie => "player_die",
            Sound::PlayerFire => "player_fire",
            Sound::PlayerImpact => "player_impact",
            Sound::EnemyFire => "enemy_fire",
            Sound::RobotImpact => "robot_impact",
            Sound::RobotDie => "robot_die",
            Sound::RobotMunch => "robot_munch",
            Sound::RobotBorn => "robot_born",
            Sound::GotGoodie => "got_goodie",
            Sound::RevealExit => "reveal_exit",
            Sound::FinishedLevel => "finished_level",
        }
    }
}
