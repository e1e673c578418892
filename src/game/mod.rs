//! Game simulation: actors, levels, the tick loop, and sessions.
//!
//! The [`arena`] module owns all per-level state; the behavior modules
//! (`avatar`, `robot`, `factory`, `terrain`, `collectable`, `pea`)
//! mutate it through capability queries; [`tick`] sequences one frame
//! and [`session`] strings levels into a full game.

pub mod actor;
pub mod arena;
pub mod avatar;
pub mod collectable;
pub mod events;
pub mod factory;
pub mod input;
pub mod level;
pub mod pea;
pub mod robot;
pub mod session;
pub mod terrain;
pub mod tick;

// Re-export main types
pub use actor::{Actor, ActorId, ActorKind, ActivityGate, Avatar, CollectableKind};
pub use arena::{Arena, Scoreboard, INITIAL_BONUS};
pub use events::Sound;
pub use input::KeyPress;
pub use level::{DirLevels, LevelError, LevelProvider, Maze, MazeError, MemoryLevels, Terrain};
pub use session::{Session, SessionStatus, LAST_LEVEL};
pub use tick::{tick, TickOutcome, TickResult};
