//! # Marble Maze
//!
//! Deterministic tile-based maze game simulation: push marbles, dodge
//! robots, collect crystals, reach the exit.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       MARBLE MAZE                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/              - Deterministic primitives               │
//! │  ├── grid.rs        - 15x15 tile grid and directions         │
//! │  ├── rng.rs         - Deterministic Xorshift128+ PRNG        │
//! │  └── hash.rs        - State hashing for verification         │
//! │                                                              │
//! │  game/              - Game logic (deterministic)             │
//! │  ├── actor.rs       - Actor taxonomy and capabilities        │
//! │  ├── level.rs       - Maze text parsing and providers        │
//! │  ├── arena.rs       - Per-level state and spatial queries    │
//! │  ├── avatar.rs      - Player behavior                        │
//! │  ├── robot.rs       - Rage-bot and thief-bot behavior        │
//! │  ├── factory.rs     - Thief-bot factories                    │
//! │  ├── terrain.rs     - Marbles, pits, and the exit            │
//! │  ├── collectable.rs - Crystals and goodies                   │
//! │  ├── pea.rs         - Projectile flight                      │
//! │  ├── tick.rs        - Authoritative simulation loop          │
//! │  └── session.rs     - Level progression and lives            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The simulation is **100% deterministic**:
//! - Integer-only game state, no floating point
//! - Fixed actor iteration order (spawn order)
//! - No system time dependencies
//! - All randomness from seeded Xorshift128+
//!
//! Given the same level data, seed, and key-press sequence, every run
//! produces **identical results** on any platform, verifiable through
//! [`Arena::compute_hash`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use core::grid::{Direction, TilePos, GRID_HEIGHT, GRID_WIDTH};
pub use core::rng::DeterministicRng;
pub use game::arena::{Arena, Scoreboard};
pub use game::input::KeyPress;
pub use game::level::{DirLevels, LevelError, LevelProvider, Maze, MemoryLevels};
pub use game::session::{Session, SessionStatus};
pub use game::tick::{tick, TickOutcome, TickResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
