//! Core deterministic primitives.
//!
//! All types in this module are designed for perfect cross-platform
//! determinism. They form the foundation every replayable level run
//! depends on.

pub mod grid;
pub mod rng;
pub mod hash;

// Re-export core types
pub use grid::{TilePos, Direction, GRID_WIDTH, GRID_HEIGHT};
pub use rng::DeterministicRng;
pub use hash::{StateHash, StateHasher, compute_state_hash};
