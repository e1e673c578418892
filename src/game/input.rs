//! Input Contract
//!
//! The input source is polled non-blockingly once per tick: at most one
//! queued key press reaches the simulation, and `None` simply means
//! "no action this tick".

use serde::{Serialize, Deserialize};
use crate::core::grid::Direction;

/// A queued key press consumed by the avatar at the start of a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyPress {
    /// Abort the current level (kills the avatar).
    Escape,
    /// Fire a pea.
    Fire,
    /// Face and step up.
    Up,
    /// Face and step down.
    Down,
    /// Face and step left.
    Left,
    /// Face and step right.
    Right,
}

impl KeyPress {
    /// The movement direction of an arrow key, if this is one.
    pub fn direction(self) -> Option<Direction> {
        match self {
            KeyPress::Up => Some(Direction::Up),
            KeyPress::Down => Some(Direction::Down),
            KeyPress::Left => Some(Direction::Left),
            KeyPress::Right => Some(Direction::Right),
            KeyPress::Escape | KeyPress::Fire => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_directions() {
        assert_eq!(KeyPress::Up.direction(), Some(Direction::Up));
        assert_eq!(KeyPress::Down.direction(), Some(Direction::Down));
        assert_eq!(KeyPress::Left.direction(), Some(Direction::Left));
        assert_eq!(KeyPress::Right.direction(), Some(Direction::Right));
        assert_eq!(KeyPress::Escape.direction(), None);
        assert_eq!(KeyPress::Fire.direction(), None);
    }
}
