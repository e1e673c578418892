//! Tile Grid Primitives
//!
//! Integer tile coordinates and the four cardinal directions.
//! All maze geometry is whole tiles; there is no sub-tile position.

use serde::{Serialize, Deserialize};

/// Maze width in tiles.
pub const GRID_WIDTH: i32 = 15;

/// Maze height in tiles.
pub const GRID_HEIGHT: i32 = 15;

/// A tile coordinate in the maze.
///
/// `x` grows rightward, `y` grows upward. Positions outside the grid are
/// representable (projectiles never leave a walled maze in practice, and
/// neighborhood scans clip with [`TilePos::in_bounds`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TilePos {
    /// Column index.
    pub x: i32,
    /// Row index.
    pub y: i32,
}

impl TilePos {
    /// Create a tile position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The adjacent tile in the given direction (`None` returns self).
    #[inline]
    pub fn step(self, dir: Direction) -> TilePos {
        let (dx, dy) = dir.offset();
        TilePos::new(self.x + dx, self.y + dy)
    }

    /// Whether the position lies inside the fixed maze grid.
    #[inline]
    pub fn in_bounds(self) -> bool {
        self.x >= 0 && self.x < GRID_WIDTH && self.y >= 0 && self.y < GRID_HEIGHT
    }
}

/// Facing or movement direction.
///
/// `None` is a valid facing for inert actors (walls, marbles, pits).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    /// No facing; stepping in this direction stays in place.
    #[default]
    None = 0,
    /// Toward larger y.
    Up = 1,
    /// Toward smaller y.
    Down = 2,
    /// Toward smaller x.
    Left = 3,
    /// Toward larger x.
    Right = 4,
}

impl Direction {
    /// The four movement directions, in a fixed reference order.
    pub const CARDINALS: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
    ];

    /// Tile offset for one step in this direction.
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::None => (0, 0),
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The 180-degree reversal (`None` stays `None`).
    #[inline]
    pub fn reverse(self) -> Direction {
        match self {
            Direction::None => Direction::None,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}
