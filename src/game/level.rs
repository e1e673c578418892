//! Level Loading
//!
//! Parses the 15x15 text maze format and abstracts over where level data
//! comes from. The session asks a [`LevelProvider`] for consecutive level
//! numbers; a missing level ends the game as a win.
//!
//! Format: exactly 15 lines of exactly 15 characters. The FIRST text line
//! is the TOP row of the grid (highest y), so the file reads the way the
//! maze looks on screen.

use std::path::PathBuf;

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::core::grid::{TilePos, GRID_WIDTH, GRID_HEIGHT};

// =============================================================================
// TERRAIN
// =============================================================================

/// What a single maze character places on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terrain {
    /// Nothing on this tile.
    Empty,
    /// The avatar's start tile (stored once as `Maze::player`).
    Player,
    /// Wall.
    Wall,
    /// Marble.
    Marble,
    /// Pit.
    Pit,
    /// Hidden exit.
    Exit,
    /// Horizontal rage-bot (starts facing right).
    HorizRageBot,
    /// Vertical rage-bot (starts facing down).
    VertRageBot,
    /// Thief-bot factory.
    Factory,
    /// Mean thief-bot factory.
    MeanFactory,
    /// Crystal.
    Crystal,
    /// Restore-health goodie.
    RestoreHealth,
    /// Extra-life goodie.
    ExtraLife,
    /// Ammo goodie.
    Ammo,
}

impl Terrain {
    /// Decode one maze character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ' ' => Some(Terrain::Empty),
            '@' => Some(Terrain::Player),
            '#' => Some(Terrain::Wall),
            'm' => Some(Terrain::Marble),
            'o' => Some(Terrain::Pit),
            'x' => Some(Terrain::Exit),
            'h' => Some(Terrain::HorizRageBot),
            'v' => Some(Terrain::VertRageBot),
            'F' => Some(Terrain::Factory),
            'M' => Some(Terrain::MeanFactory),
            'c' => Some(Terrain::Crystal),
            'r' => Some(Terrain::RestoreHealth),
            'l' => Some(Terrain::ExtraLife),
            'a' => Some(Terrain::Ammo),
            _ => None,
        }
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Why a maze text failed to parse.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    /// Line count is not exactly 15.
    #[error("expected 15 rows, found {found}")]
    BadRowCount {
        /// Rows present in the text.
        found: usize,
    },
    /// A line is not exactly 15 characters.
    #[error("row {row} has {found} characters, expected 15")]
    BadRowWidth {
        /// Zero-based text line index.
        row: usize,
        /// Characters present on the line.
        found: usize,
    },
    /// A character outside the maze alphabet.
    #[error("unknown tile character {0:?}")]
    UnknownTile(char),
    /// Not exactly one `@` in the maze.
    #[error("expected exactly 1 player start, found {0}")]
    BadPlayerCount(usize),
}

/// Why a level failed to load.
#[derive(Debug, Error)]
pub enum LevelError {
    /// The provider has no data for this level number.
    #[error("level {0} not found")]
    NotFound(u32),
    /// The level data exists but is not a valid maze.
    #[error("level {level} is malformed")]
    Malformed {
        /// Level number.
        level: u32,
        /// Parse failure detail.
        #[source]
        source: MazeError,
    },
    /// The level data could not be read.
    #[error("failed to read level {level}")]
    Io {
        /// Level number.
        level: u32,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

// =============================================================================
// MAZE
// =============================================================================

/// A parsed 15x15 maze.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Maze {
    /// Row-major terrain, indexed `y * GRID_WIDTH + x` with y ascending
    /// from the bottom row. The player tile is stored as `Empty` here.
    tiles: Vec<Terrain>,
    player: TilePos,
}

impl Maze {
    /// Parse maze text (15 lines of 15 characters, top row first).
    pub fn parse(text: &str) -> Result<Self, MazeError> {
        let lines: Vec<&str> = text.lines().collect();
        if lines.len() != GRID_HEIGHT as usize {
            return Err(MazeError::BadRowCount { found: lines.len() });
        }

        let mut tiles = vec![Terrain::Empty; (GRID_WIDTH * GRID_HEIGHT) as usize];
        let mut players = Vec::new();

        for (row, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            if chars.len() != GRID_WIDTH as usize {
                return Err(MazeError::BadRowWidth {
                    row,
                    found: chars.len(),
                });
            }
            // First text line is the top row of the grid.
            let y = GRID_HEIGHT as usize - 1 - row;
            for (x, &c) in chars.iter().enumerate() {
                let terrain = Terrain::from_char(c).ok_or(MazeError::UnknownTile(c))?;
                if terrain == Terrain::Player {
                    players.push(TilePos::new(x as i32, y as i32));
                } else {
                    tiles[y * GRID_WIDTH as usize + x] = terrain;
                }
            }
        }

        if players.len() != 1 {
            return Err(MazeError::BadPlayerCount(players.len()));
        }

        Ok(Self {
            tiles,
            player: players[0],
        })
    }

    /// Terrain at a tile (must be in bounds).
    pub fn get(&self, pos: TilePos) -> Terrain {
        self.tiles[pos.y as usize * GRID_WIDTH as usize + pos.x as usize]
    }

    /// Where the avatar starts.
    pub fn player_start(&self) -> TilePos {
        self.player
    }

    /// All tiles with their terrain, x-outer / y-inner ascending.
    ///
    /// This order fixes actor spawn order, which in turn fixes actor ids
    /// and the per-tick action order, so it is part of the determinism
    /// contract.
    pub fn tiles(&self) -> impl Iterator<Item = (TilePos, Terrain)> + '_ {
        (0..GRID_WIDTH).flat_map(move |x| {
            (0..GRID_HEIGHT).map(move |y| {
                let pos = TilePos::new(x, y);
                (pos, self.get(pos))
            })
        })
    }
}

// =============================================================================
// PROVIDERS
// =============================================================================

/// Source of consecutive numbered levels.
pub trait LevelProvider {
    /// Load and parse the maze for a level number.
    fn load(&self, level: u32) -> Result<Maze, LevelError>;
}

/// Loads `level00.txt`, `level01.txt`, ... from a directory.
#[derive(Clone, Debug)]
pub struct DirLevels {
    dir: PathBuf,
}

impl DirLevels {
    /// Provider reading from the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl LevelProvider for DirLevels {
    fn load(&self, level: u32) -> Result<Maze, LevelError> {
        let path = self.dir.join(format!("level{:02}.txt", level));
        let text = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LevelError::NotFound(level)
            } else {
                LevelError::Io { level, source: e }
            }
        })?;
        Maze::parse(&text).map_err(|source| LevelError::Malformed { level, source })
    }
}

/// In-memory level list, mostly for tests and demos.
#[derive(Clone, Debug, Default)]
pub struct MemoryLevels {
    mazes: Vec<String>,
}

impl MemoryLevels {
    /// Provider serving the given maze texts as levels 0, 1, ...
    pub fn new(mazes: Vec<String>) -> Self {
        Self { mazes }
    }
}

impl LevelProvider for MemoryLevels {
    fn load(&self, level: u32) -> Result<Maze, LevelError> {
        let text = self
            .mazes
            .get(level as usize)
            .ok_or(LevelError::NotFound(level))?;
        Maze::parse(text).map_err(|source| LevelError::Malformed { level, source })
    }
}

// =============================================================================
// TESTS
// =============================================================================
