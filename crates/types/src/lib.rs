//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, event serialisation).
//!
//! # Board Dimensions
//!
//! The playfield is a fixed square grid:
//!
//! - **Size**: 8 rows x 8 columns (indexed 0-7)
//! - **Origin**: row 0 is the top row, column 0 the leftmost column
//! - **Palette**: 5 tile kinds
//!
//! # Timing Constants
//!
//! The engine itself has no notion of time. These values are used by the
//! presentation layer to pace the phases the engine exposes:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `SWAP_ANIM_MS` | 220 | Swap slide (and invalid-swap bounce) |
//! | `CLEAR_ANIM_MS` | 420 | Matched tiles fading out |
//! | `FALL_ANIM_MS` | 520 | Gravity drop of surviving and new tiles |
//!
//! # Examples
//!
//! ```
//! use match3_types::{Position, TileKind, BOARD_SIZE};
//!
//! let a = Position::new(3, 4);
//! let b = Position::new(3, 5);
//! assert!(a.is_adjacent(b));
//! assert!(!a.is_adjacent(Position::new(4, 5)));
//!
//! assert_eq!(TileKind::from_index(2), Some(TileKind::Sushi));
//! assert_eq!(TileKind::Sushi.index(), 2);
//!
//! assert_eq!(BOARD_SIZE, 8);
//! ```

use std::fmt;

/// Board width and height in cells (8x8)
pub const BOARD_SIZE: u8 = 8;

/// Total number of cells on the board
pub const BOARD_CELLS: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// Number of distinct tile kinds
pub const TILE_TYPES: u8 = 5;

/// Moves available at the start of a game
pub const DEFAULT_MOVE_BUDGET: u32 = 30;

/// Minimum run length that counts as a match
pub const MIN_RUN: usize = 3;

/// Points per cleared tile at chain depth 0
pub const SCORE_PER_TILE: u32 = 10;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Swap slide duration; also used for the invalid-swap bounce
pub const SWAP_ANIM_MS: u32 = 220;

/// Fade-out duration for matched tiles
pub const CLEAR_ANIM_MS: u32 = 420;

/// Gravity drop duration
pub const FALL_ANIM_MS: u32 = 520;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_constants_are_consistent() {
        assert_eq!(BOARD_CELLS, 64);
        assert!(BOARD_CELLS <= u64::BITS as usize);
        assert_eq!(TileKind::ALL.len(), TILE_TYPES as usize);
    }

    #[test]
    fn tile_kind_index_round_trips() {
        for kind in TileKind::ALL {
            assert_eq!(TileKind::from_index(kind.index()), Some(kind));
        }
        assert_eq!(TileKind::from_index(TILE_TYPES), None);
    }

    #[test]
    fn adjacency_is_manhattan_distance_one() {
        let p = Position::new(0, 0);
        assert!(p.is_adjacent(Position::new(0, 1)));
        assert!(p.is_adjacent(Position::new(1, 0)));
        assert!(!p.is_adjacent(p));
        assert!(!p.is_adjacent(Position::new(1, 1)));
        assert!(!p.is_adjacent(Position::new(0, 2)));
    }
}

/// The five tile kinds
///
/// Each kind has a stable index (0-4) used by snapshots and the JSON protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TileKind {
    Apple,
    Pizza,
    Sushi,
    Burger,
    Cake,
}

impl TileKind {
    /// All kinds in index order
    pub const ALL: [TileKind; TILE_TYPES as usize] = [
        TileKind::Apple,
        TileKind::Pizza,
        TileKind::Sushi,
        TileKind::Burger,
        TileKind::Cake,
    ];

    /// Map an index in `0..TILE_TYPES` to a kind
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn index(self) -> u8 {
        match self {
            TileKind::Apple => 0,
            TileKind::Pizza => 1,
            TileKind::Sushi => 2,
            TileKind::Burger => 3,
            TileKind::Cake => 4,
        }
    }

    /// Lowercase name for logs and the JSON protocol
    pub fn as_str(self) -> &'static str {
        match self {
            TileKind::Apple => "apple",
            TileKind::Pizza => "pizza",
            TileKind::Sushi => "sushi",
            TileKind::Burger => "burger",
            TileKind::Cake => "cake",
        }
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cell on the board
///
/// - `None`: Empty cell (only while a cascade is being resolved)
/// - `Some(TileKind)`: Cell holding a tile
pub type Cell = Option<TileKind>;

/// Grid coordinate, row 0 at the top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Whether the position lies on the 8x8 grid
    pub fn in_bounds(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// True when `other` is exactly one step away horizontally or vertically
    pub fn is_adjacent(self, other: Position) -> bool {
        self.row.abs_diff(other.row) as u16 + self.col.abs_diff(other.col) as u16 == 1
    }

    /// Row-major flat index
    ///
    /// Only meaningful for in-bounds positions.
    pub fn flat_index(self) -> usize {
        (self.row as usize) * (BOARD_SIZE as usize) + (self.col as usize)
    }

    /// Iterate every grid position in row-major order
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::new(row, col)))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Movement of one tile during gravity resolution
///
/// `from_row` is negative for freshly generated tiles: the k-th new tile
/// counted from the bottom of a column's fill region starts at row `-k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Displacement {
    pub kind: TileKind,
    pub from_row: i8,
    pub from_col: u8,
    pub to_row: u8,
    pub to_col: u8,
    pub is_new: bool,
}

impl Displacement {
    pub fn to(&self) -> Position {
        Position::new(self.to_row, self.to_col)
    }

    /// Rows travelled, always positive
    pub fn distance(&self) -> u8 {
        (self.to_row as i16 - self.from_row as i16) as u8
    }
}
