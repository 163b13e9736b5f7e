//! Board module - manages the game grid
//!
//! The board is an 8x8 grid where each cell holds a tile kind, or is empty while a
//! cascade is being resolved. Uses a flat array for cache locality and zero allocation.
//! Coordinates are [`Position`]s: row 0..7 top to bottom, column 0..7 left to right.
//!
//! Out-of-range positions are a caller bug, not a game condition: every accessor
//! panics on them.

use crate::rng::TileSource;
use crate::types::{Cell, Position, TileKind, BOARD_CELLS, BOARD_SIZE};

/// The game board - 8 x 8 cells using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * SIZE + col)
    cells: [Cell; BOARD_CELLS],
}

impl Board {
    /// Create a new board with every cell empty
    pub fn empty() -> Self {
        Self {
            cells: [None; BOARD_CELLS],
        }
    }

    /// Create a fully populated board containing no runs of three
    ///
    /// Cells are filled in row-major order. A candidate is resampled while it
    /// would complete a run with the two cells to its left or the two cells above.
    pub fn generate<S: TileSource>(tiles: &mut S) -> Self {
        let mut board = Self::empty();
        board.regenerate(tiles);
        board
    }

    /// Refill this board in place (see [`Board::generate`])
    pub fn regenerate<S: TileSource>(&mut self, tiles: &mut S) {
        self.cells = [None; BOARD_CELLS];
        for pos in Position::all() {
            let kind = loop {
                let candidate = tiles.next_tile();
                if !self.completes_run(pos, candidate) {
                    break candidate;
                }
            };
            self.set(pos, Some(kind));
        }
    }

    /// Whether placing `kind` at `pos` would finish a run with the two
    /// previously assigned cells to the left or above
    fn completes_run(&self, pos: Position, kind: TileKind) -> bool {
        let same = |row: u8, col: u8| self.cells[Position::new(row, col).flat_index()] == Some(kind);

        let left = pos.col >= 2 && same(pos.row, pos.col - 1) && same(pos.row, pos.col - 2);
        let above = pos.row >= 2 && same(pos.row - 1, pos.col) && same(pos.row - 2, pos.col);
        left || above
    }

    /// Build a board from explicit rows of tile kinds
    pub fn from_rows(rows: [[TileKind; BOARD_SIZE as usize]; BOARD_SIZE as usize]) -> Self {
        let mut board = Self::empty();
        for (row, kinds) in rows.iter().enumerate() {
            for (col, kind) in kinds.iter().enumerate() {
                board.set(Position::new(row as u8, col as u8), Some(*kind));
            }
        }
        board
    }

    /// Build a board from tile indices (0..TILE_TYPES)
    ///
    /// Panics on an index outside the palette.
    pub fn from_indices(rows: [[u8; BOARD_SIZE as usize]; BOARD_SIZE as usize]) -> Self {
        let kinds = rows.map(|row| {
            row.map(|i| {
                TileKind::from_index(i).unwrap_or_else(|| panic!("tile index {i} out of range"))
            })
        });
        Self::from_rows(kinds)
    }

    /// Calculate flat index from a position, panicking when out of range
    #[inline(always)]
    fn index(pos: Position) -> usize {
        assert!(pos.in_bounds(), "position {pos} is outside the board");
        pos.flat_index()
    }

    /// Get the cell at `pos`
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[Self::index(pos)]
    }

    /// Set the cell at `pos`
    pub fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[Self::index(pos)] = cell;
    }

    /// Empty the cell at `pos`
    pub fn clear_cell(&mut self, pos: Position) {
        self.set(pos, None);
    }

    /// Exchange the contents of two cells
    pub fn swap(&mut self, a: Position, b: Position) {
        let (ia, ib) = (Self::index(a), Self::index(b));
        self.cells.swap(ia, ib);
    }

    /// True when every cell holds a tile
    pub fn is_packed(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Number of empty cells
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write the board as a `u8` grid (0 = empty, 1..=5 = tile index + 1)
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_SIZE as usize]; BOARD_SIZE as usize]) {
        for pos in Position::all() {
            out[pos.row as usize][pos.col as usize] =
                self.get(pos).map_or(0, |kind| kind.index() + 1);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}
