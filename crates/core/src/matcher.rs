//! Match detection - finds every cell that belongs to a run of three or more
//!
//! Rows are scanned left to right, then columns top to bottom. Each maximal run of
//! equal, non-empty cells with length >= [`MIN_RUN`] contributes all of its cells.
//! A cell shared by a horizontal and a vertical run is reported once.

use std::hash::{Hash, Hasher};

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::{Position, BOARD_CELLS, BOARD_SIZE, MIN_RUN};

/// Deduplicated set of board positions
///
/// Backed by a 64-bit occupancy mask (one bit per cell) plus the positions in
/// discovery order, so iteration is deterministic and nothing is heap allocated.
/// Equality and hashing only look at membership, not order.
#[derive(Debug, Clone, Default)]
pub struct MatchSet {
    mask: u64,
    cells: ArrayVec<Position, BOARD_CELLS>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a position; returns false if it was already present
    pub fn insert(&mut self, pos: Position) -> bool {
        let bit = 1u64 << pos.flat_index();
        if self.mask & bit != 0 {
            return false;
        }
        self.mask |= bit;
        self.cells.push(pos);
        true
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.in_bounds() && self.mask & (1u64 << pos.flat_index()) != 0
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.mask = 0;
        self.cells.clear();
    }

    /// Positions in discovery order
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().copied()
    }

    pub fn as_slice(&self) -> &[Position] {
        &self.cells
    }

    /// One bit per cell, row-major
    pub fn mask(&self) -> u64 {
        self.mask
    }
}

impl PartialEq for MatchSet {
    fn eq(&self, other: &Self) -> bool {
        self.mask == other.mask
    }
}

impl Eq for MatchSet {}

impl Hash for MatchSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.mask.hash(state);
    }
}

impl FromIterator<Position> for MatchSet {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        let mut set = MatchSet::new();
        for pos in iter {
            set.insert(pos);
        }
        set
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Scan the whole board and return every matched cell
pub fn find_matches(board: &Board) -> MatchSet {
    let mut matches = MatchSet::new();

    for row in 0..BOARD_SIZE {
        scan_line(board, &mut matches, |i| Position::new(row, i));
    }
    for col in 0..BOARD_SIZE {
        scan_line(board, &mut matches, |i| Position::new(i, col));
    }

    matches
}

/// True when the board contains at least one run
pub fn has_match(board: &Board) -> bool {
    !find_matches(board).is_empty()
}

/// Scan one row or column; `at(i)` maps the i-th step of the line to a position
fn scan_line(board: &Board, out: &mut MatchSet, at: impl Fn(u8) -> Position) {
    let mut run_start = 0u8;
    for i in 1..=BOARD_SIZE {
        let prev = board.get(at(i - 1));
        if i < BOARD_SIZE && prev.is_some() && board.get(at(i)) == prev {
            continue;
        }

        // Run [run_start, i) just ended.
        let run_len = (i - run_start) as usize;
        if run_len >= MIN_RUN && board.get(at(run_start)).is_some() {
            for k in run_start..i {
                out.insert(at(k));
            }
        }
        run_start = i;
    }
}
