//! Move search over a stable board
//!
//! Used by the headless autoplay driver and by tests that need to play whole
//! games without scripting every swap.

use crate::core::{find_matches, Board};
use crate::types::{Position, BOARD_SIZE};

/// A swap that would form at least one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapCandidate {
    pub a: Position,
    pub b: Position,
    /// Cells matched immediately after the swap (cascades not included).
    pub matched: usize,
}

/// Every valid swap, in row-major order of `a` (right neighbour before down)
pub fn valid_swaps(board: &Board) -> Vec<SwapCandidate> {
    let mut out = Vec::new();
    let mut scratch = board.clone();

    for a in Position::all() {
        for b in neighbours(a) {
            let matched = matched_after_swap(&mut scratch, a, b);
            if matched > 0 {
                out.push(SwapCandidate { a, b, matched });
            }
        }
    }

    out
}

/// The swap with the largest immediate match; ties go to the first in scan order
pub fn best_swap(board: &Board) -> Option<SwapCandidate> {
    let mut scratch = board.clone();
    let mut best: Option<SwapCandidate> = None;

    for a in Position::all() {
        for b in neighbours(a) {
            let matched = matched_after_swap(&mut scratch, a, b);
            if matched == 0 {
                continue;
            }
            if best.map_or(true, |c| matched > c.matched) {
                best = Some(SwapCandidate { a, b, matched });
            }
        }
    }

    best
}

/// No valid swap left
pub fn is_dead(board: &Board) -> bool {
    best_swap(board).is_none()
}

fn neighbours(a: Position) -> impl Iterator<Item = Position> {
    let right = (a.col + 1 < BOARD_SIZE).then(|| Position::new(a.row, a.col + 1));
    let down = (a.row + 1 < BOARD_SIZE).then(|| Position::new(a.row + 1, a.col));
    right.into_iter().chain(down)
}

fn matched_after_swap(scratch: &mut Board, a: Position, b: Position) -> usize {
    if scratch.get(a).is_none() || scratch.get(b).is_none() || scratch.get(a) == scratch.get(b) {
        return 0;
    }
    scratch.swap(a, b);
    let matched = find_matches(scratch).len();
    scratch.swap(a, b);
    matched
}
