//! Gravity resolution - compacts columns and refills them from above
//!
//! Each column is handled independently with a two-pointer pass from the bottom up:
//! surviving tiles slide to the lowest free row (keeping their relative order), then
//! the vacated rows at the top are filled from the [`TileSource`]. Refills are not
//! checked for matches; a refill that lines up is what drives the next cascade.

use arrayvec::ArrayVec;
use tracing::trace;

use crate::board::Board;
use crate::rng::TileSource;
use crate::types::{Displacement, Position, BOARD_CELLS, BOARD_SIZE};

/// Every tile movement produced by one gravity pass (at most one per cell)
pub type Displacements = ArrayVec<Displacement, BOARD_CELLS>;

/// Apply gravity to the whole board and refill empty cells
///
/// Returns the movement of every tile that changed row, plus one entry per new
/// tile. An empty result means the board was already packed.
pub fn apply_gravity<S: TileSource>(board: &mut Board, tiles: &mut S) -> Displacements {
    let mut out = Displacements::new();

    for col in 0..BOARD_SIZE {
        let before = out.len();
        let write_row = compact_column(board, col, &mut out);
        refill_column(board, col, write_row, tiles, &mut out);
        if out.len() > before {
            trace!(col, moved = out.len() - before, "column settled");
        }
    }

    out
}

/// Slide a column's tiles down; returns the lowest row left empty, or -1 when none
fn compact_column(board: &mut Board, col: u8, out: &mut Displacements) -> i8 {
    let mut write_row = BOARD_SIZE as i8 - 1;

    for read_row in (0..BOARD_SIZE).rev() {
        let from = Position::new(read_row, col);
        let Some(kind) = board.get(from) else {
            continue;
        };

        if write_row != read_row as i8 {
            let to = Position::new(write_row as u8, col);
            board.set(to, Some(kind));
            board.clear_cell(from);
            out.push(Displacement {
                kind,
                from_row: read_row as i8,
                from_col: col,
                to_row: to.row,
                to_col: col,
                is_new: false,
            });
        }
        write_row -= 1;
    }

    write_row
}

/// Fill rows `0..=top_empty` with new tiles, bottom-most first
fn refill_column<S: TileSource>(
    board: &mut Board,
    col: u8,
    top_empty: i8,
    tiles: &mut S,
    out: &mut Displacements,
) {
    for row in (0..=top_empty).rev() {
        let kind = tiles.next_tile();
        board.set(Position::new(row as u8, col), Some(kind));
        // The k-th new tile from the bottom of the gap enters from row -k.
        let from_row = -(top_empty - row + 1);
        out.push(Displacement {
            kind,
            from_row,
            from_col: col,
            to_row: row as u8,
            to_col: col,
            is_new: true,
        });
    }
}
