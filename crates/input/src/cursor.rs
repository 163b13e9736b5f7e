//! Keyboard cursor over the board.

use crate::map::InputAction;
use crate::types::{Position, BOARD_SIZE};

/// Cursor position, clamped to the board edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pos: Position,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

impl Cursor {
    pub fn new() -> Self {
        let mid = BOARD_SIZE / 2;
        Self {
            pos: Position::new(mid, mid),
        }
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn set(&mut self, pos: Position) {
        if pos.in_bounds() {
            self.pos = pos;
        }
    }

    /// Apply an action; returns the cell to tap for [`InputAction::Tap`].
    pub fn apply(&mut self, action: InputAction) -> Option<Position> {
        let Position { row, col } = self.pos;
        let last = BOARD_SIZE - 1;
        match action {
            InputAction::CursorUp => self.pos.row = row.saturating_sub(1),
            InputAction::CursorDown => self.pos.row = (row + 1).min(last),
            InputAction::CursorLeft => self.pos.col = col.saturating_sub(1),
            InputAction::CursorRight => self.pos.col = (col + 1).min(last),
            InputAction::Tap => return Some(self.pos),
            InputAction::Cancel | InputAction::Restart => {}
        }
        None
    }
}
