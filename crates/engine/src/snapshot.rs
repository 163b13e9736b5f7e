use crate::engine::Phase;
use crate::types::{Position, BOARD_SIZE};

pub type BoardGrid = [[u8; BOARD_SIZE as usize]; BOARD_SIZE as usize];

/// Plain-data copy of everything a front-end needs to draw one frame
///
/// Board cells use `0` for empty and `kind.index() + 1` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: BoardGrid,
    pub board_hash: u64,
    pub score: u32,
    pub moves_remaining: u32,
    pub move_budget: u32,
    pub chain: u32,
    pub phase: Phase,
    pub selection: Option<Position>,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; BOARD_SIZE as usize]; BOARD_SIZE as usize];
        self.board_hash = board_hash(&self.board);
        self.score = 0;
        self.moves_remaining = 0;
        self.move_budget = 0;
        self.chain = 0;
        self.phase = Phase::Idle;
        self.selection = None;
        self.game_over = false;
    }

    /// Accepting taps right now
    pub fn playable(&self) -> bool {
        !self.game_over && self.phase == Phase::Idle
    }

    pub fn cell(&self, pos: Position) -> u8 {
        self.board[pos.row as usize][pos.col as usize]
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[0u8; BOARD_SIZE as usize]; BOARD_SIZE as usize],
            board_hash: 0,
            score: 0,
            moves_remaining: 0,
            move_budget: 0,
            chain: 0,
            phase: Phase::Idle,
            selection: None,
            game_over: false,
        };
        s.clear();
        s
    }
}

/// FNV-1a 64 over the row-major grid
pub fn board_hash(board: &BoardGrid) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for b in board.iter().flat_map(|row| row.iter().copied()) {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}
