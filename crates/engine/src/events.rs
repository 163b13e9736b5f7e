//! Events emitted by the resolution engine
//!
//! Events are plain data. The presentation layer drains them after every engine
//! call and decides how long to spend showing each one before asking the engine
//! for the next phase.

use crate::core::{Displacements, MatchSet};
use crate::types::{Position, TileKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Adjacent swap that would not form a run; the board is unchanged.
    InvalidSwap {
        tile_a: TileKind,
        tile_b: TileKind,
        pos_a: Position,
        pos_b: Position,
    },
    /// Swap committed. `tile_a` started at `pos_a` and now sits at `pos_b`.
    ValidSwap {
        tile_a: TileKind,
        tile_b: TileKind,
        pos_a: Position,
        pos_b: Position,
        matches: MatchSet,
    },
    /// Matched cells about to be removed; the score already includes `score_delta`.
    Clear {
        matches: MatchSet,
        chain: u32,
        score_delta: u32,
    },
    /// Result of one gravity pass.
    Fall { displacements: Displacements },
    /// The board is quiescent again and the move has been paid for.
    MoveResolved {
        final_score: u32,
        moves_remaining: u32,
    },
    /// The move budget is exhausted.
    GameOver { final_score: u32 },
}

impl EngineEvent {
    /// Stable snake_case name (used by logs and the JSON protocol)
    pub fn name(&self) -> &'static str {
        match self {
            EngineEvent::InvalidSwap { .. } => "invalid_swap",
            EngineEvent::ValidSwap { .. } => "valid_swap",
            EngineEvent::Clear { .. } => "clear",
            EngineEvent::Fall { .. } => "fall",
            EngineEvent::MoveResolved { .. } => "move_resolved",
            EngineEvent::GameOver { .. } => "game_over",
        }
    }
}
