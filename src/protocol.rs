//! Protocol module - JSON-lines encoding of engine events
//!
//! Every line is one object with a `type` tag and a monotonically increasing
//! `seq`. Tiles are lowercase names, positions are `{ "row", "col" }` objects.
//!
//! ```text
//! {"seq":1,"type":"valid_swap","tile_a":"apple","tile_b":"cake",...}
//! {"seq":2,"type":"clear","matches":[{"row":5,"col":3},...],"chain":0,"score_delta":30}
//! ```

use serde::{Deserialize, Serialize};

use crate::core::MatchSet;
use crate::engine::EngineEvent;
use crate::types::{Displacement, Position, TileKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKindLower {
    Apple,
    Pizza,
    Sushi,
    Burger,
    Cake,
}

impl From<TileKind> for TileKindLower {
    fn from(kind: TileKind) -> Self {
        match kind {
            TileKind::Apple => TileKindLower::Apple,
            TileKind::Pizza => TileKindLower::Pizza,
            TileKind::Sushi => TileKindLower::Sushi,
            TileKind::Burger => TileKindLower::Burger,
            TileKind::Cake => TileKindLower::Cake,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl From<Position> for Pos {
    fn from(p: Position) -> Self {
        Self { row: p.row, col: p.col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub kind: TileKindLower,
    /// Negative for tiles entering from above the board.
    pub from_row: i8,
    pub from_col: u8,
    pub to_row: u8,
    pub to_col: u8,
    pub is_new: bool,
}

impl From<&Displacement> for Move {
    fn from(d: &Displacement) -> Self {
        Self {
            kind: d.kind.into(),
            from_row: d.from_row,
            from_col: d.from_col,
            to_row: d.to_row,
            to_col: d.to_col,
            is_new: d.is_new,
        }
    }
}

/// End-of-game report from the autoplay driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub seed: u32,
    pub score: u32,
    pub moves_used: u32,
    pub moves_remaining: u32,
    pub game_over: bool,
    /// Play stopped because no valid swap was left.
    pub dead_board: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventBody {
    InvalidSwap {
        tile_a: TileKindLower,
        tile_b: TileKindLower,
        pos_a: Pos,
        pos_b: Pos,
    },
    ValidSwap {
        tile_a: TileKindLower,
        tile_b: TileKindLower,
        pos_a: Pos,
        pos_b: Pos,
        matches: Vec<Pos>,
    },
    Clear {
        matches: Vec<Pos>,
        chain: u32,
        score_delta: u32,
    },
    Fall {
        displacements: Vec<Move>,
    },
    MoveResolved {
        final_score: u32,
        moves_remaining: u32,
    },
    GameOver {
        final_score: u32,
    },
    Summary(Summary),
}

fn positions(matches: &MatchSet) -> Vec<Pos> {
    matches.iter().map(Pos::from).collect()
}

impl From<&EngineEvent> for EventBody {
    fn from(event: &EngineEvent) -> Self {
        match event {
            EngineEvent::InvalidSwap {
                tile_a,
                tile_b,
                pos_a,
                pos_b,
            } => EventBody::InvalidSwap {
                tile_a: (*tile_a).into(),
                tile_b: (*tile_b).into(),
                pos_a: (*pos_a).into(),
                pos_b: (*pos_b).into(),
            },
            EngineEvent::ValidSwap {
                tile_a,
                tile_b,
                pos_a,
                pos_b,
                matches,
            } => EventBody::ValidSwap {
                tile_a: (*tile_a).into(),
                tile_b: (*tile_b).into(),
                pos_a: (*pos_a).into(),
                pos_b: (*pos_b).into(),
                matches: positions(matches),
            },
            EngineEvent::Clear {
                matches,
                chain,
                score_delta,
            } => EventBody::Clear {
                matches: positions(matches),
                chain: *chain,
                score_delta: *score_delta,
            },
            EngineEvent::Fall { displacements } => EventBody::Fall {
                displacements: displacements.iter().map(Move::from).collect(),
            },
            EngineEvent::MoveResolved {
                final_score,
                moves_remaining,
            } => EventBody::MoveResolved {
                final_score: *final_score,
                moves_remaining: *moves_remaining,
            },
            EngineEvent::GameOver { final_score } => EventBody::GameOver {
                final_score: *final_score,
            },
        }
    }
}

/// One output line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLine {
    pub seq: u64,
    #[serde(flatten)]
    pub body: EventBody,
}

/// Numbers lines as they are written.
#[derive(Debug, Default)]
pub struct EventEncoder {
    next_seq: u64,
}

impl EventEncoder {
    pub fn new() -> Self {
        Self { next_seq: 1 }
    }

    pub fn encode(&mut self, body: EventBody) -> serde_json::Result<String> {
        let seq = self.next_seq.max(1);
        self.next_seq = seq + 1;
        serde_json::to_string(&EventLine { seq, body })
    }

    pub fn encode_event(&mut self, event: &EngineEvent) -> serde_json::Result<String> {
        self.encode(EventBody::from(event))
    }
}

pub fn parse_line(line: &str) -> serde_json::Result<EventLine> {
    serde_json::from_str(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_starts_at_one() {
        let mut enc = EventEncoder::new();
        let a = enc.encode(EventBody::GameOver { final_score: 5 }).unwrap();
        let b = enc.encode(EventBody::GameOver { final_score: 5 }).unwrap();
        assert!(a.starts_with("{\"seq\":1,"));
        assert!(b.starts_with("{\"seq\":2,"));
    }

    #[test]
    fn test_invalid_swap_shape() {
        let event = EngineEvent::InvalidSwap {
            tile_a: TileKind::Apple,
            tile_b: TileKind::Burger,
            pos_a: Position::new(0, 1),
            pos_b: Position::new(0, 2),
        };
        let line = EventEncoder::new().encode_event(&event).unwrap();
        let v: serde_json::Value = serde_json::from_str(&line).unwrap();

        assert_eq!(v["type"], "invalid_swap");
        assert_eq!(v["tile_a"], "apple");
        assert_eq!(v["tile_b"], "burger");
        assert_eq!(v["pos_b"]["col"], 2);
    }
}
