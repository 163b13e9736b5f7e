//! Scoring module - points for cleared tiles
//!
//! Every cleared tile is worth [`SCORE_PER_TILE`] points, multiplied by
//! `1 + chain` where `chain` is the 0-based cascade depth within the current move.
//! The first clear of a move is chain 0.

use crate::types::SCORE_PER_TILE;

/// Score calculation result for one clear step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub tiles: u32,
    pub chain: u32,
    pub multiplier: u32,
    pub total: u32,
}

/// Points for clearing `tiles` cells at cascade depth `chain`
pub fn clear_score(tiles: usize, chain: u32) -> u32 {
    score_clear(tiles, chain).total
}

/// Detailed breakdown of [`clear_score`]
pub fn score_clear(tiles: usize, chain: u32) -> ScoreResult {
    let tiles = tiles as u32;
    let multiplier = chain.saturating_add(1);
    let total = tiles
        .saturating_mul(SCORE_PER_TILE)
        .saturating_mul(multiplier);

    ScoreResult {
        tiles,
        chain,
        multiplier,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_clear_scores_ten_per_tile() {
        assert_eq!(clear_score(3, 0), 30);
        assert_eq!(clear_score(5, 0), 50);
    }

    #[test]
    fn test_chain_multiplies_score() {
        assert_eq!(clear_score(4, 1), 80);
        assert_eq!(clear_score(3, 2), 90);
    }

    #[test]
    fn test_breakdown() {
        let result = score_clear(6, 3);
        assert_eq!(result.tiles, 6);
        assert_eq!(result.multiplier, 4);
        assert_eq!(result.total, 240);
    }

    #[test]
    fn test_empty_clear_scores_nothing() {
        assert_eq!(clear_score(0, 5), 0);
    }
}
