//! RNG module - deterministic tile generation
//!
//! Tiles are drawn through the [`TileSource`] trait so the board generator and
//! the gravity refill can be fed either by a seeded LCG (gameplay) or by a fixed
//! script (tests, benchmarks, reproducible scenarios).

use crate::types::{TileKind, TILE_TYPES};

/// Anything that can hand out the next tile kind
pub trait TileSource {
    fn next_tile(&mut self) -> TileKind;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high half of the state; the low bits of a power-of-two LCG
    /// cycle with very short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max
    }

    /// Current internal state (for restarting with the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl TileSource for SimpleRng {
    fn next_tile(&mut self) -> TileKind {
        let index = self.next_range(TILE_TYPES as u32) as u8;
        TileKind::from_index(index).unwrap_or(TileKind::Apple)
    }
}

/// Replays a fixed list of tiles, wrapping around when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedTiles {
    script: Vec<TileKind>,
    cursor: usize,
}

impl ScriptedTiles {
    /// Panics on an empty script.
    pub fn new(script: Vec<TileKind>) -> Self {
        assert!(!script.is_empty(), "tile script must not be empty");
        Self { script, cursor: 0 }
    }

    /// Number of tiles handed out so far
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl TileSource for ScriptedTiles {
    fn next_tile(&mut self) -> TileKind {
        let kind = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        kind
    }
}
