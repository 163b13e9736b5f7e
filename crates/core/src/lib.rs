//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the board, the rules for finding and clearing matches and
//! the gravity step. It has **zero dependencies** on UI, timing or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical boards and refills
//! - **Testable**: Every rule is a plain function over a [`Board`]
//! - **Portable**: Runs headless, in the terminal front-end or in benchmarks
//! - **Allocation-free**: Match sets and displacement lists live on the stack
//!
//! # Module Structure
//!
//! - [`board`]: 8x8 grid with bounds-checked access and run-free generation
//! - [`matcher`]: Detection of horizontal and vertical runs of three or more
//! - [`gravity`]: Column compaction and refill with displacement records
//! - [`rng`]: Seeded LCG and scripted tile sources
//! - [`scoring`]: Points per clear step, scaled by cascade depth
//!
//! # Example
//!
//! ```
//! use match3_core::{apply_gravity, find_matches, Board, SimpleRng};
//!
//! let mut rng = SimpleRng::new(12345);
//! let mut board = Board::generate(&mut rng);
//! assert!(find_matches(&board).is_empty());
//!
//! // Nothing to fall on a packed board.
//! assert!(apply_gravity(&mut board, &mut rng).is_empty());
//! ```

pub mod board;
pub mod gravity;
pub mod matcher;
pub mod rng;
pub mod scoring;

pub use match3_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use gravity::{apply_gravity, Displacements};
pub use matcher::{find_matches, has_match, MatchSet};
pub use rng::{ScriptedTiles, SimpleRng, TileSource};
pub use scoring::{clear_score, score_clear, ScoreResult};
