//! Match resolution engine
//!
//! Drives one move from swap to quiescence as a sequence of explicit phases and
//! reports what happened as [`EngineEvent`]s. The engine does no timing; callers
//! decide when to [`advance`](ResolutionEngine::advance).
//!
//! ```
//! use match3_engine::{GameSession, Phase};
//! use match3_engine::planner::best_swap;
//!
//! let mut session = GameSession::new(2024, 30);
//! if let Some(swap) = best_swap(session.board()) {
//!     session.select_cell(swap.a);
//!     session.select_cell(swap.b);
//!     session.resolve();
//!     assert_eq!(session.moves_remaining(), 29);
//! }
//! assert_eq!(session.phase(), Phase::Idle);
//! ```

pub mod config;
pub mod engine;
pub mod events;
pub mod planner;
pub mod session;
pub mod snapshot;

pub use match3_core as core;
pub use match3_types as types;

pub use config::{ConfigError, GameConfig};
pub use engine::{Phase, ResolutionEngine, Step, SwapOutcome};
pub use events::EngineEvent;
pub use session::{GameSession, TapOutcome};
pub use snapshot::{board_hash, GameSnapshot};
