//! TUI Match-3 (workspace facade crate).
//!
//! Re-exports the member crates under one name and hosts the pieces shared by
//! both binaries: the JSON-lines event protocol and logging setup.

pub use match3_core as core;
pub use match3_engine as engine;
pub use match3_input as input;
pub use match3_term as term;
pub use match3_types as types;

pub mod logging;
pub mod protocol;
