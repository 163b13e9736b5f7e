//! Tracing subscriber setup shared by the binaries.
//!
//! Filtering follows `RUST_LOG` (default `info`). The terminal front-end owns
//! stdout, so it only logs when `MATCH3_LOG` names a file.

use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "MATCH3_LOG";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log to stderr (headless binaries).
pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Log to the file named by `MATCH3_LOG`, if set. Returns the path used.
pub fn init_file_from_env() -> Result<Option<String>> {
    let Ok(path) = std::env::var(LOG_ENV) else {
        return Ok(None);
    };

    let file = File::create(&path).with_context(|| format!("creating log file {path}"))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
    Ok(Some(path))
}
