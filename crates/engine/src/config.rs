//! Game configuration
//!
//! Values come from the environment so that both front-ends can be pinned to a
//! seed without extra flags:
//!
//! - `MATCH3_SEED`: board/refill seed (defaults to a clock-derived value)
//! - `MATCH3_MOVES`: move budget (defaults to 30)

use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::types::DEFAULT_MOVE_BUDGET;

pub const SEED_ENV: &str = "MATCH3_SEED";
pub const MOVES_ENV: &str = "MATCH3_MOVES";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{key} must be an unsigned integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("move budget must be at least 1")]
    ZeroMoveBudget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// `None` picks a seed from the clock at startup.
    pub seed: Option<u32>,
    pub move_budget: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            move_budget: DEFAULT_MOVE_BUDGET,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key/value source (unset keys keep defaults)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();

        if let Some(v) = lookup(SEED_ENV) {
            cfg.seed = Some(parse_u32(SEED_ENV, &v)?);
        }
        if let Some(v) = lookup(MOVES_ENV) {
            cfg.move_budget = parse_u32(MOVES_ENV, &v)?;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_move_budget(mut self, move_budget: u32) -> Self {
        self.move_budget = move_budget;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.move_budget == 0 {
            return Err(ConfigError::ZeroMoveBudget);
        }
        Ok(())
    }

    /// The configured seed, or one derived from the wall clock
    pub fn resolved_seed(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

fn parse_u32(key: &'static str, value: &str) -> Result<u32, ConfigError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| ConfigError::InvalidNumber {
            key,
            value: value.to_string(),
        })
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
