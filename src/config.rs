//! Runtime configuration from environment variables.
//!
//! | Variable            | Meaning                                   | Default        |
//! |---------------------|-------------------------------------------|----------------|
//! | `TRIFALL_SEED`      | piece generator seed (u64)                | OS entropy     |
//! | `TRIFALL_MODE`      | `human` or `ai`; starts a game at launch  | stay idle      |
//! | `TRIFALL_TICK_MS`   | main loop tick in milliseconds (> 0)      | `TICK_MS`      |
//! | `TRIFALL_LOG_PATH`  | log file; logging is off when unset       | unset          |
//! | `TRIFALL_LOG_LEVEL` | `error`..`trace`, or `off`                | `info`         |
//!
//! Unparseable values fall back to the default.

use std::env;
use std::path::PathBuf;

use tracing::level_filters::LevelFilter;

use crate::types::{GameMode, TICK_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub seed: Option<u64>,
    pub mode: Option<GameMode>,
    pub tick_ms: u32,
    pub log_path: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            mode: None,
            tick_ms: TICK_MS,
            log_path: None,
            log_level: LevelFilter::INFO,
        }
    }
}

impl RunConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup (the process environment in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = var("TRIFALL_SEED").and_then(|s| s.parse().ok());
        let mode = var("TRIFALL_MODE").and_then(|s| GameMode::from_str(&s));
        let tick_ms = var("TRIFALL_TICK_MS")
            .and_then(|s| s.parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(TICK_MS);
        let log_path = var("TRIFALL_LOG_PATH").map(PathBuf::from);
        let log_level = var("TRIFALL_LOG_LEVEL")
            .and_then(|s| s.parse().ok())
            .unwrap_or(LevelFilter::INFO);

        Self {
            seed,
            mode,
            tick_ms,
            log_path,
            log_level,
        }
    }
}
