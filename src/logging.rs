//! Log setup for the terminal binary.
//!
//! The terminal is in raw mode on the alternate screen while the game runs, so
//! log lines go to a file instead of stderr.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::prelude::*;

use crate::config::RunConfig;

/// Install the global subscriber when a log path is configured.
///
/// Returns whether logging was enabled.
pub fn init(config: &RunConfig) -> Result<bool> {
    let Some(path) = config.log_path.as_ref() else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(config.log_level)
        .try_init()
        .context("installing tracing subscriber")?;

    Ok(true)
}
