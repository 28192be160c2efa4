//! Logger setup for the terminal binary.
//!
//! The terminal is in raw/alternate-screen mode while playing, so log lines
//! cannot go to stderr. They go to a file, or nowhere.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

/// Route `log` records to `path` (appending). `RUST_LOG` overrides the
/// default `info` filter. Without a path the logger stays uninstalled.
pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("install logger")?;
    Ok(())
}
