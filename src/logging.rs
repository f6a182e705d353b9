//! File-backed tracing setup. Stdout belongs to the terminal UI, so logs never go there.

use crate::error::{AppError, AppResult};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("sel-client.log")
}

/// `RUST_LOG` wins over the configured filter.
pub fn init_logging(path: &Path, fallback_filter: &str) -> AppResult<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback_filter))
        .map_err(|e| AppError::Logging(format!("invalid log filter '{}': {}", fallback_filter, e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}
