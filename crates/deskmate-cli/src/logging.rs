//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins over the configured level. One-shot commands log to
//! stderr; the TUI owns the terminal, so it logs to a file in the config
//! directory instead.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use deskmate_core::Config;
use tracing_subscriber::EnvFilter;

fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level))
}

pub fn init_stderr(config: &Config) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr)
        .init();
}

pub fn init_file(config: &Config) -> Result<()> {
    Config::ensure_config_dir()?;
    let path = config.log_path()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
