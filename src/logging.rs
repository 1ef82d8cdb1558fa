//! Log subscriber setup for the binary
//!
//! Filtering follows `RUST_LOG` (default `info`). File output is appended
//! across runs and written without ANSI colours.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// `-` selects stderr, anything else is a file path
    #[must_use]
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            LogTarget::Stderr
        } else {
            LogTarget::File(PathBuf::from(arg))
        }
    }
}

/// Build a fmt subscriber writing to `target`
///
/// # Errors
///
/// Fails if the log file cannot be opened for appending.
pub fn build_subscriber(
    target: &LogTarget,
    filter: EnvFilter,
) -> Result<Box<dyn Subscriber + Send + Sync>> {
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    Ok(match target {
        LogTarget::Stderr => Box::new(builder.with_writer(std::io::stderr).finish()),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Box::new(
                builder
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .finish(),
            )
        }
    })
}

/// Install the global subscriber
///
/// # Errors
///
/// Fails if the log file cannot be opened or a subscriber is already set.
pub fn init_logging(target: &LogTarget) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = build_subscriber(target, filter)?;
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install log subscriber")?;
    Ok(())
}
