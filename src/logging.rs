//! Diagnostic logging
//!
//! `tracing` events go to `tripspent.log` in the base directory so the TUI's
//! alternate screen is never written over. The filter comes from `RUST_LOG`
//! when set, else from the `log_level` setting.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{Settings, TrackerPaths};
use crate::error::{TrackerError, TrackerResult};

/// Directive used when `RUST_LOG` is absent
pub fn default_directive(settings: &Settings) -> String {
    format!("tripspent={}", settings.log_level)
}

/// Install the global subscriber
///
/// Only the first call in a process installs anything; later calls are
/// no-ops so tests and repeated entry points can call it freely.
pub fn init_logging(paths: &TrackerPaths, settings: &Settings) -> TrackerResult<()> {
    paths.ensure_directories()?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths.diagnostic_log())
        .map_err(|e| TrackerError::Io(format!("Failed to open diagnostic log: {}", e)))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(settings)))
        .map_err(|e| TrackerError::Config(format!("Invalid log level: {}", e)))?;

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(path = %paths.diagnostic_log().display(), "diagnostic logging started");
    }
    Ok(())
}
