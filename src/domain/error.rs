//! Domain error types

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by clipboard operations.
///
/// Probe failures and timeouts are never surfaced through this type; probes
/// resolve to inconclusive values and the caller's fallback chain decides
/// the final outcome.
#[derive(Debug, Clone, Error)]
pub enum ClipboardError {
    #[error("Clipboard backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Failed to read clipboard: {0}")]
    ReadFailed(String),

    #[error("Failed to write clipboard: {0}")]
    WriteFailed(String),

    #[error("Image file not found: {}", .0.display())]
    ImageNotFound(PathBuf),

    #[error("{0} is not supported on this platform")]
    UnsupportedPlatform(&'static str),
}

/// Internal probe execution errors.
///
/// Logged at the probe boundary and flattened to `None`/`false`; never
/// propagated to clipboard operation callers.
#[derive(Debug, Clone, Error)]
pub enum ProbeError {
    #[error("{phase} probe timed out after {limit:?}")]
    Timeout {
        phase: &'static str,
        limit: Duration,
    },

    #[error("{phase} probe failed: {message}")]
    Failed {
        phase: &'static str,
        message: String,
    },
}

/// Error when configuration loading or saving fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
