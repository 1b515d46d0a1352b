//! Core error types for taskflow-core.
//!
//! Timeline validation failures live in [`TimelineError`]; the config layer
//! and the CLI work with the umbrella [`CoreError`].

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Core error type for taskflow-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Timeline engine errors
    #[error("Timeline error: {0}")]
    Timeline(#[from] TimelineError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation failures raised by the timeline engine.
///
/// Every variant is a deterministic rejection of malformed input. Nothing is
/// retried and nothing is clamped on the caller's behalf.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimelineError {
    /// An interval ends before it starts
    #[error("Invalid interval '{label}': end ({end}) precedes start ({start})")]
    InvalidInterval {
        label: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// A window does not have a strictly positive span
    #[error("Invalid window: end ({end}) must be greater than start ({start})")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// Date arithmetic left the representable range
    #[error("Date out of range while computing {what}")]
    OutOfRange { what: &'static str },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Home/config directory could not be prepared
    #[error("Configuration directory unavailable: {0}")]
    NoConfigDir(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
