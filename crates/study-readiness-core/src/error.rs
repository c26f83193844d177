//! Core error types for study-readiness-core.
//!
//! This module defines the error hierarchy using thiserror. Storage and
//! evaluation failures are kept apart so callers can tell a missing log or a
//! short history (user-facing notices) from a genuine I/O failure.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for study-readiness-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Session log errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Readiness evaluation errors
    #[error("{0}")]
    Evaluation(#[from] EvaluationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// True when the error is an expected outcome that should be shown to the
    /// user as a notice rather than treated as a failure.
    pub fn is_notice(&self) -> bool {
        matches!(self, CoreError::Evaluation(e) if e.is_notice())
    }
}

/// Session log errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open or create the log file
    #[error("Failed to open session log at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a row failed
    #[error("Failed to write session log at {path}: {message}")]
    WriteFailed { path: PathBuf, message: String },

    /// A stored row could not be parsed
    #[error("Malformed row {line} in {path}: {message}")]
    MalformedRow {
        path: PathBuf,
        line: u64,
        message: String,
    },

    /// Removing the log file failed
    #[error("Failed to remove session log at {path}: {source}")]
    RemoveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Readiness evaluation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    /// No session log exists yet
    #[error("No log to evaluate.")]
    StorageUnavailable,

    /// Fewer than two sessions recorded
    #[error("Not enough history to compute a readiness score ({records} session(s) logged, at least 2 needed).")]
    InsufficientHistory { records: usize },
}

impl EvaluationError {
    /// Both variants are terminal notices, not crashes.
    pub fn is_notice(&self) -> bool {
        matches!(
            self,
            EvaluationError::StorageUnavailable | EvaluationError::InsufficientHistory { .. }
        )
    }
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

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// The data directory could not be determined or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Value outside its declared bounds
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Record would break chronological order of the log
    #[error("Session at {timestamp} is older than the last logged session ({last})")]
    OutOfOrder {
        timestamp: chrono::NaiveDateTime,
        last: chrono::NaiveDateTime,
    },
}

impl ValidationError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
