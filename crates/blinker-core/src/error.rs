//! Core error types for blinker-core.
//!
//! A small thiserror hierarchy: input validation failures are kept apart
//! from configuration failures so the control surface can tell the user
//! what to fix without treating it as an internal error. File and TOML
//! failures are reported as [`ConfigError`] with the offending path.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for blinker-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Config directory could not be resolved or created
    #[error("Config directory unavailable: {0}")]
    DirUnavailable(String),
}

/// Validation errors for user-supplied cycle durations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field left blank
    #[error("'{field}' is empty; please fill all time fields")]
    Empty { field: String },

    /// Not a number
    #[error("Invalid number format for '{field}': {value:?}")]
    NotANumber { field: String, value: String },

    /// Must be strictly positive
    #[error("'{field}' must be positive, got {value}")]
    NotPositive { field: String, value: i64 },

    /// Must not be negative
    #[error("'{field}' must not be negative, got {value}")]
    Negative { field: String, value: i64 },

    /// Too large to represent
    #[error("'{field}' is out of range: {value:?}")]
    OutOfRange { field: String, value: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
