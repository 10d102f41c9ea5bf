//! Error types for settings handling.

use thiserror::Error;

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading or storing settings files.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error during settings file operations.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
