//! Error types for the overlay engine.

use thiserror::Error;

/// Result type for overlay operations.
pub type Result<T> = std::result::Result<T, OverlayError>;

/// Errors surfaced to the host on explicit user commands.
///
/// Nothing here is fatal: the engine degrades to full masking or skips the
/// offending input instead of interrupting the interaction loop. These
/// variants exist so a mistyped command gets a visible message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OverlayError {
    /// A feature name outside the fixed set.
    #[error("unknown feature: {0}")]
    InvalidFeature(String),

    /// An unrecognized command verb.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}
