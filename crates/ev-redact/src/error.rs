//! Error types for the redactor.

use thiserror::Error;

/// Result type for redactor operations.
pub type Result<T> = std::result::Result<T, RedactError>;

/// Errors that can occur while validating a mask policy.
///
/// Nothing here is fatal to a host: a malformed policy degrades to full
/// masking, so the worst case is a value hidden more aggressively than
/// configured, never one shown in the clear.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RedactError {
    /// Partial-mode numeric fields violate the policy invariant.
    #[error("malformed policy: {0}")]
    MalformedPolicy(String),
}
