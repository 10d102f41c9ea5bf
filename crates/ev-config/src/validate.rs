//! Semantic validation of settings.
//!
//! Nothing in a settings file is fatal: every problem degrades to a safe
//! behavior at runtime (full masking, entry ignored, pattern skipped).
//! Validation reports the degradations so a host can surface them.

use regex::Regex;

use crate::settings::Settings;

/// Kind of a non-fatal settings problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// Partial-mode fields violate the policy invariant; full masking is
    /// used instead.
    MalformedPolicy,

    /// A feature name outside the fixed set; the entry is ignored.
    UnknownFeature,

    /// An env-file pattern that does not compile; the pattern is skipped.
    InvalidPattern,
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueKind::MalformedPolicy => write!(f, "malformed policy"),
            IssueKind::UnknownFeature => write!(f, "unknown feature"),
            IssueKind::InvalidPattern => write!(f, "invalid pattern"),
        }
    }
}

/// A problem found in a settings value, with the runtime fallback already
/// decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// What kind of problem this is.
    pub kind: IssueKind,

    /// Human-readable description including the fallback taken.
    pub message: String,
}

impl ValidationIssue {
    fn new(kind: IssueKind, message: String) -> Self {
        Self { kind, message }
    }
}

/// Check a settings value against the known feature name set.
///
/// `known_features` comes from the consumer crate that owns the feature
/// enum; this crate only sees names.
pub fn validate(settings: &Settings, known_features: &[&str]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if let Some(ref partial) = settings.policy.partial {
        if let Err(err) = partial.validate() {
            issues.push(ValidationIssue::new(
                IssueKind::MalformedPolicy,
                format!("{}; falling back to full masking", err),
            ));
        }
    }

    for name in settings.features.keys() {
        if !known_features.contains(&name.as_str()) {
            issues.push(ValidationIssue::new(
                IssueKind::UnknownFeature,
                format!("unknown feature '{}'; entry ignored", name),
            ));
        }
    }

    for pattern in &settings.env_file_patterns {
        if let Err(err) = Regex::new(pattern) {
            issues.push(ValidationIssue::new(
                IssueKind::InvalidPattern,
                format!("invalid env-file pattern '{}': {}; pattern skipped", pattern, err),
            ));
        }
    }

    issues
}
