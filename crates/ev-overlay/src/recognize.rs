//! Recognition of secret-bearing file names.
//!
//! The default rule matches the conventional env-file names; user-supplied
//! regexes extend it. Matching happens on the final path component only, so
//! callers can pass either a bare name or a full path.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

/// Default rule: `.env`, `.env.*`, `*.env`.
static DEFAULT_ENV_FILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\.env(\..+)?|.+\.env)$").unwrap());

/// Matches file names against the default env-file rule plus user patterns.
#[derive(Debug, Default)]
pub struct EnvFileMatcher {
    user_patterns: Vec<Regex>,
}

impl EnvFileMatcher {
    /// Compiles user patterns; invalid ones are skipped with a warning, a
    /// broken pattern must not disable recognition as a whole.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let mut user_patterns = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            match Regex::new(pattern) {
                Ok(re) => user_patterns.push(re),
                Err(err) => {
                    warn!("skipping invalid env-file pattern '{}': {}", pattern, err);
                }
            }
        }
        Self { user_patterns }
    }

    /// Whether `file_name` names a secret-bearing file.
    pub fn matches(&self, file_name: &str) -> bool {
        let name = match file_name.rsplit(['/', '\\']).next() {
            Some(name) => name,
            None => file_name,
        };
        DEFAULT_ENV_FILE.is_match(name) || self.user_patterns.iter().any(|re| re.is_match(name))
    }
}
