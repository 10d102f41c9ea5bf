//! Settings model for the envveil engine.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use ev_redact::MaskPolicy;

use crate::error::Result;

/// Schema version for the settings file.
pub const SETTINGS_SCHEMA_VERSION: &str = "1.0.0";

/// Top-level engine settings.
///
/// Every field is defaulted, so an empty JSON object is a valid settings
/// file. Features absent from `features` are treated as enabled: users list
/// only the consumers they want to exempt from redaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Masking policy applied to every redacted value.
    #[serde(default)]
    pub policy: MaskPolicy,

    /// Initial per-feature enablement, keyed by feature name.
    #[serde(default)]
    pub features: BTreeMap<String, bool>,

    /// Extra file-name regexes recognized as secret-bearing files, on top
    /// of the built-in `.env` rule.
    #[serde(default)]
    pub env_file_patterns: Vec<String>,
}

fn default_schema_version() -> String {
    SETTINGS_SCHEMA_VERSION.to_string()
}

impl Settings {
    /// Load settings from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Save settings to a JSON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            policy: MaskPolicy::default(),
            features: BTreeMap::new(),
            env_file_patterns: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.schema_version, SETTINGS_SCHEMA_VERSION);
        assert_eq!(settings.policy, MaskPolicy::default());
        assert!(settings.features.is_empty());
        assert!(settings.env_file_patterns.is_empty());
    }

    #[test]
    fn test_empty_object_is_valid_settings() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_settings_serde_round_trip() {
        let mut settings = Settings::default();
        settings.features.insert("completion".to_string(), false);
        settings
            .env_file_patterns
            .push(r"^secrets\.conf$".to_string());

        let json = serde_json::to_string_pretty(&settings).unwrap();
        let parsed: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_partial_policy_in_settings() {
        let settings: Settings = serde_json::from_str(
            r##"{"policy": {"mask_char": "#", "partial": {"show_start": 2, "show_end": 2, "min_mask": 4}}}"##,
        )
        .unwrap();
        assert_eq!(settings.policy.mask_char, '#');
        let partial = settings.policy.partial.unwrap();
        assert_eq!(partial.show_start, 2);
        assert_eq!(partial.min_mask, 4);
    }
}
