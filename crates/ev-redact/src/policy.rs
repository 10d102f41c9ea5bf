//! Mask policy configuration.
//!
//! A [`MaskPolicy`] describes how much of a secret value is hidden: the
//! display character used for hidden positions and, optionally, a
//! partial-reveal shape that leaves a few leading and trailing characters
//! visible.

use serde::{Deserialize, Serialize};

use crate::error::{RedactError, Result};

/// Policy describing how a secret value is masked for display.
///
/// A policy is immutable once constructed. Reconfiguration replaces the
/// whole value; nothing mutates a policy in place while redaction is
/// running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskPolicy {
    /// Display character substituted for every hidden character.
    #[serde(default = "default_mask_char")]
    pub mask_char: char,

    /// Partial-reveal shape. `None` masks the whole value.
    #[serde(default)]
    pub partial: Option<PartialMask>,
}

fn default_mask_char() -> char {
    '*'
}

impl MaskPolicy {
    /// Policy that masks every character of every value.
    pub fn full(mask_char: char) -> Self {
        Self {
            mask_char,
            partial: None,
        }
    }

    /// Policy with a partial-reveal shape.
    pub fn with_partial(mask_char: char, partial: PartialMask) -> Self {
        Self {
            mask_char,
            partial: Some(partial),
        }
    }

    /// The partial shape, if present and well-formed.
    ///
    /// A malformed shape is treated as absent, so callers fall back to full
    /// masking rather than failing.
    pub fn effective_partial(&self) -> Option<&PartialMask> {
        self.partial.as_ref().filter(|p| p.validate().is_ok())
    }
}

impl Default for MaskPolicy {
    fn default() -> Self {
        Self::full(default_mask_char())
    }
}

/// Shape of a partially revealed value: visible edges plus a minimum run of
/// mask characters in the middle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialMask {
    /// Characters left visible at the start of the value.
    #[serde(default = "default_show")]
    pub show_start: u32,

    /// Characters left visible at the end of the value.
    #[serde(default = "default_show")]
    pub show_end: u32,

    /// Minimum number of mask characters between the visible edges.
    #[serde(default = "default_show")]
    pub min_mask: u32,
}

fn default_show() -> u32 {
    3
}

impl PartialMask {
    /// Checks the policy invariant: at least one character must stay hidden.
    pub fn validate(&self) -> Result<()> {
        if self.min_mask == 0 {
            return Err(RedactError::MalformedPolicy(
                "min_mask must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PartialMask {
    fn default() -> Self {
        Self {
            show_start: default_show(),
            show_end: default_show(),
            min_mask: default_show(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_full_masking() {
        let policy = MaskPolicy::default();
        assert_eq!(policy.mask_char, '*');
        assert!(policy.partial.is_none());
    }

    #[test]
    fn test_partial_defaults() {
        let partial = PartialMask::default();
        assert_eq!(partial.show_start, 3);
        assert_eq!(partial.show_end, 3);
        assert_eq!(partial.min_mask, 3);
        assert!(partial.validate().is_ok());
    }

    #[test]
    fn test_zero_min_mask_is_malformed() {
        let partial = PartialMask {
            show_start: 3,
            show_end: 3,
            min_mask: 0,
        };
        assert!(matches!(
            partial.validate(),
            Err(RedactError::MalformedPolicy(_))
        ));
    }

    #[test]
    fn test_effective_partial_hides_malformed_shape() {
        let policy = MaskPolicy::with_partial(
            '*',
            PartialMask {
                show_start: 1,
                show_end: 1,
                min_mask: 0,
            },
        );
        assert!(policy.effective_partial().is_none());

        let policy = MaskPolicy::with_partial('*', PartialMask::default());
        assert!(policy.effective_partial().is_some());
    }

    #[test]
    fn test_policy_serde_round_trip() {
        let policy = MaskPolicy::with_partial(
            '#',
            PartialMask {
                show_start: 2,
                show_end: 4,
                min_mask: 5,
            },
        );
        let json = serde_json::to_string(&policy).unwrap();
        let parsed: MaskPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, policy);
    }

    #[test]
    fn test_policy_deserializes_from_empty_object() {
        let policy: MaskPolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(policy, MaskPolicy::default());
    }

    #[test]
    fn test_partial_field_defaults_fill_in() {
        let policy: MaskPolicy =
            serde_json::from_str(r#"{"partial": {"show_start": 1}}"#).unwrap();
        let partial = policy.partial.unwrap();
        assert_eq!(partial.show_start, 1);
        assert_eq!(partial.show_end, 3);
        assert_eq!(partial.min_mask, 3);
    }
}
