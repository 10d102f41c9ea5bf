//! Consumer features subject to redaction.
//!
//! A feature is a named consumer of the redaction engine: a completion
//! source, a hover panel, the file renderer, or an external picker's result
//! list or preview pane. Each can be enabled or disabled independently, and
//! the selection captured at setup time is kept as the restore point for
//! toggle-all.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A named consumer of the redaction engine.
///
/// The set is closed and known at startup; hosts address features by their
/// snake_case name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Completion source entries.
    Completion,
    /// Hover/peek panels.
    Hover,
    /// In-buffer rendering of opened files.
    Files,
    /// Primary picker result list.
    PickerPrimary,
    /// Primary picker preview pane.
    PickerPrimaryPreviewer,
    /// Secondary picker result list.
    PickerSecondary,
    /// Secondary picker preview pane.
    PickerSecondaryPreviewer,
}

impl Feature {
    /// Every feature in the fixed set.
    pub const ALL: [Feature; 7] = [
        Feature::Completion,
        Feature::Hover,
        Feature::Files,
        Feature::PickerPrimary,
        Feature::PickerPrimaryPreviewer,
        Feature::PickerSecondary,
        Feature::PickerSecondaryPreviewer,
    ];

    /// Stable snake_case name of this feature.
    pub fn name(&self) -> &'static str {
        match self {
            Feature::Completion => "completion",
            Feature::Hover => "hover",
            Feature::Files => "files",
            Feature::PickerPrimary => "picker_primary",
            Feature::PickerPrimaryPreviewer => "picker_primary_previewer",
            Feature::PickerSecondary => "picker_secondary",
            Feature::PickerSecondaryPreviewer => "picker_secondary_previewer",
        }
    }

    /// Names of every feature in the fixed set.
    pub fn names() -> [&'static str; 7] {
        Self::ALL.map(|f| f.name())
    }

    /// Parse a feature from its name.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "completion" => Some(Feature::Completion),
            "hover" => Some(Feature::Hover),
            "files" => Some(Feature::Files),
            "picker_primary" => Some(Feature::PickerPrimary),
            "picker_primary_previewer" => Some(Feature::PickerPrimaryPreviewer),
            "picker_secondary" => Some(Feature::PickerSecondary),
            "picker_secondary_previewer" => Some(Feature::PickerSecondaryPreviewer),
            _ => None,
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Result of a toggle-all request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// At least one feature was on; every feature is now off.
    AllDisabled,
    /// Nothing was on; the startup snapshot was restored.
    Restored,
}

/// Per-feature enablement plus the startup snapshot kept for restore.
///
/// `configure` is called exactly once at setup and writes the snapshot;
/// later changes go through `set`/`set_all`/`toggle_all` and never touch
/// the snapshot.
#[derive(Debug, Clone, Default)]
pub struct FeatureState {
    enabled: BTreeMap<Feature, bool>,
    initial: BTreeMap<Feature, bool>,
}

impl FeatureState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the current and initial enablement from the setup-time flags.
    ///
    /// Features missing from `flags` default to enabled: redaction is opt
    /// out, not opt in.
    pub fn configure(&mut self, flags: &BTreeMap<Feature, bool>) {
        let normalized = normalize(flags);
        self.enabled = normalized.clone();
        self.initial = normalized;
    }

    /// Updates one feature without touching the startup snapshot.
    pub fn set(&mut self, feature: Feature, enabled: bool) {
        self.enabled.insert(feature, enabled);
    }

    /// Applies `enabled` to every feature in the fixed set.
    pub fn set_all(&mut self, enabled: bool) {
        for feature in Feature::ALL {
            self.enabled.insert(feature, enabled);
        }
    }

    /// Disables everything if anything is on; otherwise restores the
    /// startup snapshot.
    ///
    /// The toggle is deliberately asymmetric: turning redaction back on
    /// recovers the user's per-feature selection instead of enabling
    /// features that were never wanted.
    pub fn toggle_all(&mut self) -> ToggleOutcome {
        if self.any_enabled() {
            self.set_all(false);
            ToggleOutcome::AllDisabled
        } else {
            self.enabled = self.initial.clone();
            ToggleOutcome::Restored
        }
    }

    /// Whether redaction is on for `feature`. Total: an unconfigured state
    /// answers `false` instead of failing.
    pub fn is_enabled(&self, feature: Feature) -> bool {
        self.enabled.get(&feature).copied().unwrap_or(false)
    }

    /// Whether any feature is currently enabled.
    pub fn any_enabled(&self) -> bool {
        self.enabled.values().any(|&on| on)
    }

    /// The startup snapshot.
    pub fn initial(&self) -> &BTreeMap<Feature, bool> {
        &self.initial
    }

    /// The current enablement map.
    pub fn enabled(&self) -> &BTreeMap<Feature, bool> {
        &self.enabled
    }
}

/// Fills in the full feature set, defaulting missing entries to enabled.
pub(crate) fn normalize(flags: &BTreeMap<Feature, bool>) -> BTreeMap<Feature, bool> {
    Feature::ALL
        .into_iter()
        .map(|f| (f, flags.get(&f).copied().unwrap_or(true)))
        .collect()
}
