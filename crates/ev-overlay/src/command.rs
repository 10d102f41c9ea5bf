//! Command surface mapping host verbs onto engine operations.

use crate::error::{OverlayError, Result};
use crate::feature::Feature;
use crate::reveal::DocumentId;

/// A host command addressed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VeilCommand {
    /// Enable redaction for one feature, or for every feature when `None`.
    Enable(Option<Feature>),

    /// Disable redaction for one feature, or for every feature when `None`.
    Disable(Option<Feature>),

    /// Disable everything, or restore the startup snapshot.
    ToggleAll,

    /// Show the real value on one line until the next qualifying
    /// interaction.
    PeekLine { doc: DocumentId, line: usize },
}

/// What a command did, for the host to surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Feature flags changed.
    FeaturesUpdated,

    /// toggle-all disabled every feature.
    AllDisabled,

    /// toggle-all restored the startup snapshot.
    InitialRestored,

    /// A reveal session started.
    Revealed { doc: DocumentId, line: usize },
}

/// Parses an enable/disable/toggle verb with an optional feature argument.
///
/// An unknown feature name is reported back as [`OverlayError::InvalidFeature`]
/// so the host can show it; this is the only error a user command produces.
pub fn parse_command(verb: &str, feature_arg: Option<&str>) -> Result<VeilCommand> {
    let feature = match feature_arg {
        Some(name) => Some(
            Feature::parse_str(name)
                .ok_or_else(|| OverlayError::InvalidFeature(name.to_string()))?,
        ),
        None => None,
    };

    match verb {
        "enable" => Ok(VeilCommand::Enable(feature)),
        "disable" => Ok(VeilCommand::Disable(feature)),
        "toggle" => Ok(VeilCommand::ToggleAll),
        _ => Err(OverlayError::UnknownCommand(verb.to_string())),
    }
}
