//! The veil engine: one owned controller per process.
//!
//! The engine holds the policy, feature state, reveal tracker, and env-file
//! matcher as a single owned unit: created at setup from [`Settings`],
//! reconfigured wholesale on settings change, dropped when the host unloads
//! the integration. All operations are synchronous; `&mut self` on the
//! mutating ones is the single-writer section a multi-threaded host must
//! serialize behind.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use ev_config::{Settings, ValidationIssue};
use ev_redact::MaskPolicy;

use crate::command::{CommandOutcome, VeilCommand};
use crate::error::Result;
use crate::feature::{normalize, Feature, FeatureState, ToggleOutcome};
use crate::intercept::{PreviewRequest, PreviewVerdict};
use crate::planner::{self, RenderInstruction};
use crate::recognize::EnvFileMatcher;
use crate::reveal::{DocumentId, Interaction, RevealTracker};

/// Supplies current document text to the engine.
pub trait DocumentSource {
    /// Current text of `doc` as ordered lines, or `None` if unknown.
    fn lines(&self, doc: DocumentId) -> Option<Vec<String>>;
}

/// Applies overlay instructions as non-destructive visual replacements.
pub trait OverlaySink {
    /// Applies instructions for one document.
    fn apply(&mut self, doc: DocumentId, instructions: &[RenderInstruction]);

    /// Removes every overlay previously applied to one document.
    fn clear(&mut self, doc: DocumentId);
}

/// Documents longer than this are planned in bounded slices.
const CHUNK_LINES: usize = 200;

/// The redaction controller.
pub struct VeilEngine {
    policy: MaskPolicy,
    features: FeatureState,
    reveal: RevealTracker,
    matcher: EnvFileMatcher,
    generation: u64,
}

impl VeilEngine {
    /// Creates an engine from settings, capturing the startup snapshot.
    ///
    /// Settings problems are logged and degraded, never fatal.
    pub fn new(settings: &Settings) -> Self {
        for issue in Self::validate_settings(settings) {
            warn!("settings: {}", issue.message);
        }

        let mut features = FeatureState::new();
        features.configure(&feature_flags(settings));

        Self {
            policy: settings.policy.clone(),
            features,
            reveal: RevealTracker::new(),
            matcher: EnvFileMatcher::new(&settings.env_file_patterns),
            generation: 0,
        }
    }

    /// Replaces policy, matcher, and feature flags wholesale.
    ///
    /// The startup snapshot is preserved, so toggle-all still restores the
    /// selection from setup time.
    pub fn reconfigure(&mut self, settings: &Settings) {
        for issue in Self::validate_settings(settings) {
            warn!("settings: {}", issue.message);
        }

        self.policy = settings.policy.clone();
        self.matcher = EnvFileMatcher::new(&settings.env_file_patterns);
        for (feature, enabled) in normalize(&feature_flags(settings)) {
            self.features.set(feature, enabled);
        }
        self.bump();
        debug!("engine reconfigured");
    }

    /// Checks settings against this engine's feature set.
    pub fn validate_settings(settings: &Settings) -> Vec<ValidationIssue> {
        ev_config::validate(settings, &Feature::names())
    }

    /// The active masking policy.
    pub fn policy(&self) -> &MaskPolicy {
        &self.policy
    }

    /// Whether redaction is on for `feature`.
    pub fn is_feature_enabled(&self, feature: Feature) -> bool {
        self.features.is_enabled(feature)
    }

    /// Updates one feature flag.
    pub fn set_feature(&mut self, feature: Feature, enabled: bool) {
        self.features.set(feature, enabled);
        self.bump();
    }

    /// Updates one feature flag addressed by name.
    pub fn set_feature_by_name(&mut self, name: &str, enabled: bool) -> Result<()> {
        let feature = Feature::parse_str(name)
            .ok_or_else(|| crate::error::OverlayError::InvalidFeature(name.to_string()))?;
        self.set_feature(feature, enabled);
        Ok(())
    }

    /// Monotonic counter bumped on every state change that invalidates
    /// outstanding overlay state. Hosts compare generations to discard
    /// stale passes.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Feeds one host interaction to the reveal tracker, clearing the
    /// session when it reports the session should end.
    pub fn handle_interaction(&mut self, interaction: &Interaction) {
        if self.reveal.should_end(interaction) {
            self.reveal.clear();
            self.bump();
            debug!("reveal session ended by {:?}", interaction);
        }
    }

    /// Starts a reveal session for one line of one document.
    pub fn reveal_line(&mut self, doc: DocumentId, line: usize) {
        self.reveal.reveal(doc, line);
        self.bump();
        debug!("revealed line {} of {:?}", line, doc);
    }

    /// Executes a parsed host command.
    pub fn execute(&mut self, command: VeilCommand) -> CommandOutcome {
        match command {
            VeilCommand::Enable(Some(feature)) => {
                self.set_feature(feature, true);
                info!("redaction enabled for {}", feature);
                CommandOutcome::FeaturesUpdated
            }
            VeilCommand::Enable(None) => {
                self.features.set_all(true);
                self.bump();
                info!("redaction enabled for all features");
                CommandOutcome::FeaturesUpdated
            }
            VeilCommand::Disable(Some(feature)) => {
                self.set_feature(feature, false);
                info!("redaction disabled for {}", feature);
                CommandOutcome::FeaturesUpdated
            }
            VeilCommand::Disable(None) => {
                self.features.set_all(false);
                self.bump();
                info!("redaction disabled for all features");
                CommandOutcome::FeaturesUpdated
            }
            VeilCommand::ToggleAll => {
                let outcome = self.features.toggle_all();
                self.bump();
                match outcome {
                    ToggleOutcome::AllDisabled => {
                        info!("redaction disabled");
                        CommandOutcome::AllDisabled
                    }
                    ToggleOutcome::Restored => {
                        info!("redaction restored to startup selection");
                        CommandOutcome::InitialRestored
                    }
                }
            }
            VeilCommand::PeekLine { doc, line } => {
                self.reveal_line(doc, line);
                CommandOutcome::Revealed { doc, line }
            }
        }
    }

    /// Plans overlay instructions for a whole document.
    pub fn plan_document<'a, I>(
        &self,
        doc: DocumentId,
        lines: I,
        feature: Feature,
    ) -> Vec<RenderInstruction>
    where
        I: IntoIterator<Item = &'a str>,
    {
        planner::plan(lines, &self.policy, feature, &self.features, &self.reveal, doc)
    }

    /// Plans overlay instructions for a bounded slice of a document,
    /// starting at 1-based line `first_line`.
    pub fn plan_chunk<'a, I>(
        &self,
        doc: DocumentId,
        lines: I,
        first_line: usize,
        feature: Feature,
    ) -> Vec<RenderInstruction>
    where
        I: IntoIterator<Item = &'a str>,
    {
        planner::plan_slice(
            lines,
            first_line,
            &self.policy,
            feature,
            &self.features,
            &self.reveal,
            doc,
        )
    }

    /// Recomputes and applies the overlay for one document.
    ///
    /// The full plan is computed (in bounded slices for large documents)
    /// before the sink sees anything, then applied as clear-plus-apply in
    /// one step: a pass is never visible half-applied. Returns `false` when
    /// the source does not know the document.
    pub fn redraw<S, O>(
        &mut self,
        doc: DocumentId,
        source: &S,
        sink: &mut O,
        feature: Feature,
    ) -> bool
    where
        S: DocumentSource + ?Sized,
        O: OverlaySink + ?Sized,
    {
        // a redraw of a different document ends any session elsewhere
        if let Some((session_doc, _)) = self.reveal.session() {
            if session_doc != doc {
                self.reveal.clear();
                self.bump();
                debug!("reveal session ended by redraw of {:?}", doc);
            }
        }

        let lines = match source.lines(doc) {
            Some(lines) => lines,
            None => return false,
        };

        let mut instructions = Vec::new();
        let mut start = 0;
        while start < lines.len() {
            let end = (start + CHUNK_LINES).min(lines.len());
            instructions.extend(planner::plan_slice(
                lines[start..end].iter().map(String::as_str),
                start + 1,
                &self.policy,
                feature,
                &self.features,
                &self.reveal,
                doc,
            ));
            start = end;
        }

        sink.clear(doc);
        sink.apply(doc, &instructions);
        true
    }

    /// Answers a foreign preview pipeline's redaction query.
    ///
    /// Reveal sessions never apply to foreign previews; the plan runs
    /// against an idle tracker.
    pub fn intercept_preview(&self, request: &PreviewRequest<'_>) -> PreviewVerdict {
        if !self.features.is_enabled(request.feature) {
            return PreviewVerdict::NotApplicable;
        }
        if !self.matcher.matches(request.file_name) {
            return PreviewVerdict::NotApplicable;
        }

        let idle = RevealTracker::new();
        let instructions = planner::plan(
            request.text.lines(),
            &self.policy,
            request.feature,
            &self.features,
            &idle,
            DocumentId(0),
        );
        PreviewVerdict::Redact(instructions)
    }

    fn bump(&mut self) {
        self.generation += 1;
    }
}

/// Maps settings feature names onto the fixed set, dropping unknown names
/// with a warning.
fn feature_flags(settings: &Settings) -> BTreeMap<Feature, bool> {
    let mut flags = BTreeMap::new();
    for (name, enabled) in &settings.features {
        match Feature::parse_str(name) {
            Some(feature) => {
                flags.insert(feature, *enabled);
            }
            None => warn!("ignoring unknown feature '{}' in settings", name),
        }
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::OverlayStyle;

    const DOC: DocumentId = DocumentId(1);

    fn engine() -> VeilEngine {
        VeilEngine::new(&Settings::default())
    }

    #[test]
    fn test_new_engine_enables_all_features() {
        let engine = engine();
        for feature in Feature::ALL {
            assert!(engine.is_feature_enabled(feature));
        }
    }

    #[test]
    fn test_settings_flags_apply_at_setup() {
        let mut settings = Settings::default();
        settings.features.insert("hover".to_string(), false);
        settings.features.insert("bogus".to_string(), true);

        let engine = VeilEngine::new(&settings);
        assert!(!engine.is_feature_enabled(Feature::Hover));
        assert!(engine.is_feature_enabled(Feature::Files));
    }

    #[test]
    fn test_set_feature_by_name_rejects_unknown() {
        let mut engine = engine();
        assert!(engine.set_feature_by_name("files", false).is_ok());
        assert!(!engine.is_feature_enabled(Feature::Files));
        assert!(engine.set_feature_by_name("telepathy", true).is_err());
    }

    #[test]
    fn test_generation_bumps_on_state_changes() {
        let mut engine = engine();
        let g0 = engine.generation();

        engine.reveal_line(DOC, 3);
        let g1 = engine.generation();
        assert!(g1 > g0);

        engine.execute(VeilCommand::ToggleAll);
        assert!(engine.generation() > g1);
    }

    #[test]
    fn test_interaction_on_other_line_clears_reveal() {
        let mut engine = engine();
        engine.reveal_line(DOC, 3);

        let plan = engine.plan_document(DOC, ["A=1", "B=2", "C=3"], Feature::Files);
        assert_eq!(plan[2].style, OverlayStyle::Revealed);

        engine.handle_interaction(&Interaction::CursorMoved { doc: DOC, line: 5 });
        let plan = engine.plan_document(DOC, ["A=1", "B=2", "C=3"], Feature::Files);
        assert!(plan.iter().all(|i| i.style == OverlayStyle::Masked));
    }

    #[test]
    fn test_toggle_all_round_trip_restores_snapshot() {
        let mut settings = Settings::default();
        settings.features.insert("picker_primary".to_string(), false);
        let mut engine = VeilEngine::new(&settings);

        assert_eq!(engine.execute(VeilCommand::ToggleAll), CommandOutcome::AllDisabled);
        assert!(!engine.is_feature_enabled(Feature::Files));

        assert_eq!(
            engine.execute(VeilCommand::ToggleAll),
            CommandOutcome::InitialRestored
        );
        assert!(engine.is_feature_enabled(Feature::Files));
        assert!(!engine.is_feature_enabled(Feature::PickerPrimary));
    }

    #[test]
    fn test_reconfigure_replaces_policy_but_keeps_snapshot() {
        let mut settings = Settings::default();
        settings.features.insert("hover".to_string(), false);
        let mut engine = VeilEngine::new(&settings);

        let mut updated = Settings::default();
        updated.policy = MaskPolicy::full('#');
        engine.reconfigure(&updated);

        assert_eq!(engine.policy().mask_char, '#');
        // hover re-enabled by the new settings (absent = enabled)
        assert!(engine.is_feature_enabled(Feature::Hover));

        // but the startup snapshot still wins on restore
        engine.execute(VeilCommand::ToggleAll);
        engine.execute(VeilCommand::ToggleAll);
        assert!(!engine.is_feature_enabled(Feature::Hover));
    }

    #[test]
    fn test_preview_interception_requires_recognized_file() {
        let engine = engine();

        let verdict = engine.intercept_preview(&PreviewRequest {
            file_name: "notes.txt",
            text: "TOKEN=abc123",
            feature: Feature::PickerPrimaryPreviewer,
        });
        assert_eq!(verdict, PreviewVerdict::NotApplicable);

        let verdict = engine.intercept_preview(&PreviewRequest {
            file_name: ".env",
            text: "TOKEN=abc123",
            feature: Feature::PickerPrimaryPreviewer,
        });
        let instructions = verdict.instructions().unwrap();
        assert_eq!(instructions.len(), 1);
        assert_eq!(instructions[0].text, "******");
    }

    #[test]
    fn test_preview_interception_respects_feature_flag() {
        let mut engine = engine();
        engine.set_feature(Feature::PickerSecondaryPreviewer, false);

        let verdict = engine.intercept_preview(&PreviewRequest {
            file_name: ".env",
            text: "TOKEN=abc123",
            feature: Feature::PickerSecondaryPreviewer,
        });
        assert_eq!(verdict, PreviewVerdict::NotApplicable);
    }

    #[test]
    fn test_preview_never_honors_reveal_sessions() {
        let mut engine = engine();
        engine.reveal_line(DocumentId(0), 1);

        let verdict = engine.intercept_preview(&PreviewRequest {
            file_name: ".env",
            text: "TOKEN=abc123",
            feature: Feature::Files,
        });
        let instructions = verdict.instructions().unwrap();
        assert_eq!(instructions[0].style, OverlayStyle::Masked);
    }
}
