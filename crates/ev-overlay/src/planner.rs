//! Overlay planning: document text to render instructions.
//!
//! A plan is a pure function of document content, policy, feature state,
//! and reveal state at the moment of computation. Plans are recomputed
//! wholesale on every redraw; instructions carry no identity and are never
//! patched incrementally. Redaction correctness after arbitrary edits
//! matters more here than incremental-update performance, and documents in
//! scope are small.

use serde::{Deserialize, Serialize};

use ev_redact::{mask_token, requote, MaskPolicy};

use crate::feature::{Feature, FeatureState};
use crate::parser::parse_line;
use crate::reveal::{DocumentId, RevealTracker};

/// Display style for one overlay instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayStyle {
    /// The value is hidden behind mask characters.
    Masked,
    /// The value is temporarily shown by an active reveal session.
    Revealed,
}

/// One non-destructive visual replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderInstruction {
    /// 1-based document line.
    pub line: usize,

    /// Byte column where the replacement text starts.
    pub start_column: usize,

    /// Replacement text shown over the value.
    pub text: String,

    /// Style tag the host maps to a display style.
    pub style: OverlayStyle,
}

/// Plans overlay instructions for a whole document.
///
/// A disabled feature produces an empty plan: the real values stand because
/// redaction for that consumer is off.
pub fn plan<'a, I>(
    lines: I,
    policy: &MaskPolicy,
    feature: Feature,
    state: &FeatureState,
    reveal: &RevealTracker,
    doc: DocumentId,
) -> Vec<RenderInstruction>
where
    I: IntoIterator<Item = &'a str>,
{
    plan_slice(lines, 1, policy, feature, state, reveal, doc)
}

/// Plans overlay instructions for a bounded slice of lines.
///
/// `first_line` is the 1-based document index of the first element of
/// `lines`. Slices from different chunks are independent and may be planned
/// in any order; a line is never split across chunks, so all instructions
/// for one line come from one call.
pub fn plan_slice<'a, I>(
    lines: I,
    first_line: usize,
    policy: &MaskPolicy,
    feature: Feature,
    state: &FeatureState,
    reveal: &RevealTracker,
    doc: DocumentId,
) -> Vec<RenderInstruction>
where
    I: IntoIterator<Item = &'a str>,
{
    if !state.is_enabled(feature) {
        return Vec::new();
    }

    let mut instructions = Vec::new();
    for (i, line) in lines.into_iter().enumerate() {
        let index = first_line + i;
        let parsed = match parse_line(line) {
            Some(parsed) => parsed,
            None => continue,
        };

        let revealed = reveal.is_revealed(doc, index);
        let text = if revealed {
            requote(&parsed.raw_value, parsed.quote)
        } else {
            mask_token(&parsed.raw_value, parsed.quote, policy)
        };
        if text.is_empty() {
            continue;
        }

        instructions.push(RenderInstruction {
            line: index,
            start_column: parsed.value_offset,
            text,
            style: if revealed {
                OverlayStyle::Revealed
            } else {
                OverlayStyle::Masked
            },
        });
    }
    instructions
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    const DOC: DocumentId = DocumentId(1);

    fn all_enabled() -> FeatureState {
        let mut state = FeatureState::new();
        state.configure(&BTreeMap::new());
        state
    }

    fn plan_all(lines: &[&str], policy: &MaskPolicy, reveal: &RevealTracker) -> Vec<RenderInstruction> {
        plan(
            lines.iter().copied(),
            policy,
            Feature::Files,
            &all_enabled(),
            reveal,
            DOC,
        )
    }

    #[test]
    fn test_plain_document_masks_values_in_place() {
        let lines = ["DB_HOST=localhost", "", "# comment", "DB_PORT=5432"];
        let instructions = plan_all(&lines, &MaskPolicy::default(), &RevealTracker::new());

        assert_eq!(instructions.len(), 2);

        assert_eq!(instructions[0].line, 1);
        assert_eq!(instructions[0].start_column, 8);
        assert_eq!(instructions[0].text, "*********");
        assert_eq!(instructions[0].style, OverlayStyle::Masked);

        assert_eq!(instructions[1].line, 4);
        assert_eq!(instructions[1].text, "****");
    }

    #[test]
    fn test_quoted_value_masked_inside_quotes() {
        let lines = ["API_KEY=\"secret123\""];
        let instructions = plan_all(&lines, &MaskPolicy::default(), &RevealTracker::new());

        assert_eq!(instructions.len(), 1);
        assert_eq!(instructions[0].text, "\"*********\"");
    }

    #[test]
    fn test_disabled_feature_plans_nothing() {
        let mut state = all_enabled();
        state.set(Feature::Files, false);

        let instructions = plan(
            ["TOKEN=abc123"].into_iter(),
            &MaskPolicy::default(),
            Feature::Files,
            &state,
            &RevealTracker::new(),
            DOC,
        );
        assert!(instructions.is_empty());
    }

    #[test]
    fn test_revealed_line_shows_raw_value() {
        let mut reveal = RevealTracker::new();
        reveal.reveal(DOC, 2);

        let lines = ["A=one", "B=\"two\"", "C=three"];
        let instructions = plan_all(&lines, &MaskPolicy::default(), &reveal);

        assert_eq!(instructions.len(), 3);
        assert_eq!(instructions[0].style, OverlayStyle::Masked);
        assert_eq!(instructions[1].style, OverlayStyle::Revealed);
        assert_eq!(instructions[1].text, "\"two\"");
        assert_eq!(instructions[2].style, OverlayStyle::Masked);
    }

    #[test]
    fn test_empty_values_emit_no_instruction() {
        let lines = ["EMPTY=", "ALSO_EMPTY=   "];
        let instructions = plan_all(&lines, &MaskPolicy::default(), &RevealTracker::new());
        assert!(instructions.is_empty());
    }

    #[test]
    fn test_at_most_one_instruction_per_line() {
        let lines = ["A=1", "B=2", "C=3"];
        let instructions = plan_all(&lines, &MaskPolicy::default(), &RevealTracker::new());

        let mut seen = std::collections::BTreeSet::new();
        for instruction in &instructions {
            assert!(seen.insert(instruction.line));
        }
    }

    #[test]
    fn test_plan_slice_offsets_line_numbers() {
        let lines = ["X=1", "Y=2"];
        let instructions = plan_slice(
            lines.iter().copied(),
            41,
            &MaskPolicy::default(),
            Feature::Files,
            &all_enabled(),
            &RevealTracker::new(),
            DOC,
        );

        assert_eq!(instructions[0].line, 41);
        assert_eq!(instructions[1].line, 42);
    }

    #[test]
    fn test_chunked_plan_equals_full_plan() {
        let lines: Vec<String> = (0..25)
            .map(|i| format!("KEY_{}=value_{}", i, i))
            .collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();

        let policy = MaskPolicy::default();
        let state = all_enabled();
        let reveal = RevealTracker::new();

        let full = plan(refs.iter().copied(), &policy, Feature::Files, &state, &reveal, DOC);

        let mut chunked = Vec::new();
        for (start, chunk) in refs.chunks(7).enumerate().map(|(i, c)| (i * 7, c)) {
            chunked.extend(plan_slice(
                chunk.iter().copied(),
                start + 1,
                &policy,
                Feature::Files,
                &state,
                &reveal,
                DOC,
            ));
        }

        assert_eq!(full, chunked);
    }
}
