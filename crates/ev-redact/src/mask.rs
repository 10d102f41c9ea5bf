//! Value masking.
//!
//! Pure functions from a value and a [`MaskPolicy`] to the string shown in
//! its place. No I/O, no state; the same inputs always produce the same
//! output.

use crate::policy::{MaskPolicy, PartialMask};

/// Masks a value according to the policy.
///
/// An empty value stays empty. With partial masking disabled (or malformed)
/// every character is replaced by the mask character, so the output has the
/// same character count as the input. With partial masking enabled, the
/// first `show_start` and last `show_end` characters stay visible and the
/// middle becomes `max(min_mask, len - show_start - show_end)` mask
/// characters.
///
/// Values too short for the partial shape fall back to full masking: a
/// partially shown value must never be so short that the visible edges
/// leave nothing hidden.
pub fn mask_value(value: &str, policy: &MaskPolicy) -> String {
    if value.is_empty() {
        return String::new();
    }

    let len = value.chars().count();
    let partial = match policy.effective_partial() {
        Some(p) if partial_applies(p, len) => p,
        _ => return full_mask(len, policy.mask_char),
    };

    let show_start = partial.show_start as usize;
    let show_end = partial.show_end as usize;
    let mask_len = (len - show_start - show_end).max(partial.min_mask as usize);

    let mut out = String::with_capacity(len + mask_len);
    out.extend(value.chars().take(show_start));
    out.extend(std::iter::repeat(policy.mask_char).take(mask_len));
    out.extend(value.chars().skip(len - show_end));
    out
}

/// Masks a parsed value token, preserving its quoting.
///
/// `value` is the unquoted inner content; the result is re-wrapped in the
/// original quote character. Quotes themselves are never masked.
pub fn mask_token(value: &str, quote: Option<char>, policy: &MaskPolicy) -> String {
    requote(&mask_value(value, policy), quote)
}

/// Wraps a value in its original quote character, if it had one.
pub fn requote(value: &str, quote: Option<char>) -> String {
    match quote {
        Some(q) => format!("{}{}{}", q, value, q),
        None => value.to_string(),
    }
}

/// A valid partial shape has `min_mask >= 1`, so this also implies that at
/// least one character stays hidden.
fn partial_applies(partial: &PartialMask, len: usize) -> bool {
    let visible = partial.show_start as usize + partial.show_end as usize;
    len > visible && len >= visible + partial.min_mask as usize
}

fn full_mask(len: usize, mask_char: char) -> String {
    std::iter::repeat(mask_char).take(len).collect()
}
