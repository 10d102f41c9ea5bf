//! Fuzz target for the redactor.
//!
//! Tests that masking never panics and always preserves character count,
//! whatever the value or partial shape.

#![no_main]

use libfuzzer_sys::fuzz_target;

use ev_redact::{mask_value, MaskPolicy, PartialMask};

fuzz_target!(|input: (String, u8, u8, u8)| {
    let (value, show_start, show_end, min_mask) = input;

    let policy = MaskPolicy::with_partial(
        '*',
        PartialMask {
            show_start: show_start as u32,
            show_end: show_end as u32,
            min_mask: min_mask as u32,
        },
    );

    let masked = mask_value(&value, &policy);
    assert_eq!(masked.chars().count(), value.chars().count());
});
