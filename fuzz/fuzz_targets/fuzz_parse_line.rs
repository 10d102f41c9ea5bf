//! Fuzz target for the line parser.
//!
//! Tests that arbitrary text never panics the parser and that reported
//! value offsets stay inside the line.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(line) = std::str::from_utf8(data) {
        if let Some(parsed) = ev_overlay::parse_line(line) {
            // the offset must land on a char boundary inside the line
            assert!(parsed.value_offset <= line.len());
            assert!(line.is_char_boundary(parsed.value_offset));
            assert!(!parsed.key.is_empty());
        }
    }
});
