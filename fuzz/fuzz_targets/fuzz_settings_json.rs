//! Fuzz target for settings.json parsing.
//!
//! Tests that JSON settings parsing handles arbitrary input without
//! panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use ev_config::Settings;

fuzz_target!(|data: &[u8]| {
    // Try to parse as JSON - should never panic, only return an error
    let _ = serde_json::from_slice::<Settings>(data);
});
