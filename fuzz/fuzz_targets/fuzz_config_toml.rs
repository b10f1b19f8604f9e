//! Fuzz target for `cfgrule.toml` parsing and resolution.
//!
//! Goal: arbitrary text must never panic; accepted configs keep the batch size in range.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_toml
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 8192 {
        return;
    }

    let overrides = cfgrule_settings::Overrides::default();
    if let Ok(resolved) = cfgrule_settings::load_config(text, overrides) {
        assert!((1..=100).contains(&resolved.effective.batch_size));
    }
});
