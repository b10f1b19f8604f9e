//! Fuzz target for annotation truncation.
//!
//! Goal: annotations never exceed the AWS Config limit and short ones pass through untouched.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_annotation
//! ```

#![no_main]

use cfgrule_types::{MAX_ANNOTATION_LEN, build_annotation};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: String| {
    let out = build_annotation(&text);
    assert!(out.chars().count() <= MAX_ANNOTATION_LEN);
    if text.chars().count() <= MAX_ANNOTATION_LEN {
        assert_eq!(out, text);
    } else {
        assert!(out.ends_with(" [truncated]"));
    }
});
