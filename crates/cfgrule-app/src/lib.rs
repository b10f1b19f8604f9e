//! Use case orchestration for cfgrule.
//!
//! This crate provides the application layer: the rule's invocation boundary plus the use cases
//! that coordinate the domain, settings, and render layers. The pure verdict logic lives in
//! `cfgrule-domain`; everything that touches raw events, files, or clocks lives here.
//!
//! The CLI crate depends on this; it only handles argument parsing and process I/O.

#![forbid(unsafe_code)]

mod check;
mod discover;
mod error;
mod explain;
mod invoke;
mod render;
mod report;

pub use check::{CheckInput, CheckOutput, run_check, verdict_exit_code};
pub use discover::discover_item_files;
pub use error::InvocationError;
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use invoke::{
    Invocation, ItemOutcome, TEST_MODE_RESULT_TOKEN, decode_rule_parameters, evaluate_item,
    handle_event, invoke, plan_put_evaluations,
};
pub use render::{render_annotations, render_markdown};
pub use report::{parse_report_json, runtime_error_report, serialize_report, to_renderable};
