//! Stable DTOs and IDs used across the cfgrule workspace.
//!
//! This crate is intentionally boring:
//! - the AWS Config shapes the rule reads and writes (items, evaluations, events)
//! - stable string IDs and codes
//! - the report envelope emitted by `cfgrule check`
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod config_item;
pub mod event;
pub mod explain;
pub mod ids;
pub mod path;
pub mod receipt;
pub mod verdict;

pub use config_item::{
    AccessLogSettings, ConfigurationItem, ConfigurationItemStatus, StageConfiguration,
};
pub use event::{
    ErrorResponse, InvocationEvent, InvocationResponse, InvokingEvent, MessageType,
    PutEvaluationsRequest,
};
pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use path::RepoPath;
pub use receipt::{
    CfgruleData, CfgruleReport, ReportEnvelope, ReportedEvaluation, SCHEMA_REPORT_V1, ToolMeta,
    Verdict,
};
pub use verdict::{
    ComplianceType, ComplianceVerdict, Evaluation, MAX_ANNOTATION_LEN, build_annotation,
};
