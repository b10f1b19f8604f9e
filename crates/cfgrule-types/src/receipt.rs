use crate::verdict::{ComplianceType, Evaluation};
use crate::RepoPath;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for `cfgrule check` reports.
pub const SCHEMA_REPORT_V1: &str = "cfgrule.report.v1";

/// Verdict is intentionally small: it maps cleanly to CI signals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// An evaluation together with the document it came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReportedEvaluation {
    pub source: RepoPath,
    /// Finding code for NON_COMPLIANT evaluations (see `cfgrule explain`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub evaluation: Evaluation,
}

impl ReportedEvaluation {
    pub fn compliance_type(&self) -> ComplianceType {
        self.evaluation.verdict.compliance_type
    }
}

/// cfgrule-specific summary payload for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct CfgruleData {
    pub rule: String,
    pub resource_type: String,
    pub profile: String,

    pub items_scanned: u32,
    pub compliant: u32,
    pub non_compliant: u32,
    pub not_applicable: u32,

    /// Set when the run aborted before evaluating; the report is then a failure receipt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_error: Option<String>,
}

impl CfgruleData {
    /// Tally compliance types over the emitted evaluations.
    pub fn count(&mut self, evaluations: &[ReportedEvaluation]) {
        self.items_scanned = evaluations.len() as u32;
        self.compliant = 0;
        self.non_compliant = 0;
        self.not_applicable = 0;
        for e in evaluations {
            match e.compliance_type() {
                ComplianceType::Compliant => self.compliant += 1,
                ComplianceType::NonCompliant => self.non_compliant += 1,
                ComplianceType::NotApplicable | ComplianceType::InsufficientData => {
                    self.not_applicable += 1
                }
            }
        }
    }
}

/// A generic receipt/envelope.
///
/// Keeping this generic allows tool-specific data while still enforcing a stable outer shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope<TData = CfgruleData> {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    pub evaluations: Vec<ReportedEvaluation>,
    pub data: TData,
}

pub type CfgruleReport = ReportEnvelope<CfgruleData>;
