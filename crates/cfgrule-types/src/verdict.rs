//! Compliance verdicts and the evaluations reported back to AWS Config.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Longest annotation AWS Config accepts.
pub const MAX_ANNOTATION_LEN: usize = 256;

const TRUNCATED_SUFFIX: &str = " [truncated]";

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceType {
    Compliant,
    NonCompliant,
    NotApplicable,
    InsufficientData,
}

impl ComplianceType {
    pub fn as_str(self) -> &'static str {
        match self {
            ComplianceType::Compliant => "COMPLIANT",
            ComplianceType::NonCompliant => "NON_COMPLIANT",
            ComplianceType::NotApplicable => "NOT_APPLICABLE",
            ComplianceType::InsufficientData => "INSUFFICIENT_DATA",
        }
    }
}

/// Verdict for one resource.
///
/// Build it through the constructors: they keep `annotation` present exactly when the
/// verdict is NON_COMPLIANT.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct ComplianceVerdict {
    pub compliance_type: ComplianceType,
    pub compliance_resource_id: String,
    pub compliance_resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

impl ComplianceVerdict {
    pub fn compliant(resource_type: impl Into<String>, resource_id: impl Into<String>) -> Self {
        Self {
            compliance_type: ComplianceType::Compliant,
            compliance_resource_id: resource_id.into(),
            compliance_resource_type: resource_type.into(),
            annotation: None,
        }
    }

    pub fn non_compliant(
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        annotation: &str,
    ) -> Self {
        Self {
            compliance_type: ComplianceType::NonCompliant,
            compliance_resource_id: resource_id.into(),
            compliance_resource_type: resource_type.into(),
            annotation: Some(build_annotation(annotation)),
        }
    }

    pub fn not_applicable(
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
    ) -> Self {
        Self {
            compliance_type: ComplianceType::NotApplicable,
            compliance_resource_id: resource_id.into(),
            compliance_resource_type: resource_type.into(),
            annotation: None,
        }
    }

    pub fn is_non_compliant(&self) -> bool {
        self.compliance_type == ComplianceType::NonCompliant
    }

    /// Attach the ordering timestamp, producing the shape sent to `PutEvaluations`.
    pub fn at(self, ordering_timestamp: impl Into<String>) -> Evaluation {
        Evaluation {
            verdict: self,
            ordering_timestamp: ordering_timestamp.into(),
        }
    }
}

/// A verdict plus the time AWS Config orders it by.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct Evaluation {
    #[serde(flatten)]
    pub verdict: ComplianceVerdict,
    pub ordering_timestamp: String,
}

/// Clamp an annotation to [`MAX_ANNOTATION_LEN`] characters, marking the cut.
pub fn build_annotation(annotation: &str) -> String {
    if annotation.chars().count() <= MAX_ANNOTATION_LEN {
        return annotation.to_string();
    }
    let keep = MAX_ANNOTATION_LEN - TRUNCATED_SUFFIX.len();
    let mut out: String = annotation.chars().take(keep).collect();
    out.push_str(TRUNCATED_SUFFIX);
    out
}
