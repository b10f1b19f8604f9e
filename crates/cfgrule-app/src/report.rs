use anyhow::Context;
use cfgrule_render::{
    RenderableCompliance, RenderableData, RenderableEvaluation, RenderableReport,
    RenderableVerdictStatus,
};
use cfgrule_types::{
    CfgruleData, CfgruleReport, ComplianceType, ReportEnvelope, ReportedEvaluation,
    SCHEMA_REPORT_V1, ToolMeta, Verdict,
};
use time::OffsetDateTime;

pub(crate) fn tool_meta() -> ToolMeta {
    ToolMeta {
        name: "cfgrule".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Parse a saved report, rejecting documents that declare another schema.
pub fn parse_report_json(text: &str) -> anyhow::Result<CfgruleReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    match value.get("schema").and_then(|v| v.as_str()) {
        Some(SCHEMA_REPORT_V1) => {}
        Some(other) => anyhow::bail!("unknown report schema: {other}"),
        None => anyhow::bail!("report has no schema field"),
    }

    serde_json::from_value(value).context("parse cfgrule report")
}

pub fn serialize_report(report: &CfgruleReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn to_renderable(report: &CfgruleReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableVerdictStatus::Pass,
            Verdict::Fail => RenderableVerdictStatus::Fail,
        },
        evaluations: report.evaluations.iter().map(renderable_evaluation).collect(),
        data: RenderableData {
            rule: report.data.rule.clone(),
            items_scanned: report.data.items_scanned,
            compliant: report.data.compliant,
            non_compliant: report.data.non_compliant,
            not_applicable: report.data.not_applicable,
            runtime_error: report.data.runtime_error.clone(),
        },
    }
}

fn renderable_evaluation(e: &ReportedEvaluation) -> RenderableEvaluation {
    let verdict = &e.evaluation.verdict;
    RenderableEvaluation {
        compliance: match verdict.compliance_type {
            ComplianceType::Compliant => RenderableCompliance::Compliant,
            ComplianceType::NonCompliant => RenderableCompliance::NonCompliant,
            ComplianceType::NotApplicable => RenderableCompliance::NotApplicable,
            ComplianceType::InsufficientData => RenderableCompliance::InsufficientData,
        },
        resource_type: verdict.compliance_resource_type.clone(),
        resource_id: verdict.compliance_resource_id.clone(),
        source: e.source.as_str().to_string(),
        code: e.code.clone(),
        annotation: verdict.annotation.clone(),
    }
}

/// Failure receipt written when the check could not run at all.
pub fn runtime_error_report(message: &str) -> CfgruleReport {
    let now = OffsetDateTime::now_utc();
    ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at: now,
        finished_at: now,
        verdict: Verdict::Fail,
        evaluations: Vec::new(),
        data: CfgruleData {
            rule: "unknown".to_string(),
            resource_type: "unknown".to_string(),
            profile: "unknown".to_string(),
            runtime_error: Some(message.to_string()),
            ..CfgruleData::default()
        },
    }
}
