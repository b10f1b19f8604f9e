use crate::{RenderableCompliance, RenderableEvaluation, RenderableReport, RenderableVerdictStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# cfgrule report\n\n");
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Fail => "FAIL",
    };
    out.push_str(&format!(
        "- Rule: `{}`\n- Verdict: **{}**\n\
         - Resources: {} scanned / {} compliant / {} non-compliant / {} not applicable\n\n",
        report.data.rule,
        verdict,
        report.data.items_scanned,
        report.data.compliant,
        report.data.non_compliant,
        report.data.not_applicable
    ));

    if let Some(err) = &report.data.runtime_error {
        out.push_str(&format!("> Error: {}\n", err));
        return out;
    }

    let non_compliant: Vec<&RenderableEvaluation> = report
        .evaluations
        .iter()
        .filter(|e| e.compliance == RenderableCompliance::NonCompliant)
        .collect();
    let skipped: Vec<&RenderableEvaluation> = report
        .evaluations
        .iter()
        .filter(|e| {
            matches!(
                e.compliance,
                RenderableCompliance::NotApplicable | RenderableCompliance::InsufficientData
            )
        })
        .collect();

    if non_compliant.is_empty() {
        out.push_str("All evaluated resources are compliant.\n");
    } else {
        out.push_str("## Non-compliant resources\n\n");
        for e in non_compliant {
            out.push_str(&format!(
                "- `{}` ({}) in `{}`: {}\n",
                e.resource_id,
                e.resource_type,
                e.source,
                e.annotation.as_deref().unwrap_or("")
            ));
            if let Some(code) = &e.code {
                out.push_str(&format!("  - explain: `cfgrule explain {}`\n", code));
            }
        }
    }

    if !skipped.is_empty() {
        out.push_str("\n## Not evaluated\n\n");
        for e in skipped {
            let why = match e.compliance {
                RenderableCompliance::InsufficientData => "insufficient data",
                _ => "not applicable",
            };
            out.push_str(&format!(
                "- `{}` ({}) in `{}`: {}\n",
                e.resource_id, e.resource_type, e.source, why
            ));
        }
    }

    out
}
