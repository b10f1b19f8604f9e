use crate::{RenderableCompliance, RenderableReport};

/// Render evaluations as GitHub Actions workflow command annotations.
///
/// Format:
/// `::{level} file={source}::[{rule}:{code}] {resource_type} {resource_id}: {annotation}`
///
/// Compliant resources produce no annotation.
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    let mut out = Vec::new();

    for e in &report.evaluations {
        let level = match e.compliance {
            RenderableCompliance::Compliant => continue,
            RenderableCompliance::NonCompliant => "error",
            RenderableCompliance::InsufficientData => "warning",
            RenderableCompliance::NotApplicable => "notice",
        };

        let tag = match &e.code {
            Some(code) => format!("{}:{}", report.data.rule, code),
            None => report.data.rule.clone(),
        };
        let detail = match (&e.annotation, e.compliance) {
            (Some(a), _) => a.clone(),
            (None, RenderableCompliance::NotApplicable) => "not applicable".to_string(),
            (None, _) => "insufficient data".to_string(),
        };
        let message = format!("[{}] {} {}: {}", tag, e.resource_type, e.resource_id, detail);

        out.push(format!(
            "::{} file={}::{}",
            level,
            escape_property(&e.source),
            escape_data(&message)
        ));
    }

    out
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Property values additionally reserve `:` and `,`.
fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
