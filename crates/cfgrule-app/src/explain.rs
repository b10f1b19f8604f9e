//! The `explain` use case: look up rule/code documentation.

use cfgrule_types::explain::{self, Explanation};

#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found(Explanation),
    /// Unknown identifier; carries the known rule ids and codes for the error message.
    NotFound {
        identifier: String,
        available_rule_ids: &'static [&'static str],
        available_codes: &'static [&'static str],
    },
}

pub fn run_explain(identifier: &str) -> ExplainOutput {
    let identifier = identifier.trim();
    match explain::lookup_explanation(identifier) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_rule_ids: explain::all_rule_ids(),
            available_codes: explain::all_codes(),
        },
    }
}

/// Terminal rendering: title, description, remediation, then the before/after stage
/// configurations as JSON.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = format!("{}\n{}\n\n", exp.title, "=".repeat(exp.title.len()));
    out.push_str(exp.description);
    out.push_str("\n\nRemediation\n-----------\n");
    out.push_str(exp.remediation);
    out.push_str("\n\nExamples\n--------\n\n");
    push_example(&mut out, "Before (NON_COMPLIANT):", exp.examples.before);
    out.push('\n');
    push_example(&mut out, "After (COMPLIANT):", exp.examples.after);
    out
}

fn push_example(out: &mut String, label: &str, body: &str) {
    out.push_str(label);
    out.push_str("\n```json\n");
    out.push_str(body.trim_end());
    out.push_str("\n```\n");
}

pub fn format_not_found(identifier: &str, rule_ids: &[&str], codes: &[&str]) -> String {
    let mut out = format!("Unknown rule id or code: {identifier}\n\nAvailable rule ids:\n");
    for id in rule_ids {
        out.push_str(&format!("  - {id}\n"));
    }
    out.push_str("\nAvailable codes:\n");
    for code in codes {
        out.push_str(&format!("  - {code}\n"));
    }
    out
}
