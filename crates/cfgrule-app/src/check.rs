//! The `check` use case: evaluate configuration item documents and produce a report.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use cfgrule_settings::{Overrides, ResolvedConfig};
use cfgrule_types::{
    CfgruleReport, ConfigurationItem, RepoPath, ReportEnvelope, ReportedEvaluation,
    SCHEMA_REPORT_V1, Verdict,
};
use serde_json::Value as JsonValue;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info};

use crate::discover::discover_item_files;
use crate::invoke::{decode_rule_parameters, evaluate_item};
use crate::report::tool_meta;

#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// A single item document, or a directory scanned for `*.json`.
    pub items_path: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    pub overrides: Overrides,
    /// Raw `ruleParameters` JSON, as AWS Config would pass it.
    pub rule_parameters: Option<&'a str>,
}

#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: CfgruleReport,
    pub resolved_config: ResolvedConfig,
}

/// Run the check use case: resolve config, load items, evaluate each, produce the report.
///
/// Each document holds one configuration item or a JSON array of them.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();
    // Items without a capture time are ordered at the start of the run.
    let run_time = started_at.format(&Rfc3339).context("format run start time")?;

    let resolved = cfgrule_settings::load_config(input.config_text, input.overrides.clone())?;
    let cfg = &resolved.effective;
    let params = decode_rule_parameters(input.rule_parameters).context("rule parameters")?;

    let files = discover_item_files(input.items_path)?;
    let root = report_root(input.items_path);

    let mut evaluations = Vec::new();
    for file in &files {
        let source = RepoPath::relative_to(file, &root);
        for item in load_items(file)? {
            let resource_id = item.resource_id.clone();
            let outcome = evaluate_item(item, &params, false, Some(run_time.as_str()), cfg)
                .with_context(|| format!("evaluate {resource_id} from {file}"))?;
            evaluations.push(ReportedEvaluation {
                source: source.clone(),
                code: outcome.code.map(str::to_string),
                evaluation: outcome.evaluation,
            });
        }
    }

    let cfgrule_domain::report::DomainReport {
        verdict,
        evaluations,
        data,
    } = cfgrule_domain::report::summarize(evaluations, cfg);

    info!(
        files = files.len(),
        items = data.items_scanned,
        non_compliant = data.non_compliant,
        verdict = ?verdict,
        "check finished"
    );

    let report = ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict,
        evaluations,
        data,
    };

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
    })
}

fn report_root(items_path: &Utf8Path) -> Utf8PathBuf {
    if items_path.is_dir() {
        items_path.to_path_buf()
    } else {
        items_path
            .parent()
            .map(Utf8Path::to_path_buf)
            .unwrap_or_default()
    }
}

fn load_items(file: &Utf8Path) -> anyhow::Result<Vec<ConfigurationItem>> {
    let text = std::fs::read_to_string(file).with_context(|| format!("read {file}"))?;
    let value: JsonValue =
        serde_json::from_str(&text).with_context(|| format!("parse {file}"))?;

    let items: Vec<ConfigurationItem> = match value {
        JsonValue::Array(values) => values
            .into_iter()
            .enumerate()
            .map(|(i, v)| {
                serde_json::from_value(v)
                    .with_context(|| format!("decode configuration item {i} in {file}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?,
        other => vec![
            serde_json::from_value(other)
                .with_context(|| format!("decode configuration item in {file}"))?,
        ],
    };
    debug!(%file, items = items.len(), "loaded configuration items");
    Ok(items)
}

/// Map verdict to exit code: 0 = pass, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Fail => 2,
    }
}
