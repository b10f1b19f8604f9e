//! Developer tasks (schema generation, fixture conformance).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use cfgrule_test_util::normalize_nondeterministic;
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Workspace root (parent of the xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "cfgrule.report.v1.json",
            generate: || schema_for!(cfgrule_types::CfgruleReport),
        },
        SchemaSpec {
            filename: "cfgrule.config.v1.json",
            generate: || schema_for!(cfgrule_settings::CfgruleConfigV1),
        },
        SchemaSpec {
            filename: "cfgrule.evaluation.v1.json",
            generate: || schema_for!(cfgrule_types::Evaluation),
        },
        SchemaSpec {
            filename: "cfgrule.invocation-event.v1.json",
            generate: || schema_for!(cfgrule_types::InvocationEvent),
        },
        SchemaSpec {
            filename: "cfgrule.invocation-response.v1.json",
            generate: || schema_for!(cfgrule_types::InvocationResponse),
        },
    ]
}

/// Pretty-printed JSON with a trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json).with_context(|| format!("write {}", path.display()))?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

/// Fail when `schemas/` differs from what the current types generate.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut stale = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        let expected = serialize_schema(&(spec.generate)())?;
        match fs::read_to_string(&path) {
            Ok(actual) if actual == expected => {}
            Ok(_) => stale.push(format!("{} (out of date)", spec.filename)),
            Err(_) => stale.push(format!("{} (missing)", spec.filename)),
        }
    }

    if stale.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    for name in &stale {
        eprintln!("  - {name}");
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("schema validation failed")
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Run cfgrule on fixtures; check schema and golden files");
    eprintln!("  explain-coverage  Validate all rule ids and codes have explanations");
}

/// Report sources must be relative, forward-slash paths.
fn is_clean_path(path: &str) -> bool {
    !(path.starts_with('/')
        || path.contains("..")
        || path.contains('\\')
        || (path.len() >= 2 && path.as_bytes()[1] == b':'))
}

fn cfgrule_bin() -> anyhow::Result<PathBuf> {
    let bin = project_root()
        .join("target")
        .join("debug")
        .join(format!("cfgrule{}", std::env::consts::EXE_SUFFIX));
    if !bin.exists() {
        bail!(
            "cfgrule binary not found at {}.\nRun `cargo build -p cfgrule-cli` first.",
            bin.display()
        );
    }
    Ok(bin)
}

/// Run `cfgrule check` on every fixture with an `items/` directory and check the report
/// against the generated schema, path hygiene, and `expected.report.json` when present.
fn conform() -> anyhow::Result<()> {
    let schema = serde_json::to_value(schema_for!(cfgrule_types::CfgruleReport))
        .context("serialize report schema")?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| anyhow::anyhow!("compile report schema: {e}"))?;
    let bin = cfgrule_bin()?;

    let mut errors = Vec::new();
    let mut checked = 0;

    let mut fixture_dirs: Vec<PathBuf> = fs::read_dir(fixtures_dir())
        .context("read tests/fixtures/")?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.join("items").is_dir())
        .collect();
    fixture_dirs.sort();

    for fixture_dir in fixture_dirs {
        let name = fixture_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let temp = tempfile::tempdir().context("create temp dir")?;
        let report_out = temp.path().join("report.json");

        let output = std::process::Command::new(&bin)
            .current_dir(temp.path())
            .arg("check")
            .arg("--items")
            .arg(fixture_dir.join("items"))
            .arg("--report-out")
            .arg(&report_out)
            .output()
            .with_context(|| format!("run cfgrule on fixture '{name}'"))?;

        // 0 = pass, 2 = fail; anything else is a tool error.
        if !matches!(output.status.code(), Some(0) | Some(2)) {
            errors.push(format!(
                "fixture '{name}': cfgrule exited with {:?}: {}",
                output.status.code(),
                String::from_utf8_lossy(&output.stderr)
            ));
            continue;
        }

        let report: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(&report_out)
                .with_context(|| format!("read report for fixture '{name}'"))?,
        )
        .with_context(|| format!("parse report for fixture '{name}'"))?;

        for err in validator.iter_errors(&report) {
            errors.push(format!("fixture '{name}': schema validation: {err}"));
        }

        let sources = report["evaluations"]
            .as_array()
            .map(|list| list.iter().filter_map(|e| e["source"].as_str()).collect::<Vec<_>>())
            .unwrap_or_default();
        for source in sources.into_iter().filter(|s| !is_clean_path(s)) {
            errors.push(format!("fixture '{name}': unclean source path {source:?}"));
        }

        let golden_path = fixture_dir.join("expected.report.json");
        if golden_path.exists() {
            let golden: serde_json::Value = serde_json::from_str(&fs::read_to_string(&golden_path)?)
                .with_context(|| format!("parse {}", golden_path.display()))?;
            if normalize_nondeterministic(report) != normalize_nondeterministic(golden) {
                errors.push(format!("fixture '{name}': output differs from expected.report.json"));
            }
        }
        checked += 1;
    }

    if !errors.is_empty() {
        eprintln!("Conformance errors:");
        for err in &errors {
            eprintln!("  - {err}");
        }
        bail!("conformance failed with {} errors", errors.len());
    }

    println!("{checked} fixtures conform.");
    Ok(())
}

fn explain_coverage() -> anyhow::Result<()> {
    use cfgrule_types::explain;

    let mut errors = Vec::new();
    for id in explain::all_rule_ids().iter().chain(explain::all_codes()) {
        let Some(exp) = explain::lookup_explanation(id) else {
            errors.push(format!("'{id}' has no explanation"));
            continue;
        };
        for (field, value) in [
            ("title", exp.title),
            ("description", exp.description),
            ("remediation", exp.remediation),
        ] {
            if value.trim().is_empty() {
                errors.push(format!("'{id}' has empty {field}"));
            }
        }
        for (label, example) in [("before", exp.examples.before), ("after", exp.examples.after)] {
            if serde_json::from_str::<serde_json::Value>(example).is_err() {
                errors.push(format!("'{id}' {label} example is not valid JSON"));
            }
        }
    }

    if !errors.is_empty() {
        for err in &errors {
            eprintln!("  - {err}");
        }
        bail!("explain coverage failed with {} errors", errors.len());
    }
    println!("All rule ids and codes have explanations.");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(String::as_str).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
