//! CLI entry point for cfgrule.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, logging setup, and exit
//! codes. All rule logic lives in the `cfgrule-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use cfgrule_app::{
    CheckInput, ExplainOutput, invoke, parse_report_json, render_annotations, render_markdown,
    run_check, run_explain, runtime_error_report, serialize_report, to_renderable,
    verdict_exit_code,
};
use cfgrule_settings::Overrides;
use cfgrule_types::{CfgruleReport, InvocationResponse};
use clap::{Parser, Subcommand};
use std::io::Read;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "cfgrule",
    version,
    about = "AWS Config rule: API Gateway stages must define access logging"
)]
struct Cli {
    /// Path to cfgrule config TOML (missing file means defaults).
    #[arg(long, global = true, default_value = "cfgrule.toml")]
    config: Utf8PathBuf,

    /// Override profile (strict|audit).
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Override the rule to evaluate.
    #[arg(long, global = true)]
    rule: Option<String>,

    /// Override the evaluated resource type (e.g. AWS::ApiGateway::Stage).
    #[arg(long, global = true)]
    resource_type: Option<String>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Handle one AWS Config rule invocation event and print the response JSON.
    Invoke {
        /// Event JSON file (reads stdin when omitted).
        #[arg(long)]
        event: Option<Utf8PathBuf>,

        /// Write the planned PutEvaluations requests here.
        #[arg(long)]
        batches_out: Option<Utf8PathBuf>,

        /// Override evaluations per PutEvaluations request (1..=100).
        #[arg(long)]
        batch_size: Option<u32>,

        /// Mark PutEvaluations requests as test mode.
        #[arg(long)]
        test_mode: bool,
    },

    /// Evaluate configuration item documents and write a report.
    Check {
        /// Item document, or directory scanned for *.json.
        #[arg(long)]
        items: Utf8PathBuf,

        /// Raw ruleParameters JSON passed to the rule.
        #[arg(long)]
        rule_parameters: Option<String>,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/cfgrule/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/cfgrule/comment.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report.
    Md {
        #[arg(long, default_value = "artifacts/cfgrule/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (prints to stdout when omitted).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        #[arg(long, default_value = "artifacts/cfgrule/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a rule id or finding code with remediation guidance.
    Explain {
        /// Rule id (e.g. "api-gateway-access-logging") or finding code
        /// (e.g. "access_log_settings_missing").
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    match &cli.cmd {
        Commands::Invoke {
            event,
            batches_out,
            batch_size,
            test_mode,
        } => cmd_invoke(
            &cli,
            event.as_deref(),
            batches_out.as_deref(),
            *batch_size,
            *test_mode,
        ),
        Commands::Check {
            items,
            rule_parameters,
            report_out,
            write_markdown,
            markdown_out,
        } => cmd_check(
            &cli,
            items,
            rule_parameters.as_deref(),
            report_out,
            write_markdown.then_some(markdown_out.as_path()),
        ),
        Commands::Md { report, output } => cmd_md(report, output.as_deref()),
        Commands::Annotations { report, max } => cmd_annotations(report, *max),
        Commands::Explain { identifier } => cmd_explain(identifier),
    }
}

fn init_tracing(verbose: u8, json: bool) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn overrides(cli: &Cli) -> Overrides {
    Overrides {
        profile: cli.profile.clone(),
        rule: cli.rule.clone(),
        resource_type: cli.resource_type.clone(),
        ..Overrides::default()
    }
}

fn read_config_text(path: &Utf8Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(_) => {
            tracing::debug!(config = %path, "config not found; using defaults");
            String::new()
        }
    }
}

fn cmd_invoke(
    cli: &Cli,
    event_path: Option<&Utf8Path>,
    batches_out: Option<&Utf8Path>,
    batch_size: Option<u32>,
    test_mode: bool,
) -> anyhow::Result<()> {
    let cfg_text = read_config_text(&cli.config);
    let overrides = Overrides {
        batch_size,
        test_mode: test_mode.then_some(true),
        ..overrides(cli)
    };
    let resolved = cfgrule_settings::load_config(&cfg_text, overrides)?;

    let event_text = match event_path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("read event: {path}"))?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read event from stdin")?;
            buf
        }
    };

    let invocation = invoke(&event_text, &resolved.effective);

    let response =
        serde_json::to_string_pretty(&invocation.response).context("serialize response")?;
    println!("{response}");

    if let Some(path) = batches_out {
        let batches =
            serde_json::to_string_pretty(&invocation.batches).context("serialize batches")?;
        write_text_file(path, &batches).context("write batches")?;
    }

    if matches!(invocation.response, InvocationResponse::Error(_)) {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_check(
    cli: &Cli,
    items: &Utf8Path,
    rule_parameters: Option<&str>,
    report_out: &Utf8Path,
    markdown_out: Option<&Utf8Path>,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let cfg_text = read_config_text(&cli.config);
        let output = run_check(CheckInput {
            items_path: items,
            config_text: &cfg_text,
            overrides: overrides(cli),
            rule_parameters,
        })?;

        write_report_file(report_out, &output.report).context("write report json")?;
        if let Some(md_path) = markdown_out {
            let md = render_markdown(&to_renderable(&output.report));
            write_text_file(md_path, &md).context("write markdown")?;
        }

        Ok(verdict_exit_code(output.report.verdict))
    })();

    match result {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(err) => {
            let report = runtime_error_report(&format!("{err:#}"));
            if let Err(write_err) = write_report_file(report_out, &report) {
                tracing::warn!(error = %write_err, "could not write runtime error report");
            }
            eprintln!("cfgrule error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn write_report_file(path: &Utf8Path, report: &CfgruleReport) -> anyhow::Result<()> {
    let data = serialize_report(report)?;
    create_parent(path)?;
    std::fs::write(path, data).with_context(|| format!("write report: {path}"))
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    create_parent(path)?;
    std::fs::write(path, text).with_context(|| format!("write text: {path}"))
}

fn create_parent(path: &Utf8Path) -> anyhow::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => std::fs::create_dir_all(parent)
            .with_context(|| format!("create directory: {parent}")),
        _ => Ok(()),
    }
}

fn load_report(path: &Utf8Path) -> anyhow::Result<CfgruleReport> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read report: {path}"))?;
    parse_report_json(&text)
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report = load_report(report_path)?;
    let md = render_markdown(&to_renderable(&report));

    match output {
        Some(out_path) => write_text_file(out_path, &md).context("write markdown output")?,
        None => print!("{md}"),
    }
    Ok(())
}

fn cmd_annotations(report_path: &Utf8Path, max: usize) -> anyhow::Result<()> {
    let report = load_report(report_path)?;
    for annotation in render_annotations(&to_renderable(&report), max) {
        println!("{annotation}");
    }
    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", cfgrule_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_rule_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                cfgrule_app::format_not_found(&identifier, available_rule_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}
