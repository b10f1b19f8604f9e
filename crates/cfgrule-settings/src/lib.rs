//! Config parsing and profile resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::CfgruleConfigV1;
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `cfgrule.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<CfgruleConfigV1> {
    let cfg: CfgruleConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config used by the evaluator (profile + file + overrides).
pub fn resolve_config(
    cfg: CfgruleConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}

/// Parse then resolve; empty (or whitespace-only) text means "all defaults".
pub fn load_config(text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    use anyhow::Context;

    let cfg = if text.trim().is_empty() {
        CfgruleConfigV1::default()
    } else {
        parse_config_toml(text).context("parse config")?
    };
    resolve_config(cfg, overrides).context("resolve config")
}
