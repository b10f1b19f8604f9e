use crate::{model::CfgruleConfigV1, presets};
use anyhow::Context;
use cfgrule_domain::policy::{EffectiveConfig, FailOn, RuleId};
use cfgrule_types::ids;

/// Largest batch `PutEvaluations` accepts.
const MAX_BATCH_SIZE: u32 = 100;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub rule: Option<String>,
    pub resource_type: Option<String>,
    pub batch_size: Option<u32>,
    pub test_mode: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(
    cfg: CfgruleConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let rule_s = overrides
        .rule
        .clone()
        .or(cfg.rule.clone())
        .unwrap_or_else(|| ids::RULE_API_GATEWAY_ACCESS_LOGGING.to_string());
    let rule = parse_rule(&rule_s)?;

    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "strict".to_string());

    let mut effective = presets::preset(&profile, rule);

    if let Some(rt) = overrides.resource_type.clone().or(cfg.resource_type.clone()) {
        validate_resource_type(&rt).context("invalid resource_type")?;
        effective.resource_type = rt;
    }

    if let Some(bs) = overrides.batch_size.or(cfg.batch_size) {
        if bs == 0 || bs > MAX_BATCH_SIZE {
            anyhow::bail!("batch_size must be between 1 and {MAX_BATCH_SIZE}, got {bs}");
        }
        effective.batch_size = bs as usize;
    }

    if let Some(test_mode) = overrides.test_mode.or(cfg.test_mode) {
        effective.test_mode = test_mode;
    }

    // fail_on override from config
    if let Some(fail_on_s) = cfg.fail_on.as_deref() {
        effective.fail_on = parse_fail_on(fail_on_s)?;
    }

    Ok(ResolvedConfig { effective })
}

fn parse_rule(v: &str) -> anyhow::Result<RuleId> {
    RuleId::parse(v).with_context(|| {
        let known: Vec<&str> = RuleId::ALL.iter().map(|r| r.as_str()).collect();
        format!("unknown rule: {v} (expected one of: {})", known.join(", "))
    })
}

/// Resource types are `AWS::<Service>::<Type>` (or a third-party `<Org>::<Service>::<Type>`).
fn validate_resource_type(v: &str) -> anyhow::Result<()> {
    let parts: Vec<&str> = v.split("::").collect();
    let well_formed = parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_alphanumeric()));
    if !well_formed {
        anyhow::bail!("expected <Org>::<Service>::<Type>, got {v:?}");
    }
    Ok(())
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    match v {
        "non_compliant" | "non-compliant" => Ok(FailOn::NonCompliant),
        "never" => Ok(FailOn::Never),
        other => anyhow::bail!("unknown fail_on: {other} (expected non_compliant|never)"),
    }
}
