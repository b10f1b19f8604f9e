use cfgrule_domain::policy::{EffectiveConfig, FailOn, RuleId};

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything else belongs in `cfgrule.toml`.
pub fn preset(profile: &str, rule: RuleId) -> EffectiveConfig {
    match profile {
        "audit" => audit_profile(rule),
        // default
        _ => strict_profile(rule),
    }
}

fn strict_profile(rule: RuleId) -> EffectiveConfig {
    EffectiveConfig::for_rule(rule)
}

fn audit_profile(rule: RuleId) -> EffectiveConfig {
    // Report everything, never fail the run.
    EffectiveConfig {
        profile: "audit".to_string(),
        fail_on: FailOn::Never,
        ..EffectiveConfig::for_rule(rule)
    }
}
