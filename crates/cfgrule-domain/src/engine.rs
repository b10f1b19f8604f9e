use crate::policy::{EffectiveConfig, RuleParameters};
use crate::rules;
use cfgrule_types::{ComplianceVerdict, ConfigurationItem, StageConfiguration};

/// A verdict plus the finding code that explains it (NON_COMPLIANT only).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assessment {
    pub verdict: ComplianceVerdict,
    pub code: Option<&'static str>,
}

impl Assessment {
    pub fn new(verdict: ComplianceVerdict) -> Self {
        Self {
            verdict,
            code: None,
        }
    }

    pub fn with_code(verdict: ComplianceVerdict, code: &'static str) -> Self {
        Self {
            verdict,
            code: Some(code),
        }
    }
}

/// Evaluate one configuration item against the configured rule.
///
/// Never fails: a missing field is a NON_COMPLIANT verdict, not an error.
pub fn evaluate_compliance(
    params: &RuleParameters,
    item: &ConfigurationItem<StageConfiguration>,
    cfg: &EffectiveConfig,
) -> ComplianceVerdict {
    assess(params, item, cfg).verdict
}

pub fn assess(
    params: &RuleParameters,
    item: &ConfigurationItem<StageConfiguration>,
    cfg: &EffectiveConfig,
) -> Assessment {
    rules::run(item, params, cfg)
}

/// Evaluate items independently, preserving input order.
pub fn evaluate_all(
    params: &RuleParameters,
    items: &[ConfigurationItem<StageConfiguration>],
    cfg: &EffectiveConfig,
) -> Vec<ComplianceVerdict> {
    items
        .iter()
        .map(|item| evaluate_compliance(params, item, cfg))
        .collect()
}
