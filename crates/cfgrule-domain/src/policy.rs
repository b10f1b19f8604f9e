use cfgrule_types::ids;
use std::collections::BTreeMap;

/// Rules this workspace can evaluate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleId {
    ApiGatewayAccessLogging,
}

impl RuleId {
    pub const ALL: &'static [RuleId] = &[RuleId::ApiGatewayAccessLogging];

    pub fn as_str(self) -> &'static str {
        match self {
            RuleId::ApiGatewayAccessLogging => ids::RULE_API_GATEWAY_ACCESS_LOGGING,
        }
    }

    pub fn parse(v: &str) -> Option<Self> {
        RuleId::ALL.iter().copied().find(|r| r.as_str() == v)
    }

    /// Resource type the rule is written for.
    pub fn resource_type(self) -> &'static str {
        match self {
            RuleId::ApiGatewayAccessLogging => ids::RESOURCE_TYPE_API_GATEWAY_STAGE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailOn {
    NonCompliant,
    Never,
}

/// Decoded `ruleParameters`. Accepted by every rule; the access-logging rule reads none.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleParameters(BTreeMap<String, String>);

impl RuleParameters {
    pub fn new(values: BTreeMap<String, String>) -> Self {
        Self(values)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    pub rule: RuleId,
    /// Resource type stamped on verdicts and used to decide applicability.
    pub resource_type: String,
    pub fail_on: FailOn,
    /// Evaluations per `PutEvaluations` request.
    pub batch_size: usize,
    pub test_mode: bool,
}

impl EffectiveConfig {
    pub fn for_rule(rule: RuleId) -> Self {
        Self {
            profile: "strict".to_string(),
            rule,
            resource_type: rule.resource_type().to_string(),
            fail_on: FailOn::NonCompliant,
            batch_size: 100,
            test_mode: false,
        }
    }
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        EffectiveConfig::for_rule(RuleId::ApiGatewayAccessLogging)
    }
}
