use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `cfgrule.toml` schema v1.
///
/// This is a *user-facing* config model: every field is optional and falls back to the profile.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CfgruleConfigV1 {
    /// Optional schema string for tooling (`cfgrule.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// `strict` (default) or `audit`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Rule to evaluate, e.g. `api-gateway-access-logging`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,

    /// Resource type evaluated and stamped on verdicts, e.g. `AWS::ApiGateway::Stage`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,

    /// When `cfgrule check` fails: `non_compliant` or `never`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on: Option<String>,

    /// Evaluations per `PutEvaluations` request (1..=100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<u32>,

    /// Mark `PutEvaluations` requests as test mode (validated by AWS Config, not recorded).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_mode: Option<bool>,
}
