//! Explain registry for rules and codes.
//!
//! Maps rule IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a rule or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the rule/code.
    pub title: &'static str,
    /// What the rule checks and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after configuration examples.
    pub examples: ExamplePair,
}

/// Before and after configuration examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Configuration that is reported NON_COMPLIANT.
    pub before: &'static str,
    /// Configuration that is reported COMPLIANT.
    pub after: &'static str,
}

/// Look up an explanation by rule id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Rules
        ids::RULE_API_GATEWAY_ACCESS_LOGGING => Some(explain_api_gateway_access_logging()),

        // Codes
        ids::CODE_ACCESS_LOG_SETTINGS_MISSING => Some(explain_access_log_settings_missing()),

        _ => None,
    }
}

/// List all known rule IDs.
pub fn all_rule_ids() -> &'static [&'static str] {
    &[ids::RULE_API_GATEWAY_ACCESS_LOGGING]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[ids::CODE_ACCESS_LOG_SETTINGS_MISSING]
}

fn explain_api_gateway_access_logging() -> Explanation {
    Explanation {
        title: "API Gateway Stage Access Logging",
        description: "\
Evaluates every `AWS::ApiGateway::Stage` configuration item and reports the stage
NON_COMPLIANT when its configuration has no `accessLogSettings`.

Without access logs there is no record of who called the API, from where, and with
which result:
- incident response cannot reconstruct request history
- abuse and credential misuse go unnoticed
- audits that require request logging for public endpoints fail

The rule only checks that access logging is configured. The log `format` string is
not validated; a stage with any non-empty `accessLogSettings` is COMPLIANT.",
        remediation: "\
Enable access logging on the stage and send it to a CloudWatch Logs group or
Kinesis Data Firehose stream:

    aws apigateway update-stage --rest-api-id <api> --stage-name <stage> \\
      --patch-operations op=replace,path=/accessLogSettings/destinationArn,value=<arn> \\
                         op=replace,path=/accessLogSettings/format,value='<format>'

In infrastructure code, set `accessLogSetting` / `AccessLogSetting` on the stage
resource. Prefer a structured (JSON) format so logs can be queried.",
        examples: ExamplePair {
            before: r#"{
  "stageName": "Dev",
  "restApiId": "a1b2c3"
}"#,
            after: r#"{
  "stageName": "Dev",
  "restApiId": "a1b2c3",
  "accessLogSettings": {
    "format": "{\"requestId\":\"$context.requestId\",\"status\":\"$context.status\"}",
    "destinationArn": "arn:aws:logs:us-east-1:123456789012:log-group:api-access"
  }
}"#,
        },
    }
}

fn explain_access_log_settings_missing() -> Explanation {
    let mut exp = explain_api_gateway_access_logging();
    exp.title = "AccessLogSettings Not Defined";
    exp
}
