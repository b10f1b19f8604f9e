//! Shared test utilities for the cfgrule workspace.
//!
//! Lives in its own crate because `xtask` and the CLI integration tests need the same
//! normalization and event builders as the unit tests in `cfgrule-app`.

use serde_json::{Value, json};

pub const DEFAULT_RESOURCE_TYPE: &str = "AWS::ApiGateway::Stage";

/// Notification time stamped on events built by [`change_event`] and [`scheduled_event`].
pub const NOTIFICATION_CREATION_TIME: &str = "2017-12-23T22:11:18.158Z";

const TIMESTAMP_PLACEHOLDER: &str = "__TIMESTAMP__";

/// Lambda event for a `ConfigurationItemChangeNotification` carrying `item`.
pub fn change_event(item: &Value, rule_parameters: Option<&str>) -> Value {
    let invoking_event = json!({
        "configurationItem": item,
        "notificationCreationTime": NOTIFICATION_CREATION_TIME,
        "messageType": "ConfigurationItemChangeNotification",
    });
    lambda_event(invoking_event.to_string(), rule_parameters)
}

/// Lambda event for a periodic `ScheduledNotification`.
pub fn scheduled_event(rule_parameters: Option<&str>) -> Value {
    let invoking_event = json!({
        "messageType": "ScheduledNotification",
        "notificationCreationTime": NOTIFICATION_CREATION_TIME,
    });
    lambda_event(invoking_event.to_string(), rule_parameters)
}

fn lambda_event(invoking_event: String, rule_parameters: Option<&str>) -> Value {
    let mut event = json!({
        "configRuleName": "myrule",
        "executionRoleArn": "roleArn",
        "eventLeftScope": false,
        "invokingEvent": invoking_event,
        "accountId": "123456789012",
        "configRuleArn": "arn:aws:config:us-east-1:123456789012:config-rule/config-rule-8fngan",
        "resultToken": "token",
    });
    if let Some(params) = rule_parameters {
        event["ruleParameters"] = Value::String(params.to_string());
    }
    event
}

/// Expected evaluation, without the ordering timestamp (checked for presence only).
pub fn build_expected_response(
    compliance_type: &str,
    resource_id: &str,
    resource_type: &str,
    annotation: Option<&str>,
) -> Value {
    let mut expected = json!({
        "ComplianceType": compliance_type,
        "ComplianceResourceId": resource_id,
        "ComplianceResourceType": resource_type,
    });
    if let Some(annotation) = annotation {
        expected["Annotation"] = Value::String(annotation.to_string());
    }
    expected
}

/// Compare serialized evaluations against [`build_expected_response`] values.
///
/// `response` and `expected` may each be a single evaluation object or an array of them.
/// Annotations must match whenever either side has one.
pub fn assert_successful_evaluation(response: &Value, expected: &Value, evaluations_count: usize) {
    let actual = as_list(response);
    let expected = as_list(expected);
    assert_eq!(
        actual.len(),
        evaluations_count,
        "evaluation count mismatch in {response}"
    );
    for (i, (actual, expected)) in actual.iter().zip(expected.iter()).enumerate() {
        for key in [
            "ComplianceResourceType",
            "ComplianceResourceId",
            "ComplianceType",
        ] {
            assert_eq!(actual[key], expected[key], "evaluation {i}: {key}");
        }
        let timestamp = actual["OrderingTimestamp"].as_str().unwrap_or_default();
        assert!(!timestamp.is_empty(), "evaluation {i}: OrderingTimestamp missing");
        if actual.get("Annotation").is_some() || expected.get("Annotation").is_some() {
            assert_eq!(actual["Annotation"], expected["Annotation"], "evaluation {i}: Annotation");
        }
    }
}

/// Check an error response object; `None` arguments only require a non-empty field.
pub fn assert_customer_error_response(
    response: &Value,
    customer_error_code: Option<&str>,
    customer_error_message: Option<&str>,
) {
    let field = |key: &str| response[key].as_str().unwrap_or_default().to_string();
    if let Some(code) = customer_error_code {
        assert_eq!(field("customerErrorCode"), code);
    }
    if let Some(message) = customer_error_message {
        assert_eq!(field("customerErrorMessage"), message);
    }
    assert!(!field("customerErrorCode").is_empty(), "customerErrorCode missing");
    assert!(!field("customerErrorMessage").is_empty(), "customerErrorMessage missing");
    for optional in ["internalErrorMessage", "internalErrorDetails"] {
        if response.get(optional).is_some() {
            assert!(!field(optional).is_empty(), "{optional} present but empty");
        }
    }
}

fn as_list(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        other => vec![other.clone()],
    }
}

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// `tool.version` is replaced only on a root report envelope. Timestamps (`started_at`,
/// `finished_at`, `OrderingTimestamp`) are replaced at any depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope = ["schema", "tool", "verdict", "evaluations", "data"]
            .iter()
            .all(|k| obj.contains_key(*k));
        if is_envelope
            && let Some(tool) = obj.get_mut("tool").and_then(Value::as_object_mut)
            && tool.contains_key("version")
        {
            tool.insert(
                "version".to_string(),
                Value::String("__VERSION__".to_string()),
            );
        }
    }
    normalize_timestamps(&mut value);
    value
}

fn normalize_timestamps(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "finished_at", "OrderingTimestamp"] {
                if let Some(v) = map.get_mut(key) {
                    *v = Value::String(TIMESTAMP_PLACEHOLDER.to_string());
                }
            }
            map.values_mut().for_each(normalize_timestamps);
        }
        Value::Array(items) => items.iter_mut().for_each(normalize_timestamps),
        _ => {}
    }
}
