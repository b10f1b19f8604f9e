//! Lambda invocation shapes for an AWS Config custom rule.

use crate::config_item::ConfigurationItem;
use crate::ids;
use crate::verdict::Evaluation;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Event AWS Config hands to the rule function.
///
/// `invoking_event` and `rule_parameters` are JSON documents encoded as strings on the wire.
/// `invoking_event` is kept as a raw value so hand-written test events may also inline it as
/// an object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvocationEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_rule_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_rule_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_role_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default)]
    pub event_left_scope: bool,
    pub invoking_event: JsonValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_parameters: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_token: Option<String>,
}

/// Decoded `invokingEvent`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvokingEvent {
    pub message_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration_item: Option<ConfigurationItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration_item_summary: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_creation_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_version: Option<String>,
}

impl InvokingEvent {
    pub fn kind(&self) -> Option<MessageType> {
        MessageType::parse(&self.message_type)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageType {
    ConfigurationItemChange,
    OversizedConfigurationItemChange,
    Scheduled,
}

impl MessageType {
    pub fn parse(v: &str) -> Option<Self> {
        match v {
            ids::MESSAGE_CONFIGURATION_ITEM_CHANGE => Some(MessageType::ConfigurationItemChange),
            ids::MESSAGE_OVERSIZED_CONFIGURATION_ITEM_CHANGE => {
                Some(MessageType::OversizedConfigurationItemChange)
            }
            ids::MESSAGE_SCHEDULED => Some(MessageType::Scheduled),
            _ => None,
        }
    }
}

/// Error payload returned by the rule function instead of evaluations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub customer_error_code: String,
    pub customer_error_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_error_details: Option<String>,
}

/// What one invocation produces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum InvocationResponse {
    Evaluations(Vec<Evaluation>),
    Error(ErrorResponse),
}

/// One `PutEvaluations` call worth of evaluations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct PutEvaluationsRequest {
    pub evaluations: Vec<Evaluation>,
    pub result_token: String,
    pub test_mode: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_lambda_event_with_string_invoking_event() {
        let event: InvocationEvent = serde_json::from_value(json!({
            "configRuleName": "myrule",
            "executionRoleArn": "roleArn",
            "eventLeftScope": false,
            "invokingEvent": json!({
                "messageType": "ScheduledNotification",
                "notificationCreationTime": "2017-12-23T22:11:18.158Z"
            })
            .to_string(),
            "accountId": "123456789012",
            "configRuleArn": "arn:aws:config:us-east-1:123456789012:config-rule/config-rule-8fngan",
            "resultToken": "token"
        }))
        .expect("decode event");

        assert_eq!(event.config_rule_name.as_deref(), Some("myrule"));
        assert!(event.invoking_event.is_string());
        assert!(event.rule_parameters.is_none());
    }

    #[test]
    fn message_types_parse() {
        assert_eq!(
            MessageType::parse("ConfigurationItemChangeNotification"),
            Some(MessageType::ConfigurationItemChange)
        );
        assert_eq!(
            MessageType::parse("OversizedConfigurationItemChangeNotification"),
            Some(MessageType::OversizedConfigurationItemChange)
        );
        assert_eq!(
            MessageType::parse("ScheduledNotification"),
            Some(MessageType::Scheduled)
        );
        assert_eq!(MessageType::parse("Bogus"), None);
    }

    #[test]
    fn error_response_uses_camel_case_keys() {
        let resp = InvocationResponse::Error(ErrorResponse {
            customer_error_code: "InternalError".to_string(),
            customer_error_message: "InternalError".to_string(),
            internal_error_message: Some("Unexpected message type".to_string()),
            internal_error_details: None,
        });
        assert_eq!(
            serde_json::to_value(&resp).expect("serialize"),
            json!({
                "customerErrorCode": "InternalError",
                "customerErrorMessage": "InternalError",
                "internalErrorMessage": "Unexpected message type"
            })
        );
    }
}
