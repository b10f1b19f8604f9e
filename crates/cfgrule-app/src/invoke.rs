//! The rule's invocation boundary: AWS Config event in, evaluations (or an error response) out.
//!
//! Everything the pure evaluator deliberately ignores is handled here: decoding the string-encoded
//! `invokingEvent` and `ruleParameters`, message types, applicability, ordering timestamps, and
//! splitting evaluations into `PutEvaluations` batches.

use crate::error::InvocationError;
use cfgrule_domain::policy::{EffectiveConfig, RuleParameters};
use cfgrule_types::{
    ComplianceVerdict, ConfigurationItem, Evaluation, InvocationEvent, InvocationResponse,
    InvokingEvent, MessageType, PutEvaluationsRequest, StageConfiguration,
};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info, warn};

/// Result token AWS Config test harnesses pass when evaluations must not be recorded.
pub const TEST_MODE_RESULT_TOKEN: &str = "TESTMODE";

/// Full outcome of one invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub response: InvocationResponse,
    /// `PutEvaluations` requests the caller should submit (empty on error).
    pub batches: Vec<PutEvaluationsRequest>,
}

/// One item's evaluation plus the finding code explaining a NON_COMPLIANT verdict.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemOutcome {
    pub evaluation: Evaluation,
    pub code: Option<&'static str>,
}

/// Decode a raw Lambda event and run it. Never fails: errors become an error response.
pub fn invoke(event_json: &str, cfg: &EffectiveConfig) -> Invocation {
    let outcome = serde_json::from_str::<InvocationEvent>(event_json)
        .map_err(InvocationError::MalformedEvent)
        .and_then(|event| {
            let evaluations = handle_event(&event, cfg)?;
            Ok((event, evaluations))
        });

    match outcome {
        Ok((event, evaluations)) => {
            let batches = plan_put_evaluations(&evaluations, event.result_token.as_deref(), cfg);
            Invocation {
                response: InvocationResponse::Evaluations(evaluations),
                batches,
            }
        }
        Err(err) => {
            if err.is_customer_error() {
                warn!(error = %err, "rule invocation rejected");
            } else {
                warn!(error = %err, "rule invocation failed");
            }
            Invocation {
                response: InvocationResponse::Error(err.to_error_response()),
                batches: Vec::new(),
            }
        }
    }
}

/// Evaluate the resource an invocation event refers to.
///
/// Scheduled notifications yield no evaluations: this rule is triggered by configuration changes.
pub fn handle_event(
    event: &InvocationEvent,
    cfg: &EffectiveConfig,
) -> Result<Vec<Evaluation>, InvocationError> {
    let invoking = decode_invoking_event(&event.invoking_event)?;
    let params = decode_rule_parameters(event.rule_parameters.as_deref())?;

    info!(
        rule = cfg.rule.as_str(),
        config_rule = event.config_rule_name.as_deref().unwrap_or(""),
        message_type = %invoking.message_type,
        "rule invoked"
    );

    match invoking.kind() {
        Some(MessageType::ConfigurationItemChange) => {
            let item = invoking
                .configuration_item
                .ok_or(InvocationError::MissingConfigurationItem)?;
            let outcome = evaluate_item(
                item,
                &params,
                event.event_left_scope,
                invoking.notification_creation_time.as_deref(),
                cfg,
            )?;
            Ok(vec![outcome.evaluation])
        }
        Some(MessageType::OversizedConfigurationItemChange) => {
            Err(InvocationError::OversizedConfigurationItem)
        }
        Some(MessageType::Scheduled) => {
            debug!("scheduled notification ignored by change-triggered rule");
            Ok(Vec::new())
        }
        None => Err(InvocationError::UnexpectedMessageType(invoking.message_type)),
    }
}

/// Evaluate one raw configuration item, deciding applicability first.
///
/// `fallback_time` orders the evaluation when the item has no capture time; failing both, the
/// current time is used.
pub fn evaluate_item(
    item: ConfigurationItem,
    params: &RuleParameters,
    event_left_scope: bool,
    fallback_time: Option<&str>,
    cfg: &EffectiveConfig,
) -> Result<ItemOutcome, InvocationError> {
    let ordering_timestamp =
        ordering_timestamp(item.configuration_item_capture_time.as_deref(), fallback_time);

    if let Some(reason) = not_applicable_reason(&item, event_left_scope, cfg) {
        let resource_type = item
            .resource_type
            .clone()
            .unwrap_or_else(|| cfg.resource_type.clone());
        debug!(resource_id = %item.resource_id, reason, "resource not applicable");
        return Ok(ItemOutcome {
            evaluation: ComplianceVerdict::not_applicable(resource_type, item.resource_id)
                .at(ordering_timestamp),
            code: None,
        });
    }

    let resource_id = item.resource_id.clone();
    let item: ConfigurationItem<StageConfiguration> = item
        .decode_configuration()
        .map_err(|source| InvocationError::MalformedConfiguration {
            resource_id,
            source,
        })?;

    let assessment = cfgrule_domain::assess(params, &item, cfg);
    debug!(
        resource_id = %item.resource_id,
        compliance = assessment.verdict.compliance_type.as_str(),
        "resource evaluated"
    );

    Ok(ItemOutcome {
        evaluation: assessment.verdict.at(ordering_timestamp),
        code: assessment.code,
    })
}

fn not_applicable_reason(
    item: &ConfigurationItem,
    event_left_scope: bool,
    cfg: &EffectiveConfig,
) -> Option<&'static str> {
    if event_left_scope {
        return Some("resource left the rule's scope");
    }
    if item
        .configuration_item_status
        .is_some_and(|status| status.is_deleted())
    {
        return Some("resource deleted");
    }
    match item.resource_type.as_deref() {
        Some(rt) if rt != cfg.resource_type => Some("resource type not evaluated by this rule"),
        _ => None,
    }
}

fn decode_invoking_event(raw: &JsonValue) -> Result<InvokingEvent, InvocationError> {
    match raw {
        JsonValue::String(text) => serde_json::from_str(text),
        other => serde_json::from_value(other.clone()),
    }
    .map_err(InvocationError::MalformedInvokingEvent)
}

/// Decode the string-encoded `ruleParameters` object.
///
/// Absent or blank parameters are empty. Scalar values are kept as their JSON text; nested
/// arrays or objects are rejected.
pub fn decode_rule_parameters(raw: Option<&str>) -> Result<RuleParameters, InvocationError> {
    let Some(text) = raw.filter(|t| !t.trim().is_empty()) else {
        return Ok(RuleParameters::default());
    };

    let value: JsonValue = serde_json::from_str(text)
        .map_err(|e| InvocationError::InvalidRuleParameters(format!("not valid JSON: {e}")))?;
    let JsonValue::Object(map) = value else {
        return Err(InvocationError::InvalidRuleParameters(
            "ruleParameters must be a JSON object".to_string(),
        ));
    };

    let mut out = BTreeMap::new();
    for (key, value) in map {
        let text = match value {
            JsonValue::String(s) => s,
            JsonValue::Bool(_) | JsonValue::Number(_) | JsonValue::Null => value.to_string(),
            JsonValue::Array(_) | JsonValue::Object(_) => {
                return Err(InvocationError::InvalidRuleParameters(format!(
                    "rule parameter {key} must be a scalar"
                )));
            }
        };
        out.insert(key, text);
    }
    Ok(RuleParameters::new(out))
}

fn ordering_timestamp(capture_time: Option<&str>, fallback_time: Option<&str>) -> String {
    capture_time
        .into_iter()
        .chain(fallback_time)
        .find(|t| !t.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(now_rfc3339)
}

fn now_rfc3339() -> String {
    let now = OffsetDateTime::now_utc();
    now.format(&Rfc3339)
        .unwrap_or_else(|_| now.unix_timestamp().to_string())
}

/// Split evaluations into `PutEvaluations` requests of at most `cfg.batch_size` entries.
pub fn plan_put_evaluations(
    evaluations: &[Evaluation],
    result_token: Option<&str>,
    cfg: &EffectiveConfig,
) -> Vec<PutEvaluationsRequest> {
    let token = result_token.unwrap_or(TEST_MODE_RESULT_TOKEN);
    let test_mode = cfg.test_mode || token == TEST_MODE_RESULT_TOKEN;

    evaluations
        .chunks(cfg.batch_size.max(1))
        .map(|chunk| PutEvaluationsRequest {
            evaluations: chunk.to_vec(),
            result_token: token.to_string(),
            test_mode,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfgrule_test_util::{
        assert_successful_evaluation, build_expected_response, change_event, scheduled_event,
    };
    use cfgrule_types::ComplianceType;
    use serde_json::json;

    const DEFAULT_RESOURCE_TYPE: &str = "AWS::ApiGateway::Stage";

    fn item_no_settings() -> JsonValue {
        json!({
            "resourceType": "AWS::ApiGateway::Stage",
            "resourceId": "test_no_settings",
            "configurationItemCaptureTime": "2021-10-07T04:34:52.542Z",
            "configuration": {"stageName": "Dev", "restApiId": "test"}
        })
    }

    fn item_correct_settings() -> JsonValue {
        json!({
            "resourceType": "AWS::ApiGateway::Stage",
            "resourceId": "test_correct_settings",
            "configurationItemCaptureTime": "2021-10-07T04:34:52.542Z",
            "configuration": {
                "stageName": "Dev",
                "restApiId": "test",
                "accessLogSettings": {"format": "blah!", "destinationArn": "Blah!"}
            }
        })
    }

    fn evaluations(invocation: &Invocation) -> &[Evaluation] {
        match &invocation.response {
            InvocationResponse::Evaluations(e) => e,
            InvocationResponse::Error(e) => panic!("unexpected error response: {e:?}"),
        }
    }

    #[test]
    fn change_notification_without_settings_is_non_compliant() {
        let event = change_event(&item_no_settings(), None);
        let invocation = invoke(&event.to_string(), &EffectiveConfig::default());

        let response = serde_json::to_value(evaluations(&invocation)).expect("serialize");
        let expected = build_expected_response(
            "NON_COMPLIANT",
            "test_no_settings",
            DEFAULT_RESOURCE_TYPE,
            Some("AccessLogSettings are not defined for this stage."),
        );
        assert_successful_evaluation(&response, &json!([expected]), 1);
        assert_eq!(response[0]["OrderingTimestamp"], "2021-10-07T04:34:52.542Z");
    }

    #[test]
    fn change_notification_with_settings_is_compliant() {
        let event = change_event(&item_correct_settings(), None);
        let invocation = invoke(&event.to_string(), &EffectiveConfig::default());

        let response = serde_json::to_value(evaluations(&invocation)).expect("serialize");
        let expected = build_expected_response(
            "COMPLIANT",
            "test_correct_settings",
            DEFAULT_RESOURCE_TYPE,
            None,
        );
        assert_successful_evaluation(&response, &json!([expected]), 1);
    }

    #[test]
    fn invoking_event_may_be_inlined_as_object() {
        let mut event = change_event(&item_correct_settings(), None);
        let inline: JsonValue =
            serde_json::from_str(event["invokingEvent"].as_str().expect("string")).expect("json");
        event["invokingEvent"] = inline;

        let invocation = invoke(&event.to_string(), &EffectiveConfig::default());
        assert_eq!(
            evaluations(&invocation)[0].verdict.compliance_type,
            ComplianceType::Compliant
        );
    }

    #[test]
    fn event_left_scope_is_not_applicable() {
        let mut event = change_event(&item_no_settings(), None);
        event["eventLeftScope"] = json!(true);

        let invocation = invoke(&event.to_string(), &EffectiveConfig::default());
        let e = &evaluations(&invocation)[0];
        assert_eq!(e.verdict.compliance_type, ComplianceType::NotApplicable);
        assert_eq!(e.verdict.compliance_resource_id, "test_no_settings");
        assert!(e.verdict.annotation.is_none());
    }

    #[test]
    fn deleted_resource_is_not_applicable() {
        let mut item = item_no_settings();
        item["configurationItemStatus"] = json!("ResourceDeleted");
        let event = change_event(&item, None).to_string();
        let invocation = invoke(&event, &EffectiveConfig::default());
        assert_eq!(
            evaluations(&invocation)[0].verdict.compliance_type,
            ComplianceType::NotApplicable
        );
    }

    #[test]
    fn other_resource_types_are_not_applicable_under_their_own_type() {
        let item = json!({
            "resourceType": "AWS::S3::Bucket",
            "resourceId": "my-bucket",
            "configurationItemCaptureTime": "2021-10-07T04:34:52.542Z",
            "configuration": {"name": "my-bucket"}
        });
        let event = change_event(&item, None).to_string();
        let invocation = invoke(&event, &EffectiveConfig::default());
        let e = &evaluations(&invocation)[0];
        assert_eq!(e.verdict.compliance_type, ComplianceType::NotApplicable);
        assert_eq!(e.verdict.compliance_resource_type, "AWS::S3::Bucket");
    }

    #[test]
    fn scheduled_notification_yields_no_evaluations() {
        let invocation = invoke(&scheduled_event(None).to_string(), &EffectiveConfig::default());
        assert!(evaluations(&invocation).is_empty());
        assert!(invocation.batches.is_empty());
    }

    #[test]
    fn unexpected_message_type_is_internal_error() {
        let event = json!({
            "invokingEvent": "{\"messageType\":\"SomethingElse\"}",
            "resultToken": "token"
        });
        let invocation = invoke(&event.to_string(), &EffectiveConfig::default());
        let InvocationResponse::Error(err) = &invocation.response else {
            panic!("expected error response");
        };
        assert_eq!(err.customer_error_code, "InternalError");
        assert_eq!(err.internal_error_message.as_deref(), Some("Unexpected message type"));
        assert_eq!(err.internal_error_details.as_deref(), Some("SomethingElse"));
    }

    #[test]
    fn oversized_notification_is_internal_error() {
        let event = json!({
            "invokingEvent": json!({
                "messageType": "OversizedConfigurationItemChangeNotification",
                "configurationItemSummary": {"resourceId": "x"}
            }).to_string()
        });
        let invocation = invoke(&event.to_string(), &EffectiveConfig::default());
        assert!(matches!(invocation.response, InvocationResponse::Error(_)));
    }

    #[test]
    fn malformed_rule_parameters_are_customer_errors() {
        let event = change_event(&item_no_settings(), Some("[1, 2]"));
        let invocation = invoke(&event.to_string(), &EffectiveConfig::default());
        let InvocationResponse::Error(err) = &invocation.response else {
            panic!("expected error response");
        };
        assert_eq!(err.customer_error_code, "InvalidParameterValueException");
        assert!(!err.customer_error_message.is_empty());
    }

    #[test]
    fn settings_with_non_string_format_are_compliant() {
        for settings in [
            json!({"format": 123, "destinationArn": "arn"}),
            json!({"format": {"requestId": "$context.requestId"}, "destinationArn": "arn"}),
            json!("enabled"),
        ] {
            let mut item = item_no_settings();
            item["configuration"]["accessLogSettings"] = settings;
            let event = change_event(&item, None).to_string();
            let invocation = invoke(&event, &EffectiveConfig::default());
            let e = &evaluations(&invocation)[0];
            assert_eq!(e.verdict.compliance_type, ComplianceType::Compliant);
            assert!(e.verdict.annotation.is_none());
        }
    }

    #[test]
    fn settings_with_unrecognised_keys_are_compliant() {
        let mut item = item_no_settings();
        item["configuration"]["accessLogSettings"] = json!({"Format": "x", "DestinationArn": "y"});
        let event = change_event(&item, None).to_string();
        let invocation = invoke(&event, &EffectiveConfig::default());
        assert_eq!(
            evaluations(&invocation)[0].verdict.compliance_type,
            ComplianceType::Compliant
        );
    }

    #[test]
    fn empty_or_null_settings_are_non_compliant() {
        for settings in [json!({}), JsonValue::Null] {
            let mut item = item_no_settings();
            item["configuration"]["accessLogSettings"] = settings;
            let event = change_event(&item, None).to_string();
            let invocation = invoke(&event, &EffectiveConfig::default());
            assert_eq!(
                evaluations(&invocation)[0].verdict.compliance_type,
                ComplianceType::NonCompliant
            );
        }
    }

    #[test]
    fn malformed_stage_configuration_is_internal_error() {
        let mut item = item_no_settings();
        item["configuration"] = json!(["not", "a", "mapping"]);
        let event = change_event(&item, None).to_string();
        let invocation = invoke(&event, &EffectiveConfig::default());
        let InvocationResponse::Error(err) = &invocation.response else {
            panic!("expected error response");
        };
        assert_eq!(err.customer_error_code, "InternalError");
        assert!(
            err.internal_error_message
                .as_deref()
                .is_some_and(|m| m.contains("test_no_settings"))
        );
    }

    #[test]
    fn garbage_event_is_internal_error() {
        let invocation = invoke("not json", &EffectiveConfig::default());
        assert!(matches!(invocation.response, InvocationResponse::Error(_)));
    }

    #[test]
    fn rule_parameters_decode_scalars() {
        let params =
            decode_rule_parameters(Some(r#"{"a": "x", "b": 3, "c": true}"#)).expect("decode");
        assert_eq!(params.get("a"), Some("x"));
        assert_eq!(params.get("b"), Some("3"));
        assert_eq!(params.get("c"), Some("true"));
        assert!(decode_rule_parameters(Some("  ")).expect("blank").is_empty());
        assert!(decode_rule_parameters(None).expect("none").is_empty());
        assert!(decode_rule_parameters(Some(r#"{"a": {"b": 1}}"#)).is_err());
        assert!(decode_rule_parameters(Some("{")).is_err());
    }

    #[test]
    fn ordering_timestamp_falls_back_to_notification_then_now() {
        assert_eq!(ordering_timestamp(Some("t1"), Some("t2")), "t1");
        assert_eq!(ordering_timestamp(Some(""), Some("t2")), "t2");
        assert_eq!(ordering_timestamp(None, Some("t2")), "t2");
        assert!(!ordering_timestamp(None, None).is_empty());
    }

    #[test]
    fn item_without_capture_time_uses_notification_time() {
        let mut item = item_no_settings();
        item.as_object_mut()
            .expect("object")
            .remove("configurationItemCaptureTime");
        let event = change_event(&item, None).to_string();
        let invocation = invoke(&event, &EffectiveConfig::default());
        assert_eq!(
            evaluations(&invocation)[0].ordering_timestamp,
            "2017-12-23T22:11:18.158Z"
        );
    }

    #[test]
    fn evaluations_are_planned_into_batches() {
        let evaluations: Vec<Evaluation> = (0..250)
            .map(|i| {
                ComplianceVerdict::compliant(DEFAULT_RESOURCE_TYPE, format!("stage-{i}"))
                    .at("2021-10-07T04:34:52.542Z")
            })
            .collect();

        let batches =
            plan_put_evaluations(&evaluations, Some("token"), &EffectiveConfig::default());
        let sizes: Vec<usize> = batches.iter().map(|b| b.evaluations.len()).collect();
        assert_eq!(sizes, vec![100, 100, 50]);
        assert!(batches.iter().all(|b| b.result_token == "token" && !b.test_mode));

        let cfg = EffectiveConfig {
            batch_size: 40,
            test_mode: true,
            ..EffectiveConfig::default()
        };
        let batches = plan_put_evaluations(&evaluations[..80], Some("token"), &cfg);
        assert_eq!(batches.len(), 2);
        assert!(batches.iter().all(|b| b.test_mode));

        assert!(plan_put_evaluations(&[], Some("token"), &cfg).is_empty());
    }

    #[test]
    fn testmode_token_marks_requests_as_test_mode() {
        let evaluations = vec![ComplianceVerdict::compliant(DEFAULT_RESOURCE_TYPE, "s").at("t")];
        let batches = plan_put_evaluations(&evaluations, None, &EffectiveConfig::default());
        assert_eq!(batches[0].result_token, "TESTMODE");
        assert!(batches[0].test_mode);
    }

    #[test]
    fn successful_invocation_plans_batches_with_event_token() {
        let event = change_event(&item_no_settings(), None);
        let invocation = invoke(&event.to_string(), &EffectiveConfig::default());
        assert_eq!(invocation.batches.len(), 1);
        assert_eq!(invocation.batches[0].result_token, "token");
        assert_eq!(invocation.batches[0].evaluations.len(), 1);
    }
}
