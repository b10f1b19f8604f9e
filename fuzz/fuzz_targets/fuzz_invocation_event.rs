//! Fuzz target for the rule's invocation boundary.
//!
//! Goal: `invoke` must never panic. Any input yields either evaluations or an error response,
//! and successful responses always carry non-empty ordering timestamps.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_invocation_event
//! ```

#![no_main]

use arbitrary::Arbitrary;
use cfgrule_domain::policy::EffectiveConfig;
use cfgrule_types::InvocationResponse;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct EventInput {
    message_type: u8,
    resource_id: String,
    resource_type: Option<String>,
    status: Option<String>,
    access_log_settings: Option<(Option<String>, Option<String>)>,
    rule_parameters: Option<String>,
    event_left_scope: bool,
    raw: Option<String>,
}

fn build_event(input: &EventInput) -> String {
    if let Some(raw) = &input.raw {
        return raw.clone();
    }

    let message_type = match input.message_type % 4 {
        0 => "ConfigurationItemChangeNotification",
        1 => "OversizedConfigurationItemChangeNotification",
        2 => "ScheduledNotification",
        _ => "Unknown",
    };
    let mut configuration = serde_json::json!({"stageName": "fuzz"});
    if let Some((format, destination)) = &input.access_log_settings {
        configuration["accessLogSettings"] =
            serde_json::json!({"format": format, "destinationArn": destination});
    }
    let invoking_event = serde_json::json!({
        "messageType": message_type,
        "configurationItem": {
            "resourceId": input.resource_id,
            "resourceType": input.resource_type,
            "configurationItemStatus": input.status,
            "configuration": configuration,
        },
    });
    serde_json::json!({
        "invokingEvent": invoking_event.to_string(),
        "ruleParameters": input.rule_parameters,
        "eventLeftScope": input.event_left_scope,
        "resultToken": "TESTMODE",
    })
    .to_string()
}

fuzz_target!(|input: EventInput| {
    if input.resource_id.len() > 512 || input.raw.as_ref().is_some_and(|r| r.len() > 4096) {
        return;
    }

    let invocation = cfgrule_app::invoke(&build_event(&input), &EffectiveConfig::default());
    if let InvocationResponse::Evaluations(evaluations) = &invocation.response {
        for e in evaluations {
            assert!(!e.ordering_timestamp.is_empty());
        }
        let batched: usize = invocation.batches.iter().map(|b| b.evaluations.len()).sum();
        assert_eq!(batched, evaluations.len());
    }
});
