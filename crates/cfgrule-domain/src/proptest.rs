//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - presence of access log settings deciding compliance
//! - annotations appearing exactly on NON_COMPLIANT verdicts
//! - idempotent, order-independent evaluation

use crate::engine::{evaluate_all, evaluate_compliance};
use crate::policy::{EffectiveConfig, RuleParameters};
use crate::test_support::{settings, stage_item};
use cfgrule_types::{AccessLogSettings, ComplianceType};
use proptest::prelude::*;
use serde_json::json;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

/// Resource ids as API Gateway mints them, plus arbitrary printable noise.
fn arb_resource_id() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("ags-[a-z0-9]{8}-[A-Za-z]{1,12}").unwrap(),
        prop::string::string_regex("[ -~]{1,64}").unwrap(),
    ]
}

fn arb_text() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ -~]{0,40}").unwrap()
}

/// Settings with at least one sub-field set. Formats are deliberately not valid JSON.
fn arb_non_empty_settings() -> impl Strategy<Value = AccessLogSettings> {
    prop_oneof![
        (arb_text(), arb_text()).prop_map(|(f, d)| settings(Some(&f), Some(&d))),
        arb_text().prop_map(|f| settings(Some(&f), None)),
        arb_text().prop_map(|d| settings(None, Some(&d))),
        any::<i64>().prop_map(|n| AccessLogSettings(json!({"format": n}))),
        "[A-Za-z]{1,12}".prop_map(|k| {
            let mut map = serde_json::Map::new();
            map.insert(k, json!("x"));
            AccessLogSettings(serde_json::Value::Object(map))
        }),
    ]
}

/// Settings that should count as missing.
fn arb_missing_settings() -> impl Strategy<Value = Option<AccessLogSettings>> {
    prop_oneof![Just(None), Just(Some(AccessLogSettings::default()))]
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    #[test]
    fn any_non_empty_settings_are_compliant(
        id in arb_resource_id(),
        s in arb_non_empty_settings(),
    ) {
        let item = stage_item(&id, Some(s));
        let verdict =
            evaluate_compliance(&RuleParameters::default(), &item, &EffectiveConfig::default());

        prop_assert_eq!(verdict.compliance_type, ComplianceType::Compliant);
        prop_assert!(verdict.annotation.is_none());
        prop_assert_eq!(&verdict.compliance_resource_id, &id);
        prop_assert_eq!(verdict.compliance_resource_type.as_str(), "AWS::ApiGateway::Stage");
    }

    #[test]
    fn missing_settings_are_non_compliant_with_annotation(
        id in arb_resource_id(),
        s in arb_missing_settings(),
    ) {
        let item = stage_item(&id, s);
        let verdict =
            evaluate_compliance(&RuleParameters::default(), &item, &EffectiveConfig::default());

        prop_assert_eq!(verdict.compliance_type, ComplianceType::NonCompliant);
        prop_assert_eq!(
            verdict.annotation.as_deref(),
            Some("AccessLogSettings are not defined for this stage.")
        );
        prop_assert_eq!(&verdict.compliance_resource_id, &id);
    }

    #[test]
    fn evaluation_is_idempotent(
        id in arb_resource_id(),
        s in prop::option::of(arb_non_empty_settings()),
    ) {
        let item = stage_item(&id, s);
        let cfg = EffectiveConfig::default();
        let first = evaluate_compliance(&RuleParameters::default(), &item, &cfg);
        let second = evaluate_compliance(&RuleParameters::default(), &item, &cfg);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn batch_evaluation_matches_individual_evaluation(
        entries in prop::collection::vec(
            (arb_resource_id(), prop::option::of(arb_non_empty_settings())),
            0..20,
        ),
    ) {
        let items: Vec<_> = entries
            .into_iter()
            .map(|(id, s)| stage_item(&id, s))
            .collect();
        let cfg = EffectiveConfig::default();
        let params = RuleParameters::default();

        let batch = evaluate_all(&params, &items, &cfg);
        prop_assert_eq!(batch.len(), items.len());
        for (item, verdict) in items.iter().zip(&batch) {
            prop_assert_eq!(verdict, &evaluate_compliance(&params, item, &cfg));
            prop_assert_eq!(
                verdict.annotation.is_some(),
                verdict.compliance_type == ComplianceType::NonCompliant
            );
        }
    }
}
