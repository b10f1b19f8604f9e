//! `cfgrule invoke` against recorded AWS Config Lambda events.

use assert_cmd::Command;
use cfgrule_test_util::{
    DEFAULT_RESOURCE_TYPE, assert_customer_error_response, assert_successful_evaluation,
    build_expected_response,
};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(deprecated)]
fn cfgrule_cmd() -> Command {
    Command::cargo_bin("cfgrule").expect("cfgrule binary not found - run `cargo build` first")
}

fn event_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(Path::parent)
        .expect("workspace root")
        .join("tests/fixtures/events")
        .join(name)
}

fn run_invoke(event: &str, extra: &[&str]) -> (i32, Value) {
    let temp = TempDir::new().expect("temp dir");
    let output = cfgrule_cmd()
        .current_dir(temp.path())
        .arg("invoke")
        .arg("--event")
        .arg(event_path(event))
        .args(extra)
        .output()
        .expect("run cfgrule");
    let response = serde_json::from_slice(&output.stdout).expect("response json");
    (output.status.code().unwrap_or(-1), response)
}

#[test]
fn stage_without_access_logging_is_non_compliant() {
    let (code, response) = run_invoke("change_no_settings.json", &[]);
    assert_eq!(code, 0);
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
fn stage_with_access_logging_is_compliant() {
    let (code, response) = run_invoke("change_correct_settings.json", &[]);
    assert_eq!(code, 0);
    let expected =
        build_expected_response("COMPLIANT", "test_correct_settings", DEFAULT_RESOURCE_TYPE, None);
    assert_successful_evaluation(&response, &json!([expected]), 1);
}

#[test]
fn out_of_scope_resource_is_not_applicable() {
    let (code, response) = run_invoke("change_left_scope.json", &[]);
    assert_eq!(code, 0);
    let expected =
        build_expected_response("NOT_APPLICABLE", "test_no_settings", DEFAULT_RESOURCE_TYPE, None);
    assert_successful_evaluation(&response, &json!([expected]), 1);
}

#[test]
fn scheduled_notification_returns_no_evaluations() {
    let (code, response) = run_invoke("scheduled.json", &[]);
    assert_eq!(code, 0);
    assert_eq!(response, json!([]));
}

#[test]
fn malformed_rule_parameters_return_customer_error() {
    let (code, response) = run_invoke("change_bad_parameters.json", &[]);
    assert_eq!(code, 1);
    assert_customer_error_response(&response, Some("InvalidParameterValueException"), None);
}

#[test]
fn event_is_read_from_stdin() {
    let event = std::fs::read_to_string(event_path("change_correct_settings.json"))
        .expect("read event");
    let output = cfgrule_cmd()
        .arg("invoke")
        .write_stdin(event)
        .output()
        .expect("run cfgrule");
    assert!(output.status.success());
    let response: Value = serde_json::from_slice(&output.stdout).expect("response json");
    assert_eq!(response[0]["ComplianceType"], "COMPLIANT");
}

#[test]
fn batches_are_written_with_result_token() {
    let temp = TempDir::new().expect("temp dir");
    let batches_path = temp.path().join("batches.json");

    cfgrule_cmd()
        .current_dir(temp.path())
        .arg("invoke")
        .arg("--event")
        .arg(event_path("change_no_settings.json"))
        .arg("--batches-out")
        .arg(&batches_path)
        .arg("--test-mode")
        .assert()
        .success();

    let batches: Value =
        serde_json::from_str(&std::fs::read_to_string(&batches_path).expect("read batches"))
            .expect("batches json");
    let batches = batches.as_array().expect("array");
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0]["ResultToken"], "token");
    assert_eq!(batches[0]["TestMode"], true);
    assert_eq!(batches[0]["Evaluations"][0]["ComplianceResourceId"], "test_no_settings");
}

#[test]
fn resource_type_override_makes_stage_not_applicable() {
    let (code, response) = run_invoke(
        "change_no_settings.json",
        &["--resource-type", "AWS::ApiGatewayV2::Stage"],
    );
    assert_eq!(code, 0);
    assert_eq!(response[0]["ComplianceType"], "NOT_APPLICABLE");
    assert_eq!(response[0]["ComplianceResourceType"], DEFAULT_RESOURCE_TYPE);
}
