use cfgrule_types::{AccessLogSettings, ConfigurationItem, StageConfiguration};

pub const CAPTURE_TIME: &str = "2021-10-07T04:34:52.542Z";

pub fn stage_item(
    resource_id: &str,
    access_log_settings: Option<AccessLogSettings>,
) -> ConfigurationItem<StageConfiguration> {
    ConfigurationItem {
        resource_type: Some("AWS::ApiGateway::Stage".to_string()),
        resource_id: resource_id.to_string(),
        resource_name: None,
        aws_account_id: None,
        aws_region: None,
        configuration_item_capture_time: Some(CAPTURE_TIME.to_string()),
        configuration_item_status: None,
        configuration: StageConfiguration {
            stage_name: Some("Dev".to_string()),
            rest_api_id: Some("test".to_string()),
            deployment_id: None,
            access_log_settings,
        },
    }
}

pub fn settings(format: Option<&str>, destination_arn: Option<&str>) -> AccessLogSettings {
    AccessLogSettings::new(format, destination_arn)
}
