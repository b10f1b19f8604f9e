//! Configuration items as delivered by AWS Config.
//!
//! `ConfigurationItem` is generic over the resource-specific `configuration` payload. The
//! invocation boundary decodes it as raw JSON first (any resource type may arrive) and only
//! narrows it to [`StageConfiguration`] once the item is known to be applicable.

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ConfigurationItemStatus {
    #[serde(rename = "OK")]
    Ok,
    ResourceDiscovered,
    ResourceNotRecorded,
    ResourceDeleted,
    ResourceDeletedNotRecorded,
    /// Any status string this crate does not know yet.
    #[serde(other)]
    Unknown,
}

impl ConfigurationItemStatus {
    pub fn is_deleted(self) -> bool {
        matches!(
            self,
            ConfigurationItemStatus::ResourceDeleted
                | ConfigurationItemStatus::ResourceDeletedNotRecorded
        )
    }
}

/// Point-in-time snapshot of a monitored resource.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationItem<C = JsonValue> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    pub resource_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration_item_capture_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration_item_status: Option<ConfigurationItemStatus>,
    pub configuration: C,
}

impl<C> ConfigurationItem<C> {
    /// Swap the configuration payload, keeping the envelope fields.
    pub fn with_configuration<D>(self, configuration: D) -> ConfigurationItem<D> {
        ConfigurationItem {
            resource_type: self.resource_type,
            resource_id: self.resource_id,
            resource_name: self.resource_name,
            aws_account_id: self.aws_account_id,
            aws_region: self.aws_region,
            configuration_item_capture_time: self.configuration_item_capture_time,
            configuration_item_status: self.configuration_item_status,
            configuration,
        }
    }
}

impl ConfigurationItem<JsonValue> {
    /// Decode the raw `configuration` mapping into a typed resource configuration.
    pub fn decode_configuration<D: DeserializeOwned>(
        self,
    ) -> Result<ConfigurationItem<D>, serde_json::Error> {
        let raw = if self.configuration.is_null() {
            JsonValue::Object(serde_json::Map::new())
        } else {
            self.configuration.clone()
        };
        let configuration = serde_json::from_value(raw)?;
        Ok(self.with_configuration(configuration))
    }
}

/// `configuration` of an `AWS::ApiGateway::Stage` item (fields this crate reads).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StageConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_api_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_log_settings: Option<AccessLogSettings>,
}

/// Where and how a stage writes its request logs.
///
/// Kept as the raw JSON value: compliance depends only on whether settings are there,
/// so sub-fields of any shape (a numeric `format`, keys this crate has never seen) are
/// carried verbatim and never rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct AccessLogSettings(pub JsonValue);

impl AccessLogSettings {
    pub fn new(format: Option<&str>, destination_arn: Option<&str>) -> Self {
        let mut map = serde_json::Map::new();
        if let Some(format) = format {
            map.insert("format".to_string(), JsonValue::from(format));
        }
        if let Some(arn) = destination_arn {
            map.insert("destinationArn".to_string(), JsonValue::from(arn));
        }
        AccessLogSettings(JsonValue::Object(map))
    }

    /// `format`, when it is a string.
    pub fn format(&self) -> Option<&str> {
        self.0.get("format").and_then(JsonValue::as_str)
    }

    /// `destinationArn`, when it is a string.
    pub fn destination_arn(&self) -> Option<&str> {
        self.0.get("destinationArn").and_then(JsonValue::as_str)
    }

    /// True for `null` and `{}`; any other value counts as configured.
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            JsonValue::Null => true,
            JsonValue::Object(map) => map.is_empty(),
            _ => false,
        }
    }
}
