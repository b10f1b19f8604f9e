//! Stable identifiers for rules, finding codes and AWS Config constants.
//!
//! Rule ids are kebab-case (they double as the Config rule name). `code` is a short snake_case
//! discriminator for the condition that produced a NON_COMPLIANT verdict.

// Rules
pub const RULE_API_GATEWAY_ACCESS_LOGGING: &str = "api-gateway-access-logging";

// Codes: api-gateway-access-logging
pub const CODE_ACCESS_LOG_SETTINGS_MISSING: &str = "access_log_settings_missing";

// Annotations: api-gateway-access-logging
pub const ANNOTATION_ACCESS_LOG_SETTINGS_MISSING: &str =
    "AccessLogSettings are not defined for this stage.";

// Resource types
pub const RESOURCE_TYPE_API_GATEWAY_STAGE: &str = "AWS::ApiGateway::Stage";

// Invoking event message types
pub const MESSAGE_CONFIGURATION_ITEM_CHANGE: &str = "ConfigurationItemChangeNotification";
pub const MESSAGE_OVERSIZED_CONFIGURATION_ITEM_CHANGE: &str =
    "OversizedConfigurationItemChangeNotification";
pub const MESSAGE_SCHEDULED: &str = "ScheduledNotification";

// Error response codes
pub const ERROR_INVALID_PARAMETER_VALUE: &str = "InvalidParameterValueException";
pub const ERROR_INTERNAL: &str = "InternalError";
