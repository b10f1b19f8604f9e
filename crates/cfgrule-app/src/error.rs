//! Errors raised at the invocation boundary and their AWS Config error responses.

use cfgrule_types::{ErrorResponse, ids};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("malformed invocation event: {0}")]
    MalformedEvent(#[source] serde_json::Error),

    #[error("malformed invokingEvent: {0}")]
    MalformedInvokingEvent(#[source] serde_json::Error),

    #[error("invalid ruleParameters: {0}")]
    InvalidRuleParameters(String),

    #[error("Unexpected message type")]
    UnexpectedMessageType(String),

    #[error("invoking event has no configurationItem")]
    MissingConfigurationItem,

    #[error("oversized configuration items need a resource history lookup")]
    OversizedConfigurationItem,

    #[error("malformed configuration for resource {resource_id}: {source}")]
    MalformedConfiguration {
        resource_id: String,
        #[source]
        source: serde_json::Error,
    },
}

impl InvocationError {
    /// Customer errors are caused by the rule's deployment (its parameters), not by this code.
    pub fn is_customer_error(&self) -> bool {
        matches!(self, InvocationError::InvalidRuleParameters(_))
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        match self {
            InvocationError::InvalidRuleParameters(detail) => ErrorResponse {
                customer_error_code: ids::ERROR_INVALID_PARAMETER_VALUE.to_string(),
                customer_error_message: detail.clone(),
                internal_error_message: Some("Parameter value is invalid".to_string()),
                internal_error_details: Some(self.to_string()),
            },
            InvocationError::UnexpectedMessageType(message_type) => {
                internal_error(self.to_string(), Some(message_type.clone()))
            }
            InvocationError::MalformedEvent(source)
            | InvocationError::MalformedInvokingEvent(source)
            | InvocationError::MalformedConfiguration { source, .. } => {
                internal_error(self.to_string(), Some(source.to_string()))
            }
            InvocationError::MissingConfigurationItem
            | InvocationError::OversizedConfigurationItem => internal_error(self.to_string(), None),
        }
    }
}

fn internal_error(message: String, details: Option<String>) -> ErrorResponse {
    ErrorResponse {
        customer_error_code: ids::ERROR_INTERNAL.to_string(),
        customer_error_message: ids::ERROR_INTERNAL.to_string(),
        internal_error_message: Some(message),
        internal_error_details: details,
    }
}
