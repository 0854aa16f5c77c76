//! Engine error types.

use genum_api::ApiError;
use genum_types::ItemError;
use genum_util::redact_sensitive;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::credentials::CredentialError;

/// Failure while processing a single input item.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("Could not load credentials: {0}")]
    Credentials(#[from] CredentialError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Missing required parameter '{name}'")]
    MissingParameter { name: String },

    #[error("Parameter '{name}' must be a {expected}")]
    InvalidParameter { name: String, expected: &'static str },

    #[error("The prompt ID must be a number; got '{value}'")]
    InvalidPromptId { value: String },

    #[error("The operation '{operation}' is not supported for resource '{resource}'")]
    UnsupportedOperation { resource: String, operation: String },
}

impl ExecutionError {
    pub fn invalid_parameter(name: &str, expected: &'static str) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            expected,
        }
    }

    /// Structured context carried by the error itself.
    pub fn context(&self) -> Map<String, Value> {
        let mut context = Map::new();
        match self {
            Self::Api(error) => {
                if let Some(status) = error.status_code() {
                    context.insert("httpCode".into(), Value::from(status));
                }
                if let Some(body) = error.response_body() {
                    context.insert("responseBody".into(), Value::String(redact_sensitive(body)));
                }
            }
            Self::MissingParameter { name } | Self::InvalidParameter { name, .. } => {
                context.insert("parameter".into(), Value::String(name.clone()));
            }
            Self::InvalidPromptId { value } => {
                context.insert("parameter".into(), Value::String("promptId".into()));
                context.insert("value".into(), Value::String(value.clone()));
            }
            Self::UnsupportedOperation { resource, operation } => {
                context.insert("resource".into(), Value::String(resource.clone()));
                context.insert("operation".into(), Value::String(operation.clone()));
            }
            Self::Credentials(_) => {}
        }
        context
    }

    /// Hint shown alongside the message.
    pub fn description(&self) -> Option<String> {
        match self {
            Self::Api(error) if error.is_unauthorized() => Some("Check the API token of the Genum credential".into()),
            Self::Credentials(_) => Some("Set GENUM_API_TOKEN or store a token with `genum credentials store`".into()),
            _ => None,
        }
    }

    /// Serializable form emitted on an output item in continue-on-fail mode.
    pub fn to_item_error(&self, item_index: usize) -> ItemError {
        let mut context = self.context();
        context.insert("itemIndex".into(), Value::from(item_index));
        ItemError {
            message: redact_sensitive(&self.to_string()),
            description: self.description(),
            context,
        }
    }
}

/// Error that aborted a batch, attributed to the failing item.
#[derive(Debug, Error)]
#[error("{source} [item {item_index}]")]
pub struct NodeOperationError {
    pub item_index: usize,
    /// The source error's own context merged with `itemIndex`.
    pub context: Map<String, Value>,
    #[source]
    pub source: ExecutionError,
}

impl NodeOperationError {
    pub fn new(source: ExecutionError, item_index: usize) -> Self {
        let mut context = source.context();
        context.insert("itemIndex".into(), Value::from(item_index));
        Self {
            item_index,
            context,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_errors_keep_http_context() {
        let error = ExecutionError::Api(ApiError::Status {
            status: 401,
            body: "bad token".into(),
        });
        let item_error = error.to_item_error(2);
        assert_eq!(item_error.message, "HTTP 401: bad token");
        assert_eq!(item_error.context.get("httpCode"), Some(&json!(401)));
        assert_eq!(item_error.context.get("itemIndex"), Some(&json!(2)));
        assert!(item_error.description.is_some());
    }

    #[test]
    fn node_error_merges_existing_context() {
        let error = NodeOperationError::new(ExecutionError::InvalidPromptId { value: "abc".into() }, 4);
        assert_eq!(error.item_index, 4);
        assert_eq!(error.context.get("value"), Some(&json!("abc")));
        assert_eq!(error.context.get("itemIndex"), Some(&json!(4)));
        assert_eq!(error.to_string(), "The prompt ID must be a number; got 'abc' [item 4]");
    }
}
