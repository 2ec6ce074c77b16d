use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Failure reported by the server inside an otherwise readable response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ApiException {
    pub message: String,
}

impl ApiException {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Builds the exception from the raw `error` field of a response body.
    /// Strings are taken verbatim, anything else keeps its JSON rendering.
    pub fn from_error_value(value: &Value) -> Self {
        match value {
            Value::String(message) => Self::new(message.clone()),
            other => Self::new(other.to_string()),
        }
    }
}
