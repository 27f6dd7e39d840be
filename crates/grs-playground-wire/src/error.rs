//! Errors for payload normalization.

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while normalizing engine payloads.
pub enum WireError {
    #[error("expected a JSON array, found {0}")]
    /// The payload is not a list.
    NotAnArray(&'static str),

    #[error("missing field: {0}")]
    /// A required field is absent.
    MissingField(&'static str),

    #[error("invalid field '{field}': {message}")]
    /// A field is present but has the wrong shape or value.
    InvalidField {
        /// Field name.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },

    #[error("JSON error: {0}")]
    /// The payload is not valid JSON.
    Json(#[from] serde_json::Error),
}

pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
