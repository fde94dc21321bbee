//! Validation error types and JSON error format.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// A single field validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// Dotted path of the failing value, e.g. `seasons.0.color`. Empty for the root.
    pub field: String,
    /// Machine-readable issue code (`required`, `invalid_type`, `invalid_enum_value`, ...)
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional parameters (expected type, allowed options, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<HashMap<String, Value>>,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
            params: None,
        }
    }

    pub fn with_params(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
        params: HashMap<String, Value>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
            params: Some(params),
        }
    }

    /// Missing required value
    pub(crate) fn required(field: &str) -> Self {
        Self::new(field, "required", "Required")
    }

    /// Value of the wrong JSON type
    pub(crate) fn invalid_type(field: &str, expected: &str, received: &str) -> Self {
        let mut params = HashMap::new();
        params.insert("expected".to_string(), Value::from(expected));
        params.insert("received".to_string(), Value::from(received));
        Self::with_params(
            field,
            "invalid_type",
            format!("Expected {}, received {}", expected, received),
            params,
        )
    }

    /// String outside an enum's literal set
    pub(crate) fn invalid_enum_value(field: &str, options: &[String], received: &str) -> Self {
        let mut params = HashMap::new();
        params.insert(
            "options".to_string(),
            Value::Array(options.iter().cloned().map(Value::from).collect()),
        );
        let quoted: Vec<String> = options.iter().map(|o| format!("'{}'", o)).collect();
        Self::with_params(
            field,
            "invalid_enum_value",
            format!(
                "Invalid enum value. Expected {}, received '{}'",
                quoted.join(" | "),
                received
            ),
            params,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    error_type: String,
    message: String,
    fields: Vec<FieldError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

/// Validation error containing every field error found in one pass.
///
/// Serializes to the GenZ error format:
///
/// ```json
/// {
///   "error": {
///     "type": "validation_error",
///     "message": "Validation failed",
///     "fields": [...]
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
    /// Summary message (default: "Validation failed")
    pub message: String,
}

impl ValidationError {
    pub fn new(fields: Vec<FieldError>) -> Self {
        Self {
            fields,
            message: "Validation failed".to_string(),
        }
    }

    pub fn with_message(fields: Vec<FieldError>, message: impl Into<String>) -> Self {
        Self {
            fields,
            message: message.into(),
        }
    }

    /// Validation error for a single field
    pub fn field(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(vec![FieldError::new(field, code, message)])
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn add(&mut self, error: FieldError) {
        self.fields.push(error);
    }

    /// Look up the first error reported for a field path
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.fields.iter().find(|f| f.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} field error(s)", self.message, self.fields.len())
    }
}

impl std::error::Error for ValidationError {}

impl Serialize for ValidationError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let wrapper = ErrorWrapper {
            error: ErrorBody {
                error_type: "validation_error".to_string(),
                message: self.message.clone(),
                fields: self.fields.clone(),
            },
        };
        wrapper.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ValidationError {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let wrapper = ErrorWrapper::deserialize(deserializer)?;
        Ok(Self {
            fields: wrapper.error.fields,
            message: wrapper.error.message,
        })
    }
}
