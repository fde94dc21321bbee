//! Error types for GenZ
//!
//! Request processing can fail in two ways that matter to clients:
//!
//! - a **validation failure**: path params, query or body did not match the
//!   declared schema (client error, always reported with field details)
//! - a **handler failure**: the handler returned an [`ApiError`]
//!
//! Both are carried by [`RouteError`] to the process-wide [`ErrorBoundary`],
//! which turns them into a JSON response.

use crate::config::Environment;
use crate::response::{IntoResponse, Response};
use bytes::Bytes;
use genz_validate::{FieldError, ValidationError};
use http::{header, HeaderValue, StatusCode};
use http_body_util::Full;
use serde::Serialize;
use std::fmt;
use tracing::error;

/// Result type alias for GenZ handlers
pub type Result<T, E = ApiError> = std::result::Result<T, E>;

/// Standard API error type
///
/// Provides structured error responses following a consistent JSON format.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// HTTP status code
    pub status: StatusCode,
    /// Error type identifier
    pub error_type: String,
    /// Human-readable error message
    pub message: String,
    /// Optional field-level validation errors
    pub fields: Option<Vec<FieldError>>,
    /// Internal details (logged, never sent)
    pub(crate) internal: Option<String>,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        error_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            error_type: error_type.into(),
            message: message.into(),
            fields: None,
            internal: None,
        }
    }

    /// 422 with field details
    pub fn validation(fields: Vec<FieldError>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            error_type: "validation_error".to_string(),
            message: "Request validation failed".to_string(),
            fields: Some(fields),
            internal: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_request", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "unauthorized", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "forbidden", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message)
    }

    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, "method_not_allowed", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, "conflict", message)
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
    }

    /// Add internal details (for logging, never part of the response)
    pub fn with_internal(mut self, details: impl Into<String>) -> Self {
        self.internal = Some(details.into());
        self
    }

    pub fn internal_details(&self) -> Option<&str> {
        self.internal.as_deref()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type, self.message)
    }
}

impl std::error::Error for ApiError {}

/// JSON representation of API error response
#[derive(Serialize)]
struct ErrorResponse<'a> {
    error: ErrorBody<'a>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    #[serde(rename = "type")]
    error_type: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a [FieldError]>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let payload = ErrorResponse {
            error: ErrorBody {
                error_type: &self.error_type,
                message: &self.message,
                fields: self.fields.as_deref(),
            },
        };
        let body = serde_json::to_vec(&payload).unwrap_or_else(|_| {
            br#"{"error":{"type":"internal_error","message":"Failed to serialize error"}}"#
                .to_vec()
        });

        let mut response = http::Response::new(Full::new(Bytes::from(body)));
        *response.status_mut() = self.status;
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        response
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.fields)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::internal("Serialization error").with_internal(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::internal("I/O error").with_internal(err.to_string())
    }
}

impl From<hyper::Error> for ApiError {
    fn from(err: hyper::Error) -> Self {
        ApiError::internal("HTTP error").with_internal(err.to_string())
    }
}

/// Request stage a validation failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Params,
    Query,
    Body,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Params => "params",
            Self::Query => "query",
            Self::Body => "body",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a single request, forwarded to the [`ErrorBoundary`]
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// Params, query or body did not match the declared schema.
    /// The remaining stages were not run.
    #[error("invalid request {stage}: {source}")]
    Validation {
        stage: Stage,
        #[source]
        source: ValidationError,
    },
    /// The handler failed; carried unchanged
    #[error(transparent)]
    Handler(#[from] ApiError),
}

impl RouteError {
    pub fn validation(stage: Stage, source: ValidationError) -> Self {
        Self::Validation { stage, source }
    }

    /// True for failures caused by the client's input
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// Process-wide mapping from request failures to HTTP responses
pub trait ErrorBoundary: Send + Sync + 'static {
    fn handle(&self, error: RouteError, environment: &Environment) -> Response;
}

impl<F> ErrorBoundary for F
where
    F: Fn(RouteError, &Environment) -> Response + Send + Sync + 'static,
{
    fn handle(&self, error: RouteError, environment: &Environment) -> Response {
        self(error, environment)
    }
}

/// Default boundary.
///
/// Validation failures become `422 validation_error` with the field list.
/// Handler failures keep their own status; 5xx messages are replaced by an
/// opaque message in production and internal details are only logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorBoundary;

impl DefaultErrorBoundary {
    pub fn to_api_error(&self, error: RouteError, environment: &Environment) -> ApiError {
        match error {
            RouteError::Validation { stage, source } => {
                let mut api = ApiError::validation(source.fields);
                api.message = format!("Invalid request {}", stage);
                api
            }
            RouteError::Handler(err) if err.status.is_server_error() => {
                error!(
                    status = %err.status.as_u16(),
                    error_type = %err.error_type,
                    message = %err.message,
                    internal = ?err.internal,
                    "Handler failed"
                );
                if environment.show_error_details() {
                    err
                } else {
                    ApiError {
                        message: "An internal error occurred".to_string(),
                        internal: None,
                        ..err
                    }
                }
            }
            RouteError::Handler(err) => err,
        }
    }
}

impl ErrorBoundary for DefaultErrorBoundary {
    fn handle(&self, error: RouteError, environment: &Environment) -> Response {
        self.to_api_error(error, environment).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_failure_is_422_with_fields() {
        let err = RouteError::validation(
            Stage::Query,
            ValidationError::field("seasons.0", "invalid_type", "Expected number, received string"),
        );
        let response = DefaultErrorBoundary.handle(err, &Environment::Development);
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = body_json(response).await;
        assert_eq!(json["error"]["type"], "validation_error");
        assert_eq!(json["error"]["message"], "Invalid request query");
        assert_eq!(json["error"]["fields"][0]["field"], "seasons.0");
    }

    #[tokio::test]
    async fn handler_failure_keeps_status() {
        let err = RouteError::Handler(ApiError::not_found("Power ranger 9 not found"));
        let response = DefaultErrorBoundary.handle(err, &Environment::Production);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], "Power ranger 9 not found");
        assert!(json["error"].get("fields").is_none());
    }

    #[test]
    fn server_errors_are_masked_in_production() {
        let err = || RouteError::Handler(ApiError::internal("db exploded").with_internal("stack"));
        let masked = DefaultErrorBoundary.to_api_error(err(), &Environment::Production);
        assert_eq!(masked.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(masked.message, "An internal error occurred");
        assert!(masked.internal_details().is_none());

        let shown = DefaultErrorBoundary.to_api_error(err(), &Environment::Development);
        assert_eq!(shown.message, "db exploded");
    }

    #[test]
    fn route_error_display() {
        let err = RouteError::validation(Stage::Params, ValidationError::field("id", "required", "Required"));
        assert_eq!(err.to_string(), "invalid request params: Validation failed: 1 field error(s)");
        assert!(err.is_validation());
        assert!(!RouteError::from(ApiError::conflict("taken")).is_validation());
    }

    #[test]
    fn closures_are_boundaries() {
        let boundary = |_: RouteError, _: &Environment| {
            ApiError::new(StatusCode::IM_A_TEAPOT, "teapot", "short and stout").into_response()
        };
        let response = boundary.handle(RouteError::from(ApiError::internal("x")), &Environment::Development);
        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
    }
}
