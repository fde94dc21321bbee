//! # GenZ Core
//!
//! Schema-driven route registration: every route declares schemas for its
//! path params, query, body and response. Requests are coerced and validated
//! against them before the handler runs, and the same declarations produce
//! the served OpenAPI document.
//!
//! This crate is not meant to be used directly. Use `genz-rs` instead.

mod app;
mod config;
mod error;
mod handler;
mod invoke;
mod path_params;
mod pipeline;
mod query;
mod request;
mod response;
mod route;
mod router;
mod server;
#[cfg(any(test, feature = "test-utils"))]
mod test_client;

// Public API
pub use app::{BuildError, GenZApp};
pub use config::{
    load_dotenv, load_dotenv_from, ConfigError, Environment, ServerConfig, DEFAULT_BODY_LIMIT,
};
pub use error::{
    ApiError, DefaultErrorBoundary, ErrorBoundary, Result, RouteError, Stage,
};
pub use handler::Handler;
pub use path_params::PathParams;
pub use query::parse_query;
pub use request::Request;
pub use response::{IntoResponse, Response};
pub use route::{default_status, Input, RoutePath, RouteSpec, RouterOptions};
pub use router::{ResourceRouter, RouteConflictError, RouteInfo};
pub use server::AppService;
pub use http::{Method, StatusCode};
#[cfg(any(test, feature = "test-utils"))]
pub use test_client::{TestClient, TestRequest, TestResponse};
