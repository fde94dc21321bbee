//! # GenZ
//!
//! Schema-driven routes for Rust.
//!
//! A route declares a schema for each part of the request it reads (path
//! params, query, body) and for the value it returns. From that one
//! declaration GenZ
//!
//! - coerces path and query strings into the declared numbers, booleans and arrays
//! - validates params, then query, then body, and answers `422` on the first failure
//! - checks handler output against the response schema outside production
//! - documents the route, its parameters and its schemas in an OpenAPI 3 document
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use genz_rs::prelude::*;
//!
//! #[derive(Serialize, Deserialize)]
//! struct IdParams {
//!     id: u32,
//! }
//!
//! async fn get_ranger(input: Input<IdParams>) -> Result<serde_json::Value> {
//!     Ok(serde_json::json!({ "id": input.params.id, "name": "Jason" }))
//! }
//!
//! #[tokio::main]
//! async fn main() -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let ranger = Schema::object([("id", Schema::number()), ("name", Schema::string())])
//!         .openapi("Power Ranger", "A single power ranger");
//!     let id = Schema::object([("id", Schema::number())]);
//!
//!     GenZApp::from_env()?
//!         .mount(RouterOptions::new("Power Rangers", "/power-ranger"), |rangers| {
//!             rangers.get("/:id", RouteSpec::new(ranger.typed()).params(id.typed()), get_ranger);
//!         })
//!         .run()
//!         .await
//! }
//! ```
//!
//! ## Optional Features
//!
//! - `test-utils` - `TestClient` for dispatching requests without a socket

// Re-export core functionality
pub use genz_core::*;

/// Schema tree, coercion and validation
pub use genz_validate as validate;

/// OpenAPI document model and registrar
pub use genz_openapi as openapi;

pub use genz_openapi::OpenApiConfig;
pub use genz_validate::{FieldError, Schema, TypedSchema, ValidationError};

// Re-export commonly used crates
pub use async_trait::async_trait;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tracing;

/// Prelude module - import everything you need with `use genz_rs::prelude::*`
pub mod prelude {
    pub use genz_core::{
        // App builder
        GenZApp,
        // Route declaration
        Input,
        ResourceRouter,
        RoutePath,
        RouteSpec,
        RouterOptions,
        // Error handling
        ApiError,
        IntoResponse,
        Response,
        StatusCode,
        ErrorBoundary,
        Result,
        RouteError,
        // Configuration
        Environment,
        ServerConfig,
        load_dotenv,
    };

    pub use genz_openapi::OpenApiConfig;
    pub use genz_validate::{Schema, TypedSchema, ValidationError};

    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use tracing::{debug, error, info, warn};

    #[cfg(any(test, feature = "test-utils"))]
    pub use genz_core::{TestClient, TestRequest, TestResponse};
}
