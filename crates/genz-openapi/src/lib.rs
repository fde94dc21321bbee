//! OpenAPI documentation for GenZ
//!
//! Builds an OpenAPI 3.0.3 document from the same schema declarations that
//! validate requests, so the documentation cannot drift from the code.
//!
//! # Features
//!
//! - Identity-keyed schema registry (`components.schemas`)
//! - `:param` to `{param}` path translation
//! - Operation id generation from method, path and resource name
//! - HTTP bearer security scheme referenced by every operation
//! - JSON spec served at `/api-spec.json` by default
//!
//! # Usage
//!
//! ```rust
//! use genz_openapi::{Documentation, OpenApiConfig, RouteDescriptor};
//! use genz_validate::Schema;
//! use http::{Method, StatusCode};
//!
//! let ranger = Schema::object([("id", Schema::number()), ("name", Schema::string())])
//!     .openapi("Power Ranger", "Go Go Power Rangers");
//!
//! let mut docs = Documentation::new(OpenApiConfig::new("Gen Z Validation", "1.0.0"));
//! docs.register_route(&RouteDescriptor {
//!     method: Method::GET,
//!     base_path: "/power-ranger".into(),
//!     path: "/:id".into(),
//!     resource: "Power Rangers".into(),
//!     operation_id: None,
//!     params: Some(Schema::object([("id", Schema::number())])),
//!     query: None,
//!     body: None,
//!     response: ranger,
//!     status: StatusCode::OK,
//! });
//!
//! let json = docs.document().to_json();
//! assert_eq!(json["paths"]["/power-ranger/{id}"]["get"]["operationId"], "getOnePowerRangers");
//! ```

mod config;
mod operation_id;
mod path;
mod registrar;
mod registry;
mod spec;

pub use config::OpenApiConfig;
pub use operation_id::generate as operation_id;
pub use path::{placeholders, translate};
pub use registrar::{Documentation, PathEntry, RouteDescriptor};
pub use registry::SchemaRegistry;
pub use spec::{
    ApiInfo, Contact, License, MediaType, OpenApiSpec, Operation, Parameter, PathItem,
    RequestBody, ResponseSpec, SchemaRef, SecurityRequirement, SecurityScheme,
};

use bytes::Bytes;
use http::{header, HeaderValue, Response, StatusCode};
use http_body_util::Full;

/// Serialize the document to pretty-printed JSON
pub fn render(spec: &OpenApiSpec) -> Result<Bytes, serde_json::Error> {
    serde_json::to_vec_pretty(&spec.to_json()).map(Bytes::from)
}

/// OpenAPI JSON response for an already rendered document
pub fn openapi_json(rendered: &Bytes) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(rendered.clone()));
    *response.status_mut() = StatusCode::OK;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn render_produces_openapi_document() {
        let docs = Documentation::new(OpenApiConfig::default());
        let bytes = render(&docs.document()).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["openapi"], "3.0.3");
    }

    #[tokio::test]
    async fn openapi_json_sets_content_type() {
        let response = openapi_json(&Bytes::from_static(b"{}"));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"{}");
    }
}
