//! Power ranger API
//!
//! One GenZ resource, `/power-ranger`, over a [`RangerStore`]. The binary
//! serves it over HTTP; the integration tests drive it through `TestClient`.

pub mod models;
pub mod routes;
pub mod store;

use genz_rs::prelude::*;
use std::sync::Arc;

pub use store::{MemoryStore, RangerStore};

/// Document metadata of the API
pub fn docs() -> OpenApiConfig {
    OpenApiConfig::new("Gen Z Validation", "1.0.0")
        .description("Mejor tipado, menos boilerplate.")
        .contact("General Zod")
        .license("MIT", Some("https://opensource.org/licenses/MIT".to_string()))
}

/// Mount the power ranger resource on `app`
pub fn build(app: GenZApp, store: Arc<dyn RangerStore>) -> GenZApp {
    app.openapi(docs())
        .mount(routes::options(), move |rangers| routes::declare(rangers, store))
}
