//! # GenZ Validation
//!
//! Declarative schema trees for GenZ. A [`Schema`] describes the shape of a
//! request's path parameters, query string, body or a handler's response, and
//! drives three things:
//!
//! - [`introspect`]: the wrapper chain and terminal kind of any node
//! - [`coerce`]: conversion of wire strings into numbers, booleans and arrays
//! - [`validate`]: structural validation that returns the parsed value
//!
//! ## Example
//!
//! ```rust
//! use genz_validate::{validate_params_or_query, Schema};
//! use serde_json::{json, Map};
//!
//! let query = Schema::object([
//!     ("name", Schema::string().optional()),
//!     ("seasons", Schema::number().array().optional()),
//! ]);
//!
//! let mut raw = Map::new();
//! raw.insert("seasons".to_string(), json!("2"));
//!
//! let parsed = validate_params_or_query(raw, &query).unwrap();
//! assert_eq!(parsed, json!({"seasons": [2]}));
//! ```
//!
//! ## Error Format
//!
//! ```json
//! {
//!   "error": {
//!     "type": "validation_error",
//!     "message": "Validation failed",
//!     "fields": [
//!       {"field": "seasons.0", "code": "invalid_type", "message": "Expected number, received string",
//!        "params": {"expected": "number", "received": "string"}}
//!     ]
//!   }
//! }
//! ```

mod coerce;
mod error;
mod introspect;
mod schema;
mod typed;
mod validate;

pub use coerce::{coerce, parse_number};
pub use error::{FieldError, ValidationError};
pub use introspect::{introspect, terminal, Introspection};
pub use schema::{Schema, SchemaDocs, SchemaId, SchemaKind, SchemaTag};
pub use typed::TypedSchema;
pub use validate::{validate, validate_body, validate_field, validate_params_or_query};

/// Prelude module for validation
pub mod prelude {
    pub use crate::error::{FieldError, ValidationError};
    pub use crate::schema::Schema;
    pub use crate::typed::TypedSchema;
}
