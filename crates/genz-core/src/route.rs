//! Route declarations: schemas, paths and resource options.

use genz_validate::{Schema, TypedSchema};
use http::{Method, StatusCode};
use std::marker::PhantomData;

/// Validated input bundle handed to a handler
#[derive(Debug, Clone, PartialEq)]
pub struct Input<P = (), Q = (), B = ()> {
    pub params: P,
    pub query: Q,
    pub body: B,
}

/// Schemas and status of one route.
///
/// The type parameters record what each declared schema deserializes into,
/// so a handler's input and output types must agree with the declaration.
/// Stages without a schema are `()`.
///
/// ```ignore
/// let spec = RouteSpec::new(ranger.clone().typed::<PowerRanger>())
///     .params(id_params.typed::<IdParams>());
/// ```
pub struct RouteSpec<P = (), Q = (), B = (), R = ()> {
    pub(crate) params: Option<Schema>,
    pub(crate) query: Option<Schema>,
    pub(crate) body: Option<Schema>,
    pub(crate) response: Schema,
    pub(crate) status: Option<StatusCode>,
    _marker: PhantomData<fn() -> (P, Q, B, R)>,
}

impl<R> RouteSpec<(), (), (), R> {
    /// A route responding with `response`
    pub fn new(response: TypedSchema<R>) -> Self {
        Self {
            params: None,
            query: None,
            body: None,
            response: response.into_schema(),
            status: None,
            _marker: PhantomData,
        }
    }
}

impl<P, Q, B, R> RouteSpec<P, Q, B, R> {
    fn retype<P2, Q2, B2>(self) -> RouteSpec<P2, Q2, B2, R> {
        RouteSpec {
            params: self.params,
            query: self.query,
            body: self.body,
            response: self.response,
            status: self.status,
            _marker: PhantomData,
        }
    }

    /// Path parameter schema
    pub fn params<T>(mut self, schema: TypedSchema<T>) -> RouteSpec<T, Q, B, R> {
        self.params = Some(schema.into_schema());
        self.retype()
    }

    /// Query string schema
    pub fn query<T>(mut self, schema: TypedSchema<T>) -> RouteSpec<P, T, B, R> {
        self.query = Some(schema.into_schema());
        self.retype()
    }

    /// JSON body schema
    pub fn body<T>(mut self, schema: TypedSchema<T>) -> RouteSpec<P, Q, T, R> {
        self.body = Some(schema.into_schema());
        self.retype()
    }

    /// Override the success status (`201` for POST, `200` otherwise)
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    pub fn response_schema(&self) -> &Schema {
        &self.response
    }
}

/// Route path, optionally with an explicit operation id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePath {
    pub path: String,
    pub operation_id: Option<String>,
}

impl RoutePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            operation_id: None,
        }
    }

    pub fn operation_id(mut self, id: impl Into<String>) -> Self {
        self.operation_id = Some(id.into());
        self
    }
}

impl From<&str> for RoutePath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for RoutePath {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

impl From<(&str, &str)> for RoutePath {
    fn from((path, operation_id): (&str, &str)) -> Self {
        Self::new(path).operation_id(operation_id)
    }
}

/// Per-resource router options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterOptions {
    /// Human-readable resource name: the document tag and operation id suffix
    pub name: String,
    /// Path prefix of every route in the resource
    pub base_path: String,
}

impl RouterOptions {
    pub fn new(name: impl Into<String>, base_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_path: base_path.into(),
        }
    }
}

/// Default success status for a method
pub fn default_status(method: &Method) -> StatusCode {
    if *method == Method::POST {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    }
}

/// Immutable per-route data shared by every request to the route
#[derive(Debug)]
pub(crate) struct RouteContext {
    pub method: Method,
    pub path: String,
    pub operation_id: String,
    pub params: Option<Schema>,
    pub query: Option<Schema>,
    pub body: Option<Schema>,
    pub response: Schema,
    pub status: StatusCode,
}
