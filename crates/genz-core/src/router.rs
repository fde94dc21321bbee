//! Resource routers and request routing
//!
//! Routes are declared per resource through a [`ResourceRouter`], which
//! documents each route and stores its wrapped handler in the route table.
//! The table is compiled into a radix tree once, when the service is built.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut app = GenZApp::new();
//! let mut rangers = app.resource(RouterOptions::new("Power Rangers", "/power-ranger"));
//!
//! rangers.get("/", RouteSpec::new(list.typed()).query(search.typed()), list_rangers);
//! rangers.get("/:id", RouteSpec::new(ranger.typed()).params(id.typed()), get_ranger);
//! rangers.post("/", RouteSpec::new(ranger.typed()).body(new_ranger.typed()), create_ranger);
//! ```

use crate::handler::{into_boxed_handler, BoxedHandler, Handler};
use crate::path_params::PathParams;
use crate::route::{default_status, RouteContext, RoutePath, RouteSpec, RouterOptions};
use genz_openapi::{Documentation, RouteDescriptor};
use http::Method;
use matchit::Router as MatchitRouter;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Information about a registered route for conflict detection
#[derive(Debug, Clone)]
pub struct RouteInfo {
    /// The match path pattern (e.g., "/power-ranger/:id")
    pub path: String,
    /// The HTTP methods registered for this path
    pub methods: Vec<Method>,
}

/// Two match paths the radix tree cannot tell apart
#[derive(Debug, Clone)]
pub struct RouteConflictError {
    /// The path that was being registered
    pub new_path: String,
    /// The HTTP method that conflicts
    pub method: Option<Method>,
    /// The existing path that conflicts
    pub existing_path: String,
    /// Detailed error message from the underlying router
    pub details: String,
}

impl std::fmt::Display for RouteConflictError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "route conflict: {} conflicts with existing route {}",
            self.new_path, self.existing_path
        )?;
        if let Some(ref method) = self.method {
            write!(f, " ({})", method)?;
        }
        write!(f, ": {}", self.details)
    }
}

impl std::error::Error for RouteConflictError {}

/// HTTP method router for a single path
#[derive(Clone, Default)]
pub(crate) struct MethodRouter {
    handlers: HashMap<Method, BoxedHandler>,
}

impl MethodRouter {
    /// Insert a handler; returns true when it replaced an earlier one
    fn insert(&mut self, method: Method, handler: BoxedHandler) -> bool {
        self.handlers.insert(method, handler).is_some()
    }

    pub(crate) fn get_handler(&self, method: &Method) -> Option<&BoxedHandler> {
        self.handlers.get(method)
    }

    /// Allowed methods for a 405 response, in a stable order
    pub(crate) fn allowed_methods(&self) -> Vec<Method> {
        let mut methods: Vec<Method> = self.handlers.keys().cloned().collect();
        methods.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        methods
    }
}

/// Routes collected while resources are declared
#[derive(Default)]
pub(crate) struct RouteTable {
    routes: HashMap<String, MethodRouter>,
    order: Vec<String>,
}

impl RouteTable {
    /// Store a handler under `match_path`. A second handler for the same path
    /// and method replaces the first.
    pub(crate) fn insert(&mut self, match_path: &str, method: Method, handler: BoxedHandler) {
        if !self.routes.contains_key(match_path) {
            self.order.push(match_path.to_string());
        }
        let router = self.routes.entry(match_path.to_string()).or_default();

        if router.insert(method.clone(), handler) {
            warn!(
                method = %method,
                path = %match_path,
                "Route declared twice; the later handler wins"
            );
        }
    }

    /// Build the radix tree, in declaration order
    pub(crate) fn compile(&self) -> Result<Router, RouteConflictError> {
        let mut inner = MatchitRouter::new();
        let mut registered: Vec<RouteInfo> = Vec::with_capacity(self.order.len());

        for path in &self.order {
            let Some(method_router) = self.routes.get(path) else {
                continue;
            };
            let methods = method_router.allowed_methods();

            if let Err(e) = inner.insert(path.clone(), method_router.clone()) {
                let existing_path = find_conflicting_route(&registered, path)
                    .map(|info| info.path.clone())
                    .unwrap_or_else(|| "<unknown>".to_string());

                return Err(RouteConflictError {
                    new_path: path.clone(),
                    method: methods.first().cloned(),
                    existing_path,
                    details: e.to_string(),
                });
            }

            registered.push(RouteInfo {
                path: path.clone(),
                methods,
            });
        }

        Ok(Router {
            inner,
            routes: registered,
        })
    }
}

/// Find a registered route with the same shape as `path`
fn find_conflicting_route<'a>(registered: &'a [RouteInfo], path: &str) -> Option<&'a RouteInfo> {
    let normalized_new = normalize_path_for_comparison(path);
    registered
        .iter()
        .find(|info| normalize_path_for_comparison(&info.path) == normalized_new)
}

/// Compiled router used while serving
pub(crate) struct Router {
    inner: MatchitRouter<MethodRouter>,
    routes: Vec<RouteInfo>,
}

impl Router {
    /// Match a request path; a trailing slash is ignored
    pub(crate) fn match_route(&self, path: &str, method: &Method) -> RouteMatch<'_> {
        match self.inner.at(&normalize_request_path(path)) {
            Ok(matched) => {
                let method_router = matched.value;

                if let Some(handler) = method_router.get_handler(method) {
                    let params: PathParams = matched.params.iter().collect();
                    RouteMatch::Found { handler, params }
                } else {
                    RouteMatch::MethodNotAllowed {
                        allowed: method_router.allowed_methods(),
                    }
                }
            }
            Err(_) => RouteMatch::NotFound,
        }
    }

    /// Registered routes (for testing and debugging)
    pub(crate) fn registered_routes(&self) -> &[RouteInfo] {
        &self.routes
    }
}

/// Result of route matching
pub(crate) enum RouteMatch<'a> {
    Found {
        handler: &'a BoxedHandler,
        params: PathParams,
    },
    NotFound,
    MethodNotAllowed {
        allowed: Vec<Method>,
    },
}

/// Declares the routes of one resource.
///
/// Every declaration documents the route, then wraps the handler in the
/// validation pipeline and stores it. The handler is returned unchanged.
pub struct ResourceRouter<'a> {
    options: RouterOptions,
    docs: &'a mut Documentation,
    table: &'a mut RouteTable,
}

impl<'a> ResourceRouter<'a> {
    pub(crate) fn new(
        options: RouterOptions,
        docs: &'a mut Documentation,
        table: &'a mut RouteTable,
    ) -> Self {
        Self {
            options,
            docs,
            table,
        }
    }

    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    pub fn get<H, P, Q, B, R>(
        &mut self,
        path: impl Into<RoutePath>,
        spec: RouteSpec<P, Q, B, R>,
        handler: H,
    ) -> H
    where
        H: Handler<P, Q, B, R>,
        P: DeserializeOwned + Send + 'static,
        Q: DeserializeOwned + Send + 'static,
        B: DeserializeOwned + Send + 'static,
        R: Serialize + Send + 'static,
    {
        self.route(Method::GET, path.into(), spec, handler)
    }

    pub fn post<H, P, Q, B, R>(
        &mut self,
        path: impl Into<RoutePath>,
        spec: RouteSpec<P, Q, B, R>,
        handler: H,
    ) -> H
    where
        H: Handler<P, Q, B, R>,
        P: DeserializeOwned + Send + 'static,
        Q: DeserializeOwned + Send + 'static,
        B: DeserializeOwned + Send + 'static,
        R: Serialize + Send + 'static,
    {
        self.route(Method::POST, path.into(), spec, handler)
    }

    pub fn put<H, P, Q, B, R>(
        &mut self,
        path: impl Into<RoutePath>,
        spec: RouteSpec<P, Q, B, R>,
        handler: H,
    ) -> H
    where
        H: Handler<P, Q, B, R>,
        P: DeserializeOwned + Send + 'static,
        Q: DeserializeOwned + Send + 'static,
        B: DeserializeOwned + Send + 'static,
        R: Serialize + Send + 'static,
    {
        self.route(Method::PUT, path.into(), spec, handler)
    }

    pub fn patch<H, P, Q, B, R>(
        &mut self,
        path: impl Into<RoutePath>,
        spec: RouteSpec<P, Q, B, R>,
        handler: H,
    ) -> H
    where
        H: Handler<P, Q, B, R>,
        P: DeserializeOwned + Send + 'static,
        Q: DeserializeOwned + Send + 'static,
        B: DeserializeOwned + Send + 'static,
        R: Serialize + Send + 'static,
    {
        self.route(Method::PATCH, path.into(), spec, handler)
    }

    pub fn delete<H, P, Q, B, R>(
        &mut self,
        path: impl Into<RoutePath>,
        spec: RouteSpec<P, Q, B, R>,
        handler: H,
    ) -> H
    where
        H: Handler<P, Q, B, R>,
        P: DeserializeOwned + Send + 'static,
        Q: DeserializeOwned + Send + 'static,
        B: DeserializeOwned + Send + 'static,
        R: Serialize + Send + 'static,
    {
        self.route(Method::DELETE, path.into(), spec, handler)
    }

    fn route<H, P, Q, B, R>(
        &mut self,
        method: Method,
        path: RoutePath,
        spec: RouteSpec<P, Q, B, R>,
        handler: H,
    ) -> H
    where
        H: Handler<P, Q, B, R>,
        P: DeserializeOwned + Send + 'static,
        Q: DeserializeOwned + Send + 'static,
        B: DeserializeOwned + Send + 'static,
        R: Serialize + Send + 'static,
    {
        let status = spec.status.unwrap_or_else(|| default_status(&method));
        let descriptor = RouteDescriptor {
            method: method.clone(),
            base_path: self.options.base_path.clone(),
            path: path.path.clone(),
            resource: self.options.name.clone(),
            operation_id: path.operation_id,
            params: spec.params,
            query: spec.query,
            body: spec.body,
            response: spec.response,
            status,
        };
        let operation_id = descriptor.resolved_operation_id();
        self.docs.register_route(&descriptor);

        let match_path = match_path(&self.options.base_path, &path.path);
        debug!(
            method = %method,
            path = %match_path,
            operation_id = %operation_id,
            "Registered route"
        );

        let ctx = Arc::new(RouteContext {
            method: method.clone(),
            path: match_path.clone(),
            operation_id,
            params: descriptor.params,
            query: descriptor.query,
            body: descriptor.body,
            response: descriptor.response,
            status,
        });
        self.table
            .insert(&match_path, method, into_boxed_handler(handler.clone(), ctx));

        handler
    }
}

/// Path the radix tree matches for a route of a resource
pub(crate) fn match_path(base_path: &str, route_path: &str) -> String {
    normalize_prefix(&convert_path_params(&format!("{}/{}", base_path, route_path)))
}

/// Request path as looked up in the radix tree
fn normalize_request_path(path: &str) -> std::borrow::Cow<'_, str> {
    if path.len() > 1 && path.ends_with('/') {
        std::borrow::Cow::Owned(normalize_prefix(path))
    } else {
        std::borrow::Cow::Borrowed(path)
    }
}

/// Convert {param} style to :param for matchit
fn convert_path_params(path: &str) -> String {
    let mut result = String::with_capacity(path.len());

    for ch in path.chars() {
        match ch {
            '{' => result.push(':'),
            '}' => {}
            _ => result.push(ch),
        }
    }

    result
}

/// Normalize a path for conflict comparison by replacing parameter names with a placeholder
fn normalize_path_for_comparison(path: &str) -> String {
    let mut result = String::with_capacity(path.len());
    let mut in_param = false;

    for ch in path.chars() {
        match ch {
            ':' => {
                in_param = true;
                result.push_str(":_");
            }
            '/' => {
                in_param = false;
                result.push('/');
            }
            _ if in_param => {}
            _ => result.push(ch),
        }
    }

    result
}

/// Normalize a path prefix.
///
/// Ensures the prefix:
/// - Starts with exactly one leading slash
/// - Has no trailing slash (unless it's just "/")
/// - Has no double slashes
pub(crate) fn normalize_prefix(prefix: &str) -> String {
    let segments: Vec<&str> = prefix.split('/').filter(|s| !s.is_empty()).collect();

    if segments.is_empty() {
        return "/".to_string();
    }

    let mut result = String::with_capacity(prefix.len() + 1);
    for segment in segments {
        result.push('/');
        result.push_str(segment);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use crate::error::RouteError;
    use crate::handler::BoxFuture;
    use crate::request::Request;
    use crate::response::Response;
    use bytes::Bytes;
    use http_body_util::Full;

    fn handler(tag: &'static str) -> BoxedHandler {
        Arc::new(move |_: Request, _: Arc<Environment>| {
            Box::pin(async move { Ok(Response::new(Full::new(Bytes::from_static(tag.as_bytes())))) })
                as BoxFuture<Result<Response, RouteError>>
        })
    }

    fn found_params(router: &Router, path: &str, method: &Method) -> Option<Vec<(String, String)>> {
        match router.match_route(path, method) {
            RouteMatch::Found { params, .. } => Some(
                params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
            _ => None,
        }
    }

    #[test]
    fn test_match_path() {
        assert_eq!(match_path("/power-ranger", "/"), "/power-ranger");
        assert_eq!(match_path("/power-ranger", "/:id"), "/power-ranger/:id");
        assert_eq!(match_path("/power-ranger/", "{id}"), "/power-ranger/:id");
        assert_eq!(match_path("", "/"), "/");
        assert_eq!(match_path("//api//", "//zords/:id/"), "/api/zords/:id");
    }

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix("api"), "/api");
        assert_eq!(normalize_prefix("/api/"), "/api");
        assert_eq!(normalize_prefix("//api//v1//"), "/api/v1");
        assert_eq!(normalize_prefix(""), "/");
        assert_eq!(normalize_prefix("///"), "/");
    }

    #[test]
    fn test_normalize_path_for_comparison() {
        assert_eq!(normalize_path_for_comparison("/rangers/:id"), "/rangers/:_");
        assert_eq!(
            normalize_path_for_comparison("/rangers/:name/zords"),
            "/rangers/:_/zords"
        );
    }

    #[test]
    fn test_trailing_slash_insensitive() {
        let mut table = RouteTable::default();
        table.insert("/power-ranger", Method::GET, handler("list"));
        let router = table.compile().unwrap();

        assert!(found_params(&router, "/power-ranger", &Method::GET).is_some());
        assert!(found_params(&router, "/power-ranger/", &Method::GET).is_some());
        assert!(found_params(&router, "/power-rangers", &Method::GET).is_none());
    }

    #[test]
    fn test_path_params_are_decoded() {
        let mut table = RouteTable::default();
        table.insert("/power-ranger/:id", Method::GET, handler("one"));
        let router = table.compile().unwrap();

        assert_eq!(
            found_params(&router, "/power-ranger/7", &Method::GET),
            Some(vec![("id".to_string(), "7".to_string())])
        );
        assert_eq!(
            found_params(&router, "/power-ranger/Red%20Ranger/", &Method::GET),
            Some(vec![("id".to_string(), "Red Ranger".to_string())])
        );
    }

    #[test]
    fn test_method_not_allowed_lists_methods() {
        let mut table = RouteTable::default();
        table.insert("/power-ranger/:id", Method::GET, handler("get"));
        table.insert("/power-ranger/:id", Method::PUT, handler("put"));
        table.insert("/power-ranger/:id", Method::DELETE, handler("delete"));
        let router = table.compile().unwrap();

        match router.match_route("/power-ranger/1", &Method::POST) {
            RouteMatch::MethodNotAllowed { allowed } => {
                assert_eq!(allowed, vec![Method::DELETE, Method::GET, Method::PUT]);
            }
            _ => panic!("expected method not allowed"),
        }
        assert!(matches!(
            router.match_route("/zords", &Method::GET),
            RouteMatch::NotFound
        ));
    }

    #[tokio::test]
    async fn test_duplicate_declaration_last_wins() {
        use http_body_util::BodyExt;

        let mut table = RouteTable::default();
        table.insert("/power-ranger", Method::GET, handler("first"));
        table.insert("/power-ranger", Method::GET, handler("second"));

        let router = table.compile().unwrap();
        assert_eq!(router.registered_routes().len(), 1);

        let RouteMatch::Found { handler, .. } = router.match_route("/power-ranger", &Method::GET) else {
            panic!("expected a match");
        };
        let (parts, _) = http::Request::new(()).into_parts();
        let request = Request::new(parts, Bytes::new(), PathParams::new());
        let response = handler(request, Arc::new(Environment::Development)).await.unwrap();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"second");
    }

    #[test]
    fn test_route_conflict_detection() {
        let mut table = RouteTable::default();
        table.insert("/power-ranger/:id", Method::GET, handler("id"));
        table.insert("/power-ranger/:name", Method::DELETE, handler("name"));

        let err = match table.compile() {
            Err(err) => err,
            Ok(_) => panic!("expected a conflict"),
        };
        assert_eq!(err.new_path, "/power-ranger/:name");
        assert_eq!(err.existing_path, "/power-ranger/:id");
        assert_eq!(err.method, Some(Method::DELETE));
        assert!(err.to_string().contains("route conflict"));
    }
}
