//! HTTP server implementation

use crate::config::Environment;
use crate::error::{ApiError, ErrorBoundary};
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::router::{RouteMatch, Router};
use bytes::Bytes;
use http::{header, HeaderValue, Method, StatusCode};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tracing::{error, info};

/// A built application: compiled routes, rendered document and error boundary.
///
/// Cheap to clone; every connection task holds one.
#[derive(Clone)]
pub struct AppService {
    inner: Arc<ServiceInner>,
}

struct ServiceInner {
    router: Router,
    boundary: Arc<dyn ErrorBoundary>,
    environment: Arc<Environment>,
    spec_path: String,
    spec_json: Bytes,
    body_limit: usize,
}

impl AppService {
    pub(crate) fn new(
        router: Router,
        boundary: Arc<dyn ErrorBoundary>,
        environment: Environment,
        spec_path: String,
        spec_json: Bytes,
        body_limit: usize,
    ) -> Self {
        Self {
            inner: Arc::new(ServiceInner {
                router,
                boundary,
                environment: Arc::new(environment),
                spec_path,
                spec_json,
                body_limit,
            }),
        }
    }

    /// Path the API document is served at
    pub fn spec_path(&self) -> &str {
        &self.inner.spec_path
    }

    /// The rendered API document
    pub fn spec_json(&self) -> &Bytes {
        &self.inner.spec_json
    }

    /// Handle one request: route, read the body, validate, run the handler.
    pub async fn dispatch<B>(&self, req: http::Request<B>) -> Response
    where
        B: hyper::body::Body<Data = Bytes>,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        let start = Instant::now();

        let response = self.handle(req, &method, &path).await;
        log_request(&method, &path, response.status(), start);
        response
    }

    async fn handle<B>(&self, req: http::Request<B>, method: &Method, path: &str) -> Response
    where
        B: hyper::body::Body<Data = Bytes>,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let inner = &self.inner;

        if *method == Method::GET && path == inner.spec_path {
            return genz_openapi::openapi_json(&inner.spec_json);
        }

        let (handler, params) = match inner.router.match_route(path, method) {
            RouteMatch::Found { handler, params } => (handler.clone(), params),
            RouteMatch::NotFound => {
                return ApiError::not_found(format!("No route found for {} {}", method, path))
                    .into_response();
            }
            RouteMatch::MethodNotAllowed { allowed } => {
                let allowed_str: Vec<&str> = allowed.iter().map(|m| m.as_str()).collect();
                let mut response = ApiError::method_not_allowed(format!(
                    "Method {} not allowed for {}",
                    method, path
                ))
                .into_response();

                if let Ok(value) = HeaderValue::from_str(&allowed_str.join(", ")) {
                    response.headers_mut().insert(header::ALLOW, value);
                }
                return response;
            }
        };

        let (parts, body) = req.into_parts();
        let body = match read_body(body, inner.body_limit).await {
            Ok(bytes) => bytes,
            Err(err) => return err.into_response(),
        };

        let request = Request::new(parts, body, params);
        match handler(request, inner.environment.clone()).await {
            Ok(response) => response,
            Err(err) => inner.boundary.handle(err, &inner.environment),
        }
    }

    /// Accept connections on `addr` until the listener fails
    pub async fn serve(self, addr: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr: SocketAddr = addr.parse()?;
        let listener = TcpListener::bind(addr).await?;

        info!(
            environment = %self.inner.environment,
            spec = %self.inner.spec_path,
            "GenZ server running on http://{}",
            addr
        );

        loop {
            let (stream, _remote_addr) = listener.accept().await?;
            let io = TokioIo::new(stream);
            let app = self.clone();

            tokio::spawn(async move {
                let service = service_fn(move |req: hyper::Request<Incoming>| {
                    let app = app.clone();
                    async move { Ok::<_, Infallible>(app.dispatch(req).await) }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    error!("Connection error: {}", err);
                }
            });
        }
    }
}

/// Collect the body, rejecting it once it grows past `limit`
async fn read_body<B>(body: B, limit: usize) -> Result<Bytes, ApiError>
where
    B: hyper::body::Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(err) if err.is::<LengthLimitError>() => Err(ApiError::payload_too_large(format!(
            "Request body exceeds the limit of {} bytes",
            limit
        ))),
        Err(err) => Err(
            ApiError::bad_request("Failed to read request body").with_internal(err.to_string()),
        ),
    }
}

/// Log request completion
fn log_request(method: &Method, path: &str, status: StatusCode, start: Instant) {
    let elapsed = start.elapsed();

    if status.is_success() {
        info!(
            method = %method,
            path = %path,
            status = %status.as_u16(),
            duration_ms = %elapsed.as_millis(),
            "Request completed"
        );
    } else {
        error!(
            method = %method,
            path = %path,
            status = %status.as_u16(),
            duration_ms = %elapsed.as_millis(),
            "Request failed"
        );
    }
}
