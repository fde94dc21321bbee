//! TestClient for integration testing without network binding
//!
//! Requests go through the same dispatch as the server: routing, body limit,
//! the validation pipeline, the handler and the error boundary.
//!
//! # Example
//!
//! ```rust,ignore
//! use genz_core::{GenZApp, TestClient};
//!
//! #[tokio::test]
//! async fn test_get_ranger() {
//!     let client = TestClient::new(build_app());
//!
//!     let response = client.get("/power-ranger/1").await;
//!     response.assert_status(StatusCode::OK);
//! }
//! ```

use crate::app::GenZApp;
use crate::response::Response;
use crate::server::AppService;
use bytes::Bytes;
use http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use http_body_util::{BodyExt, Full};
use serde::{de::DeserializeOwned, Serialize};

/// Test client for integration testing without network binding
pub struct TestClient {
    service: AppService,
}

impl TestClient {
    /// Build the app's service and wrap it.
    ///
    /// # Panics
    ///
    /// Panics if the declared routes conflict.
    pub fn new(app: GenZApp) -> Self {
        match app.into_service() {
            Ok(service) => Self { service },
            Err(err) => panic!("failed to build the app under test: {}", err),
        }
    }

    /// Wrap an already built service
    pub fn from_service(service: AppService) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &AppService {
        &self.service
    }

    /// Send a GET request
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(TestRequest::get(path)).await
    }

    /// Send a POST request with JSON body
    ///
    /// ```rust,ignore
    /// let response = client.post_json("/power-ranger", &json!({"name": "Trini"})).await;
    /// ```
    pub async fn post_json<T: Serialize>(&self, path: &str, body: &T) -> TestResponse {
        self.request(TestRequest::post(path).json(body)).await
    }

    /// Send a request with full control
    ///
    /// ```rust,ignore
    /// let response = client.request(
    ///     TestRequest::put("/power-ranger/1")
    ///         .header("Authorization", "Bearer zordon")
    ///         .json(&json!({"color": "red"}))
    /// ).await;
    /// ```
    pub async fn request(&self, req: TestRequest) -> TestResponse {
        let mut http_req = http::Request::new(Full::new(req.body.unwrap_or_default()));
        *http_req.method_mut() = req.method;
        *http_req.uri_mut() = req.path.parse().unwrap_or_else(|_| http::Uri::from_static("/"));
        *http_req.headers_mut() = req.headers;

        let response = self.service.dispatch(http_req).await;
        TestResponse::from_response(response).await
    }
}

/// Test request builder
#[derive(Debug, Clone)]
pub struct TestRequest {
    method: Method,
    path: String,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl TestRequest {
    fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: &str) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: &str) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: &str) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Any method, e.g. `OPTIONS`
    pub fn method(method: Method, path: &str) -> Self {
        Self::new(method, path)
    }

    /// Add a header; invalid names or values are ignored
    pub fn header(mut self, key: &str, value: &str) -> Self {
        if let (Ok(name), Ok(val)) = (
            key.parse::<http::header::HeaderName>(),
            HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, val);
        }
        self
    }

    /// Set the request body as JSON and the Content-Type to `application/json`
    pub fn json<T: Serialize>(mut self, body: &T) -> Self {
        if let Ok(bytes) = serde_json::to_vec(body) {
            self.body = Some(Bytes::from(bytes));
            self.headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
        }
        self
    }

    /// Set the request body as raw bytes
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn content_type(self, content_type: &str) -> Self {
        self.header("content-type", content_type)
    }
}

/// Test response with assertion helpers
#[derive(Debug)]
pub struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl TestResponse {
    async fn from_response(response: Response) -> Self {
        let (parts, body) = response.into_parts();
        let body = body
            .collect()
            .await
            .map(|b| b.to_bytes())
            .unwrap_or_default();

        Self {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body as text, lossily decoded
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Parse the response body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// # Panics
    ///
    /// Panics if the status code doesn't match.
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status, expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
        self
    }

    /// # Panics
    ///
    /// Panics if the header doesn't exist or doesn't match.
    pub fn assert_header(&self, key: &str, expected: &str) -> &Self {
        let actual = self
            .headers
            .get(key)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        assert_eq!(
            actual, expected,
            "Expected header '{}' to be '{}', got '{}'",
            key, expected, actual
        );
        self
    }

    /// # Panics
    ///
    /// Panics if the body can't be parsed as JSON or doesn't match.
    pub fn assert_json<T: DeserializeOwned + PartialEq + std::fmt::Debug>(
        &self,
        expected: &T,
    ) -> &Self {
        let actual: T = self
            .json()
            .expect("Failed to parse response body as JSON");
        assert_eq!(&actual, expected, "JSON body mismatch");
        self
    }
}
