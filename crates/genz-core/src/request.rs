//! Request type handed to route handlers after routing

use crate::path_params::PathParams;
use bytes::Bytes;
use http::{request::Parts, HeaderMap, Method, Uri};

/// A routed HTTP request with its body fully read
#[derive(Debug)]
pub struct Request {
    parts: Parts,
    body: Bytes,
    path_params: PathParams,
}

impl Request {
    pub(crate) fn new(parts: Parts, body: Bytes, path_params: PathParams) -> Self {
        Self {
            parts,
            body,
            path_params,
        }
    }

    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    pub fn uri(&self) -> &Uri {
        &self.parts.uri
    }

    pub fn path(&self) -> &str {
        self.parts.uri.path()
    }

    /// Raw query string, without the leading `?`
    pub fn query_string(&self) -> Option<&str> {
        self.parts.uri.query()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn path_params(&self) -> &PathParams {
        &self.path_params
    }
}
