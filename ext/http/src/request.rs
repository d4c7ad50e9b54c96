//! Simple `HttpRequest` for testing and basic use cases.
//!
//! A lightweight, framework-free view of an incoming request: method, path,
//! headers and the raw body. Servers built on a real HTTP stack can skip it
//! and call [`Gateway::translate_parts`](crate::Gateway::translate_parts)
//! directly.

use std::collections::HashMap;

/// Simple HTTP request for translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpRequest {
    method: String,
    path: String,
    query: Option<String>,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl HttpRequest {
    /// Create a builder for `HttpRequest`.
    #[must_use]
    pub fn builder() -> HttpRequestBuilder {
        HttpRequestBuilder::default()
    }

    /// Shorthand for a `GET` request with no body.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::builder().method("GET").path(path).build()
    }

    /// Shorthand for a `POST` request with a body.
    #[must_use]
    pub fn post(path: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self::builder().method("POST").path(path).body(body).build()
    }

    /// Get the HTTP method.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Get the request path, without the query string.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get the raw query string (after `?`), if any.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Get a header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Get the raw body.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Builder for `HttpRequest`.
#[derive(Debug, Default)]
pub struct HttpRequestBuilder {
    request: HttpRequest,
}

impl HttpRequestBuilder {
    /// Set the HTTP method.
    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.request.method = method.into();
        self
    }

    /// Set the request target. Anything after `?` is kept as the query string
    /// and never takes part in template matching.
    #[must_use]
    pub fn path(mut self, target: impl Into<String>) -> Self {
        let mut path = target.into();
        self.request.query = path.find('?').map(|i| {
            let query = path[i + 1..].to_owned();
            path.truncate(i);
            query
        });
        self.request.path = path;
        self
    }

    /// Add a header (name is lowercased for case-insensitive lookup).
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request
            .headers
            .insert(name.into().to_lowercase(), value.into());
        self
    }

    /// Set the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.request.body = body.into();
        self
    }

    /// Build the `HttpRequest`.
    #[must_use]
    pub fn build(self) -> HttpRequest {
        self.request
    }
}
