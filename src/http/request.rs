//! Request description and the executor trait

use crate::error::Result;
use crate::types::{Method, StringMap};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// A single request against the Richpanel API, relative to the base URL
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Path relative to the base URL (e.g. `/tickets/123`)
    pub path: String,
    /// Query parameters
    pub query: StringMap,
    /// Request-specific headers
    pub headers: StringMap,
    /// Request body (JSON)
    pub body: Option<Value>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
}

impl ApiRequest {
    /// Create a request with the given method and path
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            ..Default::default()
        }
    }

    /// Create a GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Create a POST request
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Create a PUT request
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Performs one request and returns the parsed JSON body
///
/// Implementations raise on transport failures, non-2xx statuses and
/// malformed JSON. They must not retry.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Execute the request
    async fn execute(&self, request: &ApiRequest) -> Result<Value>;
}

#[async_trait]
impl<T: RequestExecutor + ?Sized> RequestExecutor for std::sync::Arc<T> {
    async fn execute(&self, request: &ApiRequest) -> Result<Value> {
        (**self).execute(request).await
    }
}
