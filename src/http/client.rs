//! HTTP client for the Richpanel API
//!
//! Provides a client that handles:
//! - Base URL joining and default headers
//! - Authentication via the auth module
//! - Response body parsing
//! - Error classification (status, timeout, transport, malformed JSON)

use super::request::{ApiRequest, RequestExecutor};
use crate::auth::{AuthConfig, Authenticator};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Production base URL of the Richpanel REST API
pub const DEFAULT_BASE_URL: &str = "https://api.richpanel.com/v1";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all requests
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        let mut default_headers = HashMap::new();
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            default_headers,
            user_agent: format!("richpanel-connector/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client that sends each request once and parses the JSON body
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    authenticator: Option<Authenticator>,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            config,
            authenticator: None,
        })
    }

    /// Create a client with authentication
    ///
    /// Fails if the credential cannot be sent (an empty API key).
    pub fn with_auth(config: HttpClientConfig, auth_config: AuthConfig) -> Result<Self> {
        let authenticator = Authenticator::new(auth_config);
        authenticator.validate()?;

        let mut client = Self::with_config(config)?;
        client.authenticator = Some(authenticator);
        Ok(client)
    }

    /// Check if an authenticator is attached
    pub fn has_authenticator(&self) -> bool {
        self.authenticator.is_some()
    }

    /// Send a request and return the raw response
    ///
    /// Non-2xx statuses are turned into `Error::HttpStatus`.
    pub async fn send(&self, request: &ApiRequest) -> Result<Response> {
        let url = self.build_url(&request.path);
        let timeout = request.timeout.unwrap_or(self.config.timeout);
        let method: Method = request.method.into();

        let builder = self.prepare(method.clone(), &url, request, timeout);
        let response = builder
            .send()
            .await
            .map_err(|e| transport_error(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!("Failed to read {status} body from {url}: {e}");
                    format!("<unreadable body: {e}>")
                }
            };
            debug!("{method} {url} returned {status}");
            return Err(Error::http_status(status.as_u16(), body));
        }

        debug!("Request succeeded: {method} {url}");
        Ok(response)
    }

    /// Assemble headers, query, body and credential for one request
    fn prepare(
        &self,
        method: Method,
        url: &str,
        request: &ApiRequest,
        timeout: Duration,
    ) -> RequestBuilder {
        let headers = self.config.default_headers.iter().chain(&request.headers);
        let mut builder = headers.fold(
            self.client.request(method, url).timeout(timeout),
            |builder, (name, value)| builder.header(name.as_str(), value.as_str()),
        );

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        match &self.authenticator {
            Some(auth) => auth.apply(builder),
            None => builder,
        }
    }

    /// Send a request and parse the JSON response
    ///
    /// An empty body parses as an empty object.
    pub async fn send_json(&self, request: &ApiRequest) -> Result<Value> {
        let timeout = request.timeout.unwrap_or(self.config.timeout);
        let response = self.send(request).await?;
        let text = response
            .text()
            .await
            .map_err(|e| transport_error(e, timeout))?;
        if text.trim().is_empty() {
            return Ok(Value::Object(serde_json::Map::new()));
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

/// Classify a reqwest failure, whether raised while sending or while reading the body
fn transport_error(e: reqwest::Error, timeout: Duration) -> Error {
    if is_timeout(&e) {
        Error::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        }
    } else {
        Error::Http(e)
    }
}

/// Body read timeouts surface as a decode error wrapping a timed-out source
fn is_timeout(e: &reqwest::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(e);
    while let Some(err) = source {
        if let Some(inner) = err.downcast_ref::<reqwest::Error>() {
            if inner.is_timeout() {
                return true;
            }
        }
        if let Some(io) = err.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::TimedOut {
                return true;
            }
        }
        source = err.source();
    }
    false
}

#[async_trait]
impl RequestExecutor for HttpClient {
    async fn execute(&self, request: &ApiRequest) -> Result<Value> {
        self.send_json(request).await
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_authenticator", &self.authenticator.is_some())
            .finish_non_exhaustive()
    }
}
