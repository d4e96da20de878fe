//! Authenticator implementation
//!
//! Resolves the configured credential once and attaches it to every
//! outgoing request.

use super::types::AuthConfig;
use crate::error::{Error, Result};
use reqwest::RequestBuilder;

/// Attaches the credential to outgoing requests
#[derive(Debug, Clone)]
pub struct Authenticator {
    config: AuthConfig,
}

impl Authenticator {
    /// Create an authenticator for `config`
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Reject credentials that could never authenticate
    pub fn validate(&self) -> Result<()> {
        match &self.config {
            AuthConfig::ApiKey { value, .. } if value.trim().is_empty() => {
                Err(Error::auth("API key is empty"))
            }
            _ => Ok(()),
        }
    }

    /// Header name and value to send, if any
    pub fn credential(&self) -> Option<(&str, &str)> {
        match &self.config {
            AuthConfig::None => None,
            AuthConfig::ApiKey { header_name, value } => {
                Some((header_name.as_str(), value.as_str()))
            }
        }
    }

    /// Attach the credential to a request
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match self.credential() {
            Some((name, value)) => req.header(name, value),
            None => req,
        }
    }
}
