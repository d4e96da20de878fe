//! Connector configuration
//!
//! Settings for talking to the Richpanel API and running operations, loaded
//! from a YAML or JSON file with environment overrides.

use crate::auth::AuthConfig;
use crate::engine::ExecutionOptions;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, DEFAULT_BASE_URL};
use crate::pagination::MissingDataPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding `api_key`
pub const API_KEY_ENV: &str = "RICHPANEL_API_KEY";

/// Environment variable overriding `base_url`
pub const BASE_URL_ENV: &str = "RICHPANEL_BASE_URL";

// ============================================================================
// Connector Config
// ============================================================================

/// Complete connector configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ConnectorConfig {
    /// Base URL for API requests
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Richpanel API key
    #[serde(default)]
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Emit error items instead of aborting on a failed record
    #[serde(default)]
    pub continue_on_fail: bool,

    /// Records processed at the same time
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Handling of list pages without an item array
    #[serde(default)]
    pub missing_data: MissingDataPolicy,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_concurrency() -> usize {
    1
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_secs: default_timeout(),
            user_agent: None,
            continue_on_fail: false,
            concurrency: default_concurrency(),
            missing_data: MissingDataPolicy::default(),
        }
    }
}

impl std::fmt::Debug for ConnectorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectorConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("continue_on_fail", &self.continue_on_fail)
            .field("concurrency", &self.concurrency)
            .field("missing_data", &self.missing_data)
            .finish()
    }
}

impl ConnectorConfig {
    /// Load from a YAML or JSON file (chosen by extension, YAML otherwise)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read config file '{}': {e}",
                    path.display()
                ))
            }
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Parse from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply `RICHPANEL_API_KEY` and `RICHPANEL_BASE_URL` from the process environment
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok());
        self
    }

    /// Apply overrides from an arbitrary lookup; empty values are ignored
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(api_key) = present(API_KEY_ENV) {
            self.api_key = api_key;
        }
        if let Some(base_url) = present(BASE_URL_ENV) {
            self.base_url = base_url;
        }
    }

    /// Check the settings before any request is made
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::missing_field("api_key"));
        }

        let url = url::Url::parse(&self.base_url)
            .map_err(|e| Error::invalid_config("base_url", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_config(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(Error::invalid_config(
                "timeout_secs",
                "must be greater than zero",
            ));
        }
        if self.concurrency == 0 {
            return Err(Error::invalid_config("concurrency", "must be at least 1"));
        }
        Ok(())
    }

    /// HTTP client settings
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.timeout_secs));
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        builder.build()
    }

    /// Credential applied to every request
    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig::richpanel(&self.api_key)
    }

    /// Engine run options
    pub fn execution_options(&self) -> ExecutionOptions {
        ExecutionOptions::new()
            .with_continue_on_fail(self.continue_on_fail)
            .with_concurrency(self.concurrency)
            .with_missing_data(self.missing_data)
    }
}
