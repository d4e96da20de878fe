//! Auth configuration types

use std::fmt;

/// Header Richpanel reads the API key from
pub const RICHPANEL_KEY_HEADER: &str = "x-richpanel-key";

/// Authentication configuration
#[derive(Clone, Default)]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// API key sent in a request header
    ApiKey {
        /// Header carrying the key
        header_name: String,
        /// The API key value
        value: String,
    },
}

impl AuthConfig {
    /// The Richpanel credential: API key in the `x-richpanel-key` header
    pub fn richpanel(api_key: impl Into<String>) -> Self {
        Self::ApiKey {
            header_name: RICHPANEL_KEY_HEADER.to_string(),
            value: api_key.into(),
        }
    }

    /// Whether any credential is configured
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

// Keep secrets out of logs.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::ApiKey { header_name, .. } => f
                .debug_struct("ApiKey")
                .field("header_name", header_name)
                .field("value", &"***")
                .finish(),
        }
    }
}
