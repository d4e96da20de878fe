// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Richpanel Connector
//!
//! Runs operations against the Richpanel customer-support REST API:
//! conversations, customers, orders, subscriptions, users, tags and channels.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use richpanel_connector::{ConnectorConfig, Engine, HttpClient, Operation, Params, Resource};
//!
//! #[tokio::main]
//! async fn main() -> richpanel_connector::Result<()> {
//!     let config = ConnectorConfig::default().with_env_overrides();
//!     config.validate()?;
//!
//!     let client = HttpClient::with_auth(config.http_config(), config.auth_config())?;
//!     let engine = Engine::new(client).with_options(config.execution_options());
//!
//!     let params: Params = serde_json::from_value::<serde_json::Map<_, _>>(
//!         serde_json::json!({"options": {"returnAll": true}}),
//!     )?
//!     .into();
//!     let output = engine.run(Resource::Tag, Operation::GetMany, vec![params]).await?;
//!     for item in output.items {
//!         println!("{}", item.json);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │  cli: check / run / operations        config: YAML + env  │
//! └───────────────────────────────┬───────────────────────────┘
//!                                 │
//! ┌───────────────────────────────┴───────────────────────────┐
//! │  engine: per-record run, continue-on-fail, ordered output │
//! └───────┬───────────────────────┬───────────────────────────┘
//!         │                       │
//! ┌───────┴────────┐   ┌──────────┴─────────┐   ┌────────────┐
//! │  operations    │   │  pagination        │   │  auth      │
//! │  dispatch →    │   │  page walk, shape  │   │  API key   │
//! │  RequestPlan   │   │  discovery, flatten│   │  header    │
//! └────────────────┘   └──────────┬─────────┘   └─────┬──────┘
//!                                 │                   │
//!                      ┌──────────┴───────────────────┴──────┐
//!                      │  http: RequestExecutor / HttpClient │
//!                      └─────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the connector
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication
pub mod auth;

/// HTTP request executor
pub mod http;

/// Auto-pagination of list endpoints
pub mod pagination;

/// Resource/operation dispatch
pub mod operations;

/// Per-record execution engine
pub mod engine;

/// Connector configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use auth::{AuthConfig, Authenticator};
pub use config::ConnectorConfig;
pub use engine::{Engine, ExecutionItem, ExecutionOptions, RunOutput};
pub use http::{ApiRequest, HttpClient, HttpClientConfig, RequestExecutor};
pub use operations::{build_plan, Operation, Params, RequestPlan, Resource};
pub use pagination::{flatten_single, MissingDataPolicy, PageAggregator};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
