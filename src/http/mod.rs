//! HTTP client module
//!
//! Provides the request executor used by every Richpanel operation.
//!
//! # Features
//!
//! - **Request Executor Trait**: `RequestExecutor` decouples request
//!   construction and pagination from the transport
//! - **Authentication**: Integration with auth module
//! - **Error Classification**: Non-2xx statuses, timeouts and malformed
//!   bodies map to distinct error variants
//!
//! Requests are sent exactly once. Retries and rate limiting are left to the
//! caller.

mod client;
mod request;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, DEFAULT_BASE_URL};
pub use request::{ApiRequest, RequestExecutor};


#[cfg(test)]
pub(crate) mod testing;
