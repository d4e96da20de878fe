//! Authentication module
//!
//! Richpanel authenticates every request with an API key carried in the
//! `x-richpanel-key` header. The `Authenticator` applies the configured
//! credential to each outgoing request.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, RICHPANEL_KEY_HEADER};
