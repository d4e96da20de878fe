//! Richpanel operations
//!
//! Maps a `(resource, operation)` selection plus the parameters of one input
//! record to a `RequestPlan`: either a single `ApiRequest` or a request to
//! paginate through a whole list endpoint.
//!
//! # Supported operations
//!
//! | Resource | Operations |
//! |---|---|
//! | conversation | create, update, get, getByNumber, getByCustomer, addTags, removeTags, attachOrder |
//! | customer | upsert, get |
//! | order | upsert, get, getFromConversation |
//! | subscription | upsert |
//! | user | get, getMany |
//! | tag | create, getMany |
//! | channel | get, getMany |

mod conversation;
mod customer;
mod directory;
mod dispatch;
mod events;
mod params;
mod types;

pub use dispatch::build_plan;
pub use events::sent_at;
pub use params::Params;
pub use types::{describe, parse_selection, Operation, RequestPlan, Resource};
