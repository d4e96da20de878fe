//! Pagination types
//!
//! Page response shapes, the page cursor and the missing-data policy.

use crate::http::ApiRequest;
use crate::types::{is_truthy, JsonObject};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fixed number of records requested per page
pub const PAGE_SIZE: u32 = 100;

/// Reserved field that never holds the item array
pub const COUNT_FIELD: &str = "count";

/// Field signalling that another page exists
pub const NEXT_PAGE_FIELD: &str = "next_page";

/// What to do with a page that carries no item array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingDataPolicy {
    /// Treat the page as contributing zero items
    #[default]
    Empty,
    /// Abort the aggregation with `Error::MalformedPage`
    Error,
}

/// Identity of a list endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// `/users`
    Users,
    /// `/tags`
    Tags,
    /// `/channel`
    Channels,
    /// Any other endpoint
    Generic,
}

impl PageKind {
    /// Resolve the kind from an endpoint path
    pub fn for_endpoint(endpoint: &str) -> Self {
        let path = endpoint.split('?').next().unwrap_or(endpoint);
        match path.trim_matches('/') {
            "users" => Self::Users,
            "tags" => Self::Tags,
            "channel" | "channels" => Self::Channels,
            _ => Self::Generic,
        }
    }

    /// Field a known endpoint stores its items in
    pub fn data_field(self) -> Option<&'static str> {
        match self {
            Self::Users => Some("users"),
            Self::Tags => Some("tags"),
            Self::Channels => Some("channels"),
            Self::Generic => None,
        }
    }
}

/// One page of a listing, tagged by endpoint identity
#[derive(Debug, Clone, PartialEq)]
pub enum PageResponse {
    /// Page of `/users`
    Users(JsonObject),
    /// Page of `/tags`
    Tags(JsonObject),
    /// Page of `/channel`
    Channels(JsonObject),
    /// Page of an endpoint with no known shape
    Generic(JsonObject),
}

impl PageResponse {
    /// Wrap a response body. Non-object bodies become an empty page.
    pub fn parse(kind: PageKind, body: Value) -> Self {
        let fields = match body {
            Value::Object(map) => map,
            _ => JsonObject::new(),
        };
        match kind {
            PageKind::Users => Self::Users(fields),
            PageKind::Tags => Self::Tags(fields),
            PageKind::Channels => Self::Channels(fields),
            PageKind::Generic => Self::Generic(fields),
        }
    }

    /// Endpoint identity of this page
    pub fn kind(&self) -> PageKind {
        match self {
            Self::Users(_) => PageKind::Users,
            Self::Tags(_) => PageKind::Tags,
            Self::Channels(_) => PageKind::Channels,
            Self::Generic(_) => PageKind::Generic,
        }
    }

    fn fields(&self) -> &JsonObject {
        match self {
            Self::Users(f) | Self::Tags(f) | Self::Channels(f) | Self::Generic(f) => f,
        }
    }

    fn into_fields(self) -> JsonObject {
        match self {
            Self::Users(f) | Self::Tags(f) | Self::Channels(f) | Self::Generic(f) => f,
        }
    }

    /// Name of the field holding this page's items, if any
    ///
    /// Known kinds read their own field first. Every kind then falls back
    /// to the first array-valued field other than `count`, in response
    /// order.
    pub fn data_field(&self) -> Option<&str> {
        let fields = self.fields();

        if let Some(known) = self.kind().data_field() {
            if let Some((key, _)) = fields
                .iter()
                .find(|(key, value)| key.as_str() == known && value.is_array())
            {
                return Some(key.as_str());
            }
        }

        fields
            .iter()
            .find(|(key, value)| value.is_array() && key.as_str() != COUNT_FIELD)
            .map(|(key, _)| key.as_str())
    }

    /// Borrow this page's items, if a data field was found
    pub fn items(&self) -> Option<&[Value]> {
        let key = self.data_field()?;
        self.fields()
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    /// Whether the response carries a truthy `next_page`
    pub fn has_more(&self) -> bool {
        self.fields().get(NEXT_PAGE_FIELD).is_some_and(is_truthy)
    }

    /// Consume the page into its items and the has-more flag
    pub fn into_parts(self) -> (Option<Vec<Value>>, bool) {
        let has_more = self.has_more();
        let key = self.data_field().map(str::to_string);
        let mut fields = self.into_fields();
        let items = key.and_then(|k| match fields.remove(&k) {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        });
        (items, has_more)
    }
}

/// Page counter owned by a single aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationCursor {
    /// Current 1-based page number
    pub page: u32,
    /// Records per page
    pub page_size: u32,
}

impl Default for PaginationCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl PaginationCursor {
    /// Start at page 1 with the fixed page size
    pub fn new() -> Self {
        Self {
            page: 1,
            page_size: PAGE_SIZE,
        }
    }

    /// Move to the next page
    pub fn advance(&mut self) {
        self.page += 1;
    }

    /// Request for the current page of `endpoint`
    pub fn request(&self, endpoint: &str) -> ApiRequest {
        ApiRequest::get(endpoint)
            .query("page", self.page.to_string())
            .query("per_page", self.page_size.to_string())
    }
}
