//! Auto-pagination aggregator
//!
//! Requests every page of a list endpoint in sequence and merges the items.

use super::types::{MissingDataPolicy, PageKind, PageResponse, PaginationCursor};
use crate::error::{Error, Result};
use crate::http::RequestExecutor;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Walks all pages of a list endpoint
#[derive(Debug, Clone, Copy, Default)]
pub struct PageAggregator {
    missing_data: MissingDataPolicy,
}

impl PageAggregator {
    /// Create an aggregator with the default (lenient) missing-data policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the missing-data policy
    #[must_use]
    pub fn with_missing_data(mut self, policy: MissingDataPolicy) -> Self {
        self.missing_data = policy;
        self
    }

    /// Fetch every page of `endpoint` and return all items in page order
    ///
    /// The first failing page aborts the whole call. Items gathered so far
    /// are dropped with it.
    pub async fn collect_all<E>(&self, executor: &E, endpoint: &str) -> Result<Vec<Value>>
    where
        E: RequestExecutor + ?Sized,
    {
        let kind = PageKind::for_endpoint(endpoint);
        let mut cursor = PaginationCursor::new();
        let mut accumulated = Vec::new();
        let mut has_more = true;

        while has_more {
            let body = executor.execute(&cursor.request(endpoint)).await?;
            let page = PageResponse::parse(kind, body);
            let (items, more) = page.into_parts();

            match items {
                Some(items) => {
                    debug!(
                        "Fetched page {} of {}: {} records",
                        cursor.page,
                        endpoint,
                        items.len()
                    );
                    accumulated.extend(items);
                }
                None => match self.missing_data {
                    MissingDataPolicy::Empty => {
                        warn!(
                            "Page {} of {} has no item array, counting it as empty",
                            cursor.page, endpoint
                        );
                    }
                    MissingDataPolicy::Error => {
                        return Err(Error::malformed_page(endpoint, cursor.page));
                    }
                },
            }

            has_more = more;
            cursor.advance();
        }

        info!(
            "Collected {} records from {} in {} pages",
            accumulated.len(),
            endpoint,
            cursor.page - 1
        );
        Ok(accumulated)
    }

    /// Fetch every page and apply the single-element flattening
    pub async fn paginate_results<E>(&self, executor: &E, endpoint: &str) -> Result<Value>
    where
        E: RequestExecutor + ?Sized,
    {
        let items = self.collect_all(executor, endpoint).await?;
        Ok(flatten_single(items))
    }
}

/// Unwrap a one-element result to that element
///
/// Zero or several items stay an array. A list of one and a single object
/// become indistinguishable after this step.
pub fn flatten_single(mut items: Vec<Value>) -> Value {
    if items.len() == 1 {
        items.remove(0)
    } else {
        Value::Array(items)
    }
}
