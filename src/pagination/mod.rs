//! Pagination module
//!
//! Auto-pagination for Richpanel list endpoints (`/users`, `/tags`,
//! `/channel`, ...).
//!
//! # Overview
//!
//! Every list endpoint takes `page` (1-based) and `per_page` query
//! parameters and answers with an object holding one item array plus an
//! optional `next_page` flag. The field that holds the array depends on the
//! endpoint, so each page is parsed into a `PageResponse` keyed by the
//! endpoint's `PageKind`. Known kinds read their own field. Unknown ones fall
//! back to scanning for the first array that is not `count`.
//!
//! `PageAggregator` walks the pages strictly in sequence and concatenates
//! the items. `flatten_single` is the legacy post-processing step that
//! unwraps a one-element result.

mod aggregator;
mod types;

pub use aggregator::{flatten_single, PageAggregator};
pub use types::{
    MissingDataPolicy, PageKind, PageResponse, PaginationCursor, COUNT_FIELD, NEXT_PAGE_FIELD,
    PAGE_SIZE,
};

#[cfg(test)]
mod tests;
