//! Engine types
//!
//! Output items, run options and statistics for the execution engine.

use crate::pagination::MissingDataPolicy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// One output item, paired with the input record that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionItem {
    /// Output JSON
    pub json: Value,
    /// Index of the input record
    pub paired_item: usize,
}

impl ExecutionItem {
    /// Create an output item
    pub fn new(json: Value, paired_item: usize) -> Self {
        Self { json, paired_item }
    }

    /// Create an error item for a failed record
    pub fn error(message: impl Into<String>, paired_item: usize) -> Self {
        Self::new(json!({"error": message.into()}), paired_item)
    }

    /// Check if this item reports a failed record
    pub fn is_error(&self) -> bool {
        self.json
            .as_object()
            .is_some_and(|obj| obj.len() == 1 && obj.contains_key("error"))
    }
}

/// Options for one engine run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionOptions {
    /// Turn per-record failures into error items instead of aborting
    pub continue_on_fail: bool,
    /// Records processed at the same time (at least 1)
    pub concurrency: usize,
    /// How paginated reads treat pages without an item array
    pub missing_data: MissingDataPolicy,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            continue_on_fail: false,
            concurrency: 1,
            missing_data: MissingDataPolicy::Empty,
        }
    }
}

impl ExecutionOptions {
    /// Create default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set continue-on-fail mode
    #[must_use]
    pub fn with_continue_on_fail(mut self, continue_on_fail: bool) -> Self {
        self.continue_on_fail = continue_on_fail;
        self
    }

    /// Set record concurrency; zero is treated as one
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Set the missing-data policy for paginated reads
    #[must_use]
    pub fn with_missing_data(mut self, policy: MissingDataPolicy) -> Self {
        self.missing_data = policy;
        self
    }
}

/// Statistics from one engine run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Input records processed
    pub records: usize,
    /// Output items emitted, error items included
    pub items: usize,
    /// Records that failed
    pub errors: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

/// Output of one engine run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOutput {
    /// Output items in input order
    pub items: Vec<ExecutionItem>,
    /// Run statistics
    pub stats: RunStats,
}
