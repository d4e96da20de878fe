//! Execution engine module
//!
//! Runs one resource/operation over a list of input records.
//!
//! # Overview
//!
//! The engine module provides:
//! - `Engine` - Builds and executes a request plan per input record
//! - `ExecutionOptions` - Continue-on-fail, concurrency and missing-data policy
//! - `ExecutionItem` - One output item paired with its input record

mod types;

pub use types::{ExecutionItem, ExecutionOptions, RunOutput, RunStats};

use crate::error::Result;
use crate::http::{ApiRequest, RequestExecutor};
use crate::operations::{build_plan, Operation, Params, RequestPlan, Resource};
use crate::pagination::PageAggregator;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Path requested by the credential check
pub const CREDENTIAL_CHECK_PATH: &str = "/users";

/// Execution engine over a request executor
pub struct Engine<E> {
    /// Request executor
    executor: E,
    /// Run options
    options: ExecutionOptions,
}

impl<E: RequestExecutor> Engine<E> {
    /// Create an engine with default options
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            options: ExecutionOptions::default(),
        }
    }

    /// Set run options
    #[must_use]
    pub fn with_options(mut self, options: ExecutionOptions) -> Self {
        self.options = options;
        self
    }

    /// Get the run options
    pub fn options(&self) -> &ExecutionOptions {
        &self.options
    }

    /// Get the executor
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Verify the credentials with a cheap authenticated read
    pub async fn check_connection(&self) -> Result<()> {
        self.executor
            .execute(&ApiRequest::get(CREDENTIAL_CHECK_PATH))
            .await?;
        debug!("Credential check succeeded");
        Ok(())
    }

    /// Run an operation over every input record
    pub async fn run(
        &self,
        resource: Resource,
        operation: Operation,
        records: Vec<Params>,
    ) -> Result<RunOutput> {
        self.run_at(resource, operation, records, Utc::now()).await
    }

    /// Run with a fixed clock for event timestamps
    pub async fn run_at(
        &self,
        resource: Resource,
        operation: Operation,
        records: Vec<Params>,
        now: DateTime<Utc>,
    ) -> Result<RunOutput> {
        let start = Instant::now();
        let mut output = RunOutput::default();
        output.stats.records = records.len();

        info!(
            "Running {resource} {operation} over {} records",
            records.len()
        );

        // `buffered` yields in input order whatever the completion order is.
        let mut results = stream::iter(records.into_iter().enumerate())
            .map(|(index, params)| async move {
                let result = self.run_record(resource, operation, &params, now).await;
                (index, result)
            })
            .buffered(self.options.concurrency.max(1));

        while let Some((index, result)) = results.next().await {
            match result {
                Ok(value) => expand(value, index, &mut output.items),
                Err(e) if self.options.continue_on_fail => {
                    if e.is_transport() {
                        warn!("Record {index} failed at the API, continuing: {e}");
                    } else {
                        warn!("Record {index} rejected, continuing: {e}");
                    }
                    output.stats.errors += 1;
                    output.items.push(ExecutionItem::error(e.to_string(), index));
                }
                Err(e) => return Err(e),
            }
        }

        output.stats.items = output.items.len();
        output.stats.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            "Finished {resource} {operation}: {} items, {} errors in {}ms",
            output.stats.items, output.stats.errors, output.stats.duration_ms
        );
        Ok(output)
    }

    /// Build and execute the plan for one record
    async fn run_record(
        &self,
        resource: Resource,
        operation: Operation,
        params: &Params,
        now: DateTime<Utc>,
    ) -> Result<Value> {
        match build_plan(resource, operation, params, now)? {
            RequestPlan::Single(request) => {
                debug!("{} {}", request.method, request.path);
                self.executor.execute(&request).await
            }
            RequestPlan::PaginateAll { endpoint } => {
                PageAggregator::new()
                    .with_missing_data(self.options.missing_data)
                    .paginate_results(&self.executor, &endpoint)
                    .await
            }
        }
    }
}

/// Turn one response into output items: one per array element, else one
fn expand(value: Value, index: usize, items: &mut Vec<ExecutionItem>) {
    match value {
        Value::Array(elements) => items.extend(
            elements
                .into_iter()
                .map(|element| ExecutionItem::new(element, index)),
        ),
        other => items.push(ExecutionItem::new(other, index)),
    }
}

#[cfg(test)]
mod tests;
