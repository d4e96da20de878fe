//! Tests for engine module

use super::*;
use crate::error::Error;
use crate::http::testing::ScriptedExecutor;
use crate::pagination::MissingDataPolicy;
use async_trait::async_trait;
use chrono::TimeZone;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;

fn record(value: Value) -> Params {
    match value {
        Value::Object(map) => Params::new(map),
        other => panic!("record must be an object, got {other}"),
    }
}

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap()
}

/// Echoes the request path after a delay that shrinks with the record id,
/// so later records finish first
struct SlowEcho;

#[async_trait]
impl RequestExecutor for SlowEcho {
    async fn execute(&self, request: &ApiRequest) -> Result<Value> {
        let id: u64 = request
            .path
            .rsplit('/')
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(50u64.saturating_sub(id * 10))).await;
        Ok(json!({"path": request.path}))
    }
}

// ============================================================================
// ExecutionItem / Options Tests
// ============================================================================

#[test]
fn test_execution_item_error() {
    let item = ExecutionItem::error("boom", 3);
    assert_eq!(item.json, json!({"error": "boom"}));
    assert_eq!(item.paired_item, 3);
    assert!(item.is_error());
    assert!(!ExecutionItem::new(json!({"id": 1}), 0).is_error());
}

#[test]
fn test_execution_options_default() {
    let options = ExecutionOptions::default();
    assert!(!options.continue_on_fail);
    assert_eq!(options.concurrency, 1);
    assert_eq!(options.missing_data, MissingDataPolicy::Empty);
}

#[test]
fn test_execution_options_builder() {
    let options = ExecutionOptions::new()
        .with_continue_on_fail(true)
        .with_concurrency(0)
        .with_missing_data(MissingDataPolicy::Error);

    assert!(options.continue_on_fail);
    assert_eq!(options.concurrency, 1);
    assert_eq!(options.missing_data, MissingDataPolicy::Error);
}

// ============================================================================
// Run Tests
// ============================================================================

#[tokio::test]
async fn test_single_request_per_record() {
    let executor = ScriptedExecutor::ok(vec![json!({"id": "u1"}), json!({"id": "u2"})]);
    let engine = Engine::new(executor);

    let output = engine
        .run(
            Resource::User,
            Operation::Get,
            vec![record(json!({"userId": "u1"})), record(json!({"userId": "u2"}))],
        )
        .await
        .unwrap();

    assert_eq!(
        output.items,
        vec![
            ExecutionItem::new(json!({"id": "u1"}), 0),
            ExecutionItem::new(json!({"id": "u2"}), 1),
        ]
    );
    let paths: Vec<String> = engine
        .executor()
        .requests()
        .into_iter()
        .map(|r| r.path)
        .collect();
    assert_eq!(paths, vec!["/users/u1", "/users/u2"]);
    assert_eq!(output.stats.records, 2);
    assert_eq!(output.stats.items, 2);
    assert_eq!(output.stats.errors, 0);
}

#[tokio::test]
async fn test_array_response_expands_to_items() {
    let executor = ScriptedExecutor::ok(vec![json!([{"id": 1}, {"id": 2}, {"id": 3}])]);
    let engine = Engine::new(executor);

    let output = engine
        .run(
            Resource::Conversation,
            Operation::GetByCustomer,
            vec![record(json!({"customerIdentifier": "a@b.c"}))],
        )
        .await
        .unwrap();

    assert_eq!(output.items.len(), 3);
    assert!(output.items.iter().all(|item| item.paired_item == 0));
}

#[tokio::test]
async fn test_return_all_paginates() {
    let executor = ScriptedExecutor::ok(vec![
        json!({"tags": [{"id": "a"}], "next_page": true}),
        json!({"tags": [{"id": "b"}], "next_page": false}),
    ]);
    let engine = Engine::new(executor);

    let output = engine
        .run(
            Resource::Tag,
            Operation::GetMany,
            vec![record(json!({"options": {"returnAll": true}}))],
        )
        .await
        .unwrap();

    assert_eq!(
        output.items,
        vec![
            ExecutionItem::new(json!({"id": "a"}), 0),
            ExecutionItem::new(json!({"id": "b"}), 0),
        ]
    );
    assert_eq!(engine.executor().request_count(), 2);
}

#[tokio::test]
async fn test_strict_missing_data_reaches_aggregator() {
    let executor = ScriptedExecutor::ok(vec![json!({"count": 0})]);
    let engine = Engine::new(executor)
        .with_options(ExecutionOptions::new().with_missing_data(MissingDataPolicy::Error));

    let err = engine
        .run(
            Resource::Channel,
            Operation::GetMany,
            vec![record(json!({"options": {"returnAll": true}}))],
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MalformedPage { .. }));
}

#[tokio::test]
async fn test_first_error_aborts_without_continue_on_fail() {
    let executor = ScriptedExecutor::new(vec![
        Err(Error::http_status(404, "not found")),
        Ok(json!({"id": "u2"})),
    ]);
    let engine = Engine::new(executor);

    let err = engine
        .run(
            Resource::User,
            Operation::Get,
            vec![record(json!({"userId": "u1"})), record(json!({"userId": "u2"}))],
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
    assert_eq!(engine.executor().request_count(), 1);
}

#[tokio::test]
async fn test_continue_on_fail_emits_error_items() {
    let executor = ScriptedExecutor::new(vec![
        Ok(json!({"id": "u1"})),
        Err(Error::http_status(500, "boom")),
    ]);
    let engine = Engine::new(executor)
        .with_options(ExecutionOptions::new().with_continue_on_fail(true));

    let output = engine
        .run(
            Resource::User,
            Operation::Get,
            vec![
                record(json!({"userId": "u1"})),
                record(json!({})),
                record(json!({"userId": "u3"})),
            ],
        )
        .await
        .unwrap();

    assert_eq!(output.items.len(), 3);
    assert_eq!(output.items[0], ExecutionItem::new(json!({"id": "u1"}), 0));
    assert_eq!(
        output.items[1],
        ExecutionItem::error("Missing required parameter: userId", 1)
    );
    assert!(output.items[2].is_error());
    assert_eq!(output.items[2].paired_item, 2);
    assert_eq!(output.stats.errors, 2);
    // The record with a missing parameter never reaches the executor.
    assert_eq!(engine.executor().request_count(), 2);
}

#[tokio::test]
async fn test_concurrent_run_keeps_input_order() {
    let engine =
        Engine::new(SlowEcho).with_options(ExecutionOptions::new().with_concurrency(4));
    let records = (1..=4)
        .map(|i| record(json!({"channelId": i})))
        .collect();

    let output = engine
        .run(Resource::Channel, Operation::Get, records)
        .await
        .unwrap();

    let paths: Vec<&Value> = output.items.iter().map(|item| &item.json["path"]).collect();
    assert_eq!(
        paths,
        vec![
            &json!("/channel/1"),
            &json!("/channel/2"),
            &json!("/channel/3"),
            &json!("/channel/4"),
        ]
    );
    let paired: Vec<usize> = output.items.iter().map(|item| item.paired_item).collect();
    assert_eq!(paired, vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn test_event_timestamp_uses_clock() {
    let executor = ScriptedExecutor::ok(vec![json!({"ok": true})]);
    let engine = Engine::new(executor);

    engine
        .run_at(
            Resource::Subscription,
            Operation::Upsert,
            vec![record(json!({
                "appClientId": "app",
                "subscriptionId": "s1",
                "userUid": "u1"
            }))],
            fixed_now(),
        )
        .await
        .unwrap();

    let request = engine.executor().requests().remove(0);
    assert_eq!(
        request.body.unwrap()["time"]["sentAt"],
        json!("2024-05-06T07:08:09.000Z")
    );
}

#[tokio::test]
async fn test_empty_input_runs_nothing() {
    let engine = Engine::new(ScriptedExecutor::default());
    let output = engine
        .run(Resource::User, Operation::GetMany, Vec::new())
        .await
        .unwrap();

    assert!(output.items.is_empty());
    assert_eq!(output.stats.records, 0);
    assert_eq!(output.stats.items, 0);
    assert_eq!(engine.executor().request_count(), 0);
}

// ============================================================================
// Credential Check Tests
// ============================================================================

#[tokio::test]
async fn test_check_connection() {
    let engine = Engine::new(ScriptedExecutor::ok(vec![json!({"users": []})]));
    engine.check_connection().await.unwrap();

    let request = engine.executor().requests().remove(0);
    assert_eq!(request.path, "/users");
}

#[tokio::test]
async fn test_check_connection_failure() {
    let engine = Engine::new(ScriptedExecutor::new(vec![Err(Error::http_status(
        401,
        "unauthorized",
    ))]));
    let err = engine.check_connection().await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 401, .. }));
}
