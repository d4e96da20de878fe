//! Tests for pagination module

use super::*;
use crate::error::Error;
use crate::http::testing::ScriptedExecutor;
use serde_json::{json, Value};
use test_case::test_case;

fn page_numbers(executor: &ScriptedExecutor) -> Vec<String> {
    executor
        .requests()
        .iter()
        .map(|r| r.query.get("page").cloned().unwrap_or_default())
        .collect()
}

// ============================================================================
// PageKind Tests
// ============================================================================

#[test_case("/users", PageKind::Users)]
#[test_case("users", PageKind::Users)]
#[test_case("/tags", PageKind::Tags)]
#[test_case("/channel", PageKind::Channels)]
#[test_case("/tickets", PageKind::Generic)]
#[test_case("/users/42", PageKind::Generic)]
fn test_page_kind_for_endpoint(endpoint: &str, expected: PageKind) {
    assert_eq!(PageKind::for_endpoint(endpoint), expected);
}

// ============================================================================
// PageResponse Tests
// ============================================================================

#[test]
fn test_known_kind_reads_own_field() {
    let page = PageResponse::parse(
        PageKind::Users,
        json!({"meta": [1, 2], "users": [{"id": 1}], "next_page": false}),
    );
    assert_eq!(page.data_field(), Some("users"));
    assert_eq!(page.items().unwrap().len(), 1);
}

#[test]
fn test_known_kind_falls_back_to_scan() {
    let page = PageResponse::parse(PageKind::Tags, json!({"data": [{"id": "t1"}]}));
    assert_eq!(page.data_field(), Some("data"));
}

#[test]
fn test_generic_scan_skips_count_and_scalars() {
    let page = PageResponse::parse(
        PageKind::Generic,
        json!({"count": [9], "total": 3, "items": [{"id": 1}], "other": [{"id": 2}]}),
    );
    assert_eq!(page.data_field(), Some("items"));
    assert_eq!(page.items().unwrap(), &[json!({"id": 1})]);
}

#[test]
fn test_no_data_field() {
    let page = PageResponse::parse(PageKind::Generic, json!({"count": 0}));
    assert_eq!(page.data_field(), None);
    assert!(page.items().is_none());
    assert!(!page.has_more());
}

#[test]
fn test_non_object_body_is_empty_page() {
    let page = PageResponse::parse(PageKind::Users, json!([{"id": 1}]));
    assert!(page.items().is_none());
    assert!(!page.has_more());
}

#[test_case(json!(true), true)]
#[test_case(json!(2), true)]
#[test_case(json!("https://api.richpanel.com/v1/users?page=2"), true)]
#[test_case(json!(false), false)]
#[test_case(json!(null), false)]
#[test_case(json!(0), false)]
#[test_case(json!(""), false)]
fn test_has_more_truthiness(flag: Value, expected: bool) {
    let page = PageResponse::parse(PageKind::Generic, json!({"items": [], "next_page": flag}));
    assert_eq!(page.has_more(), expected);
}

#[test]
fn test_into_parts() {
    let page = PageResponse::parse(
        PageKind::Channels,
        json!({"channels": [{"id": "c1"}, {"id": "c2"}], "next_page": 1}),
    );
    let (items, has_more) = page.into_parts();
    assert_eq!(items.unwrap().len(), 2);
    assert!(has_more);
}

// ============================================================================
// PaginationCursor Tests
// ============================================================================

#[test]
fn test_cursor_starts_at_one() {
    let cursor = PaginationCursor::new();
    assert_eq!(cursor.page, 1);
    assert_eq!(cursor.page_size, PAGE_SIZE);
    assert_eq!(PAGE_SIZE, 100);
}

#[test]
fn test_cursor_request() {
    let mut cursor = PaginationCursor::new();
    cursor.advance();

    let request = cursor.request("/tags");
    assert_eq!(request.path, "/tags");
    assert_eq!(request.query.get("page"), Some(&"2".to_string()));
    assert_eq!(request.query.get("per_page"), Some(&"100".to_string()));
}

// ============================================================================
// Aggregation Tests
// ============================================================================

#[tokio::test]
async fn test_two_pages_concatenated_in_order() {
    let executor = ScriptedExecutor::ok(vec![
        json!({"users": [{"id": 1}, {"id": 2}], "next_page": true}),
        json!({"users": [{"id": 3}], "next_page": false}),
    ]);

    let items = PageAggregator::new()
        .collect_all(&executor, "/users")
        .await
        .unwrap();

    assert_eq!(executor.request_count(), 2);
    assert_eq!(page_numbers(&executor), vec!["1", "2"]);
    assert_eq!(items, vec![json!({"id": 1}), json!({"id": 2}), json!({"id": 3})]);
}

#[test_case(1)]
#[test_case(2)]
#[test_case(5)]
#[tokio::test]
async fn test_n_pages_issue_n_requests(n: usize) {
    let pages: Vec<Value> = (1..=n)
        .map(|i| json!({"tags": [{"id": i * 10}, {"id": i * 10 + 1}], "next_page": i < n}))
        .collect();
    let executor = ScriptedExecutor::ok(pages);

    let items = PageAggregator::new()
        .collect_all(&executor, "/tags")
        .await
        .unwrap();

    assert_eq!(executor.request_count(), n);
    assert_eq!(items.len(), 2 * n);
    assert_eq!(items[0], json!({"id": 10}));
    assert_eq!(items[2 * n - 1], json!({"id": n * 10 + 1}));
}

#[tokio::test]
async fn test_every_request_uses_fixed_page_size() {
    let executor = ScriptedExecutor::ok(vec![
        json!({"channels": [{"id": "a"}], "next_page": true}),
        json!({"channels": [{"id": "b"}]}),
    ]);

    PageAggregator::new()
        .collect_all(&executor, "/channel")
        .await
        .unwrap();

    for request in executor.requests() {
        assert_eq!(request.path, "/channel");
        assert_eq!(request.query.get("per_page"), Some(&"100".to_string()));
    }
}

#[tokio::test]
async fn test_page_without_array_contributes_nothing_and_continues() {
    let executor = ScriptedExecutor::ok(vec![
        json!({"users": [{"id": 1}], "next_page": true}),
        json!({"count": 0, "next_page": true}),
        json!({"users": [{"id": 2}], "next_page": false}),
    ]);

    let items = PageAggregator::new()
        .collect_all(&executor, "/users")
        .await
        .unwrap();

    assert_eq!(executor.request_count(), 3);
    assert_eq!(items, vec![json!({"id": 1}), json!({"id": 2})]);
}

#[tokio::test]
async fn test_count_only_page_yields_empty_sequence() {
    let executor = ScriptedExecutor::ok(vec![json!({"count": 0})]);

    let result = PageAggregator::new()
        .paginate_results(&executor, "/tickets")
        .await
        .unwrap();

    assert_eq!(executor.request_count(), 1);
    assert_eq!(result, json!([]));
}

#[tokio::test]
async fn test_single_item_is_flattened() {
    let executor = ScriptedExecutor::ok(vec![json!({"tags": [{"id": "t1"}], "next_page": false})]);

    let result = PageAggregator::new()
        .paginate_results(&executor, "/tags")
        .await
        .unwrap();

    assert_eq!(executor.request_count(), 1);
    assert_eq!(result, json!({"id": "t1"}));
}

#[tokio::test]
async fn test_two_items_are_not_flattened() {
    let executor = ScriptedExecutor::ok(vec![json!({"tags": [{"id": "a"}, {"id": "b"}]})]);

    let result = PageAggregator::new()
        .paginate_results(&executor, "/tags")
        .await
        .unwrap();

    assert_eq!(result, json!([{"id": "a"}, {"id": "b"}]));
}

#[tokio::test]
async fn test_failure_discards_partial_results() {
    let executor = ScriptedExecutor::new(vec![
        Ok(json!({"users": [{"id": 1}], "next_page": true})),
        Err(Error::http_status(500, "boom")),
        Ok(json!({"users": [{"id": 3}]})),
    ]);

    let err = PageAggregator::new()
        .collect_all(&executor, "/users")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
    assert_eq!(executor.request_count(), 2);
}

#[tokio::test]
async fn test_strict_policy_rejects_missing_array() {
    let executor = ScriptedExecutor::ok(vec![
        json!({"users": [{"id": 1}], "next_page": true}),
        json!({"count": 0, "next_page": false}),
    ]);

    let err = PageAggregator::new()
        .with_missing_data(MissingDataPolicy::Error)
        .collect_all(&executor, "/users")
        .await
        .unwrap_err();

    match err {
        Error::MalformedPage { endpoint, page } => {
            assert_eq!(endpoint, "/users");
            assert_eq!(page, 2);
        }
        other => panic!("Expected MalformedPage, got {other:?}"),
    }
}

// ============================================================================
// Flattening Tests
// ============================================================================

#[test]
fn test_flatten_single() {
    assert_eq!(flatten_single(vec![]), json!([]));
    assert_eq!(flatten_single(vec![json!({"id": 1})]), json!({"id": 1}));
    assert_eq!(
        flatten_single(vec![json!({"id": 1}), json!({"id": 2})]),
        json!([{"id": 1}, {"id": 2}])
    );
}

#[test]
fn test_missing_data_policy_serde() {
    let policy: MissingDataPolicy = serde_json::from_str("\"error\"").unwrap();
    assert_eq!(policy, MissingDataPolicy::Error);
    assert_eq!(MissingDataPolicy::default(), MissingDataPolicy::Empty);
}
