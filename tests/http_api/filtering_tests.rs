//! Query-string filters and listing order.

use super::helpers::{TestService, id_of, seed_task, send, service};
use actix_web::{http::StatusCode, test::TestRequest};
use rstest::rstest;
use serde_json::Value;

async fn seed_four(service: &TestService) {
    for (title, priority, status) in [
        ("Pending", "high", "pending"),
        ("Working", "medium", "in_progress"),
        ("Done low", "low", "completed"),
        ("Done high", "high", "completed"),
    ] {
        seed_task(service, title, priority, status).await;
    }
}

async fn list(service: &TestService, query: &str) -> Vec<Value> {
    let response = send(
        service,
        TestRequest::get().uri(&format!("/api/tasks/{query}")),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    response
        .body
        .as_array()
        .cloned()
        .expect("listing should be an array")
}

#[rstest]
#[case("", 4)]
#[case("?status=completed", 2)]
#[case("?priority=high", 2)]
#[case("?status=completed&priority=high", 1)]
#[case("?status=pending&priority=low", 0)]
#[case("?status=archived", 0)]
#[case("?priority=", 4)]
#[case("?colour=blue", 4)]
#[actix_web::test]
async fn list_filters_combine_with_and(
    service: TestService,
    #[case] query: &str,
    #[case] expected: usize,
) {
    seed_four(&service).await;

    let tasks = list(&service, query).await;

    assert_eq!(tasks.len(), expected);
}

#[rstest]
#[actix_web::test]
async fn status_filter_returns_only_matching_tasks(service: TestService) {
    seed_four(&service).await;

    let tasks = list(&service, "?status=completed").await;

    assert!(tasks.iter().all(|task| task["status"] == "completed"));
}

#[rstest]
#[actix_web::test]
async fn listing_is_newest_first(service: TestService) {
    seed_four(&service).await;

    let ids: Vec<i64> = list(&service, "").await.iter().map(id_of).collect();

    assert_eq!(ids, [4, 3, 2, 1]);
}

#[rstest]
#[actix_web::test]
async fn empty_store_lists_nothing(service: TestService) {
    assert!(list(&service, "").await.is_empty());
}

#[rstest]
#[case("?status=pending&status=completed", "status", "completed")]
#[case("?priority=low&priority=high", "priority", "high")]
#[actix_web::test]
async fn repeated_filter_key_keeps_the_last_value(
    service: TestService,
    #[case] query: &str,
    #[case] field: &str,
    #[case] expected: &str,
) {
    seed_four(&service).await;

    let tasks = list(&service, query).await;

    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().all(|task| task[field] == expected));
}

#[rstest]
#[actix_web::test]
async fn percent_encoded_filter_values_are_decoded(service: TestService) {
    seed_four(&service).await;

    let tasks = list(&service, "?status=in%5Fprogress").await;

    assert_eq!(tasks.len(), 1);
}
