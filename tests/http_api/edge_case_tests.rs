//! Methods, content types, malformed bodies, and path matching.

use super::helpers::{TestService, create_task, id_of, send, send_json, service, task_count};
use actix_web::{
    http::{Method, StatusCode, header},
    test::TestRequest,
};
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(TestRequest::delete().uri("/api/tasks/"))]
#[case(TestRequest::put().uri("/api/tasks/"))]
#[case(TestRequest::post().uri("/api/tasks/statistics/"))]
#[case(TestRequest::get().uri("/api/tasks/bulk_update/"))]
#[case(TestRequest::post().uri("/api/tasks/1/"))]
#[actix_web::test]
async fn unsupported_method_is_rejected(service: TestService, #[case] request: TestRequest) {
    let response = send(&service, request).await;

    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert!(response.body["detail"].as_str().is_some_and(|detail| detail.starts_with("Method")));
}

#[rstest]
#[actix_web::test]
async fn write_without_json_content_type_is_unsupported(service: TestService) {
    let response = send(
        &service,
        TestRequest::post()
            .uri("/api/tasks/")
            .insert_header((header::CONTENT_TYPE, "text/plain"))
            .set_payload(r#"{"title": "Plain"}"#),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(task_count(&service).await, 0);
}

#[rstest]
#[actix_web::test]
async fn write_without_content_type_is_unsupported(service: TestService) {
    let response = send(
        &service,
        TestRequest::post()
            .uri("/api/tasks/")
            .set_payload(r#"{"title": "Bare"}"#),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[rstest]
#[actix_web::test]
async fn json_content_type_with_charset_is_accepted(service: TestService) {
    let response = send(
        &service,
        TestRequest::post()
            .uri("/api/tasks/")
            .insert_header((header::CONTENT_TYPE, "application/json; charset=utf-8"))
            .set_payload(r#"{"title": "Charset"}"#),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_a_bad_request(service: TestService) {
    let response = send(
        &service,
        TestRequest::post()
            .uri("/api/tasks/")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload(r#"{"title": "#),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(
        response.body["detail"]
            .as_str()
            .is_some_and(|detail| detail.starts_with("JSON parse error"))
    );
    assert_eq!(task_count(&service).await, 0);
}

#[rstest]
#[actix_web::test]
async fn empty_body_fails_field_validation(service: TestService) {
    let response = send(
        &service,
        TestRequest::post()
            .uri("/api/tasks/")
            .insert_header((header::CONTENT_TYPE, "application/json")),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["errors"],
        json!({"title": ["This field is required."]})
    );
}

#[rstest]
#[actix_web::test]
async fn non_object_body_is_rejected(service: TestService) {
    let response = send_json(
        &service,
        TestRequest::post().uri("/api/tasks/"),
        &json!(["not", "an", "object"]),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["errors"]["non_field_errors"].is_array());
}

#[rstest]
#[case(TestRequest::get())]
#[case(TestRequest::delete())]
#[case(TestRequest::patch().set_json(json!({"status": "completed"})))]
#[actix_web::test]
async fn id_beyond_the_integer_range_is_not_found(
    service: TestService,
    #[case] request: TestRequest,
) {
    create_task(&service, json!({"title": "Exists"})).await;

    let response = send(&service, request.uri("/api/tasks/99999999999999999999/")).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({"detail": "Not found."}));
    assert_eq!(task_count(&service).await, 1);
}

#[rstest]
#[case("/api/")]
#[case("/api/tasks/")]
#[case("/api/tasks/high_priority/")]
#[case("/api/tasks/statistics/")]
#[case("/api/tasks/1/")]
#[actix_web::test]
async fn read_routes_answer_head(service: TestService, #[case] path: &str) {
    create_task(&service, json!({"title": "Exists"})).await;

    let response = send(
        &service,
        TestRequest::default().method(Method::HEAD).uri(path),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn head_on_a_write_only_route_is_not_allowed(service: TestService) {
    let response = send(
        &service,
        TestRequest::default()
            .method(Method::HEAD)
            .uri("/api/tasks/bulk_update/"),
    )
    .await;

    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[rstest]
#[case("/api/tasks")]
#[case("/api/tasks/1")]
#[case("/api/tasks/high_priority")]
#[case("/api/tasks/abc/")]
#[case("/api/unknown/")]
#[actix_web::test]
async fn unmatched_paths_are_not_found(service: TestService, #[case] path: &str) {
    create_task(&service, json!({"title": "Exists"})).await;

    let response = send(&service, TestRequest::get().uri(path)).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({"detail": "Not found."}));
}

#[rstest]
#[actix_web::test]
async fn post_without_trailing_slash_creates_nothing(service: TestService) {
    let response = send_json(
        &service,
        TestRequest::post().uri("/api/tasks"),
        &json!({"title": "Lost"}),
    )
    .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(task_count(&service).await, 0);
}

#[rstest]
#[actix_web::test]
async fn failed_request_does_not_affect_the_next(service: TestService) {
    send(
        &service,
        TestRequest::post()
            .uri("/api/tasks/")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{"),
    )
    .await;

    let created = create_task(&service, json!({"title": "Still works"})).await;

    assert_eq!(id_of(&created), 1);
}

#[rstest]
#[actix_web::test]
async fn unsupported_media_type_is_checked_before_lookup(service: TestService) {
    let response = send(
        &service,
        TestRequest::patch()
            .uri("/api/tasks/77/")
            .insert_header((header::CONTENT_TYPE, "text/plain"))
            .set_payload("status=completed"),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
}
