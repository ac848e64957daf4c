//! Request-level tests for the `/cohort` routes.
//!
//! Only paths that are rejected before the first query are exercised here;
//! the database-backed flows are covered by `cohort_service.rs`.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, patch_json, post_json};
use serde_json::json;
use tower::ServiceExt;

fn valid_cohort() -> serde_json::Value {
    json!({
        "corporateName": "Acme",
        "mentoringType": "ONE_TO_ONE",
        "startDate": "2024-01-01",
        "endDate": "2024-03-31",
        "allowedMentees": 10,
        "minPrice": 100.0,
        "maxPrice": 200.0,
        "noOfInteractions": 6,
    })
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_rejects_zero_allowed_mentees() {
    let mut body = valid_cohort();
    body["allowedMentees"] = json!(0);

    let response = post_json(common::build_test_app(), "/api/v1/cohort", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "VALIDATION_ERROR");
    assert!(json["message"].as_str().unwrap().contains("at least 1"));
}

#[tokio::test]
async fn create_rejects_negative_price() {
    let mut body = valid_cohort();
    body["minPrice"] = json!(-5.0);

    let response = post_json(common::build_test_app(), "/api/v1/cohort", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_rejects_unknown_mentoring_type() {
    let mut body = valid_cohort();
    body["mentoringType"] = json!("PAIR");

    let response = post_json(common::build_test_app(), "/api/v1/cohort", body).await;
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn create_rejects_oversized_chemistry_count() {
    let mut body = valid_cohort();
    body["coachSearchType"] = json!("ALGORITHMIC_MATCHES");
    body["chemistrySessionStatus"] = json!(true);
    body["noOfChemistrySessions"] = json!(i32::MAX);

    let response = post_json(common::build_test_app(), "/api/v1/cohort", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "VALIDATION_ERROR");
    assert!(json["message"]
        .as_str()
        .unwrap()
        .contains("no_of_chemistry_sessions"));
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn patch_rejects_oversized_chemistry_count() {
    let response = patch_json(
        common::build_test_app(),
        "/api/v1/cohort/7",
        json!({"noOfChemistrySessions": 5000}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_patch_is_rejected() {
    let response = patch_json(common::build_test_app(), "/api/v1/cohort/7", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Update payload must contain at least one field");
}

#[tokio::test]
async fn patch_with_blank_name_is_rejected() {
    let response =
        patch_json(common::build_test_app(), "/api/v1/cohort/7", json!({"name": ""})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upload_without_file_part_is_rejected() {
    let boundary = "coachhub-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"note\"\r\n\r\n\
         no file here\r\n\
         --{boundary}--\r\n"
    );
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/cohort/upload/3")
        .header("content-type", format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(body))
        .unwrap();

    let response = common::build_test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "BAD_REQUEST");
    assert_eq!(json["message"], "No roster file was uploaded");
}

#[tokio::test]
async fn upload_with_non_numeric_cohort_id_is_rejected() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/cohort/upload/abc")
        .header("content-type", "multipart/form-data; boundary=x")
        .body(Body::from("--x--\r\n"))
        .unwrap();

    let response = common::build_test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Database failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreachable_database_yields_sanitised_500() {
    let response = common::get(common::build_test_app(), "/api/v1/cohort").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["statusCode"], 500);
    assert_eq!(json["message"], "An internal error occurred");
}
