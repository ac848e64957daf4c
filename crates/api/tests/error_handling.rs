//! Tests for `AppError` to HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server runs.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use coachhub_api::error::AppError;
use coachhub_core::error::CoreError;
use http_body_util::BodyExt;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Domain errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let (status, json) = error_to_response(AppError::not_found("Cohort", 42)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["statusCode"], 404);
    assert_eq!(json["error"], "NOT_FOUND");
    assert_eq!(json["message"], "Cohort with id 42 not found");
}

#[tokio::test]
async fn invalid_input_returns_400_validation_error() {
    let err = AppError::Core(CoreError::InvalidInput("groupSize is required".into()));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "VALIDATION_ERROR");
    assert_eq!(json["message"], "groupSize is required");
}

#[tokio::test]
async fn conflict_error_returns_409() {
    let err = AppError::Core(CoreError::Conflict("Cohort with name 'A' already exists".into()));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "CONFLICT");
}

#[tokio::test]
async fn core_internal_error_is_sanitised() {
    let err = AppError::Core(CoreError::Internal("Ciphertext padding is invalid".into()));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// HTTP-level errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let (status, json) = error_to_response(AppError::BadRequest("No roster file".into())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "BAD_REQUEST");
    assert_eq!(json["message"], "No roster file");
}

#[tokio::test]
async fn internal_error_does_not_leak_details() {
    let err = AppError::InternalError("secret connection string".into());
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "INTERNAL_ERROR");
    assert!(!json["message"].as_str().unwrap().contains("secret"));
}

// ---------------------------------------------------------------------------
// Database errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "NOT_FOUND");
}

#[tokio::test]
async fn pool_timeout_returns_sanitised_500() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::PoolTimedOut)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["statusCode"], 500);
    assert_eq!(json["message"], "An internal error occurred");
}
