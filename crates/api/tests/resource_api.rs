//! Request-level validation tests for the CRUD resources.

mod common;

use axum::http::StatusCode;
use common::{body_json, patch_json, post_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// Corporate settings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn corporate_settings_reject_inverted_price_range() {
    let body = json!({"corporateId": 4, "minPrice": 500.0, "maxPrice": 100.0});
    let response = post_json(common::build_test_app(), "/api/v1/corporate-settings", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(json["message"].as_str().unwrap().contains("minPrice"));
}

#[tokio::test]
async fn unlimited_settings_need_price_tiers() {
    let body = json!({
        "corporateId": 4,
        "minPrice": 100.0,
        "maxPrice": 500.0,
        "isUnlimited": true,
    });
    let response = post_json(common::build_test_app(), "/api/v1/corporate-settings", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn nested_price_tier_errors_name_the_tier() {
    let body = json!({
        "corporateId": 4,
        "minPrice": 100.0,
        "maxPrice": 500.0,
        "isUnlimited": true,
        "unlimitedPrices": [{"month": 1, "price": 10.0}, {"month": 0, "price": 10.0}],
    });
    let response = post_json(common::build_test_app(), "/api/v1/corporate-settings", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(json["message"].as_str().unwrap().contains("[1]"));
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bulk_register_requires_users() {
    let response =
        post_json(common::build_test_app(), "/api/v1/users/bulk", json!({"users": []})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_user_rejects_bad_email() {
    let body = json!({"firstName": "Ada", "lastName": "Lovelace", "email": "not-an-email"});
    let response = post_json(common::build_test_app(), "/api/v1/users", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(json["message"].as_str().unwrap().contains("email"));
}

#[tokio::test]
async fn empty_user_patch_is_rejected() {
    let response = patch_json(common::build_test_app(), "/api/v1/users/1", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// RBAC
// ---------------------------------------------------------------------------

#[tokio::test]
async fn permission_slug_with_spaces_is_rejected() {
    let body = json!({"name": "Edit cohorts", "slug": "cohort edit"});
    let response = post_json(common::build_test_app(), "/api/v1/permissions", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn role_slug_must_be_valid() {
    let body = json!({"name": "Admin", "slug": "admin!"});
    let response = post_json(common::build_test_app(), "/api/v1/roles", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn module_rejects_duplicate_sub_modules() {
    let body = json!({
        "name": "Cohorts",
        "subModules": [{"name": "Upload"}, {"name": " upload "}],
    });
    let response = post_json(common::build_test_app(), "/api/v1/modules", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Notifications and skills
// ---------------------------------------------------------------------------

#[tokio::test]
async fn notification_channel_must_be_known() {
    let body = json!({"userId": 1, "title": "Hi", "body": "Welcome", "channel": "pigeon"});
    let response = post_json(common::build_test_app(), "/api/v1/notifications", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn skill_name_is_required() {
    let response =
        post_json(common::build_test_app(), "/api/v1/skills", json!({"name": ""})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_skill_patch_is_rejected() {
    let response = patch_json(common::build_test_app(), "/api/v1/skills/2", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
