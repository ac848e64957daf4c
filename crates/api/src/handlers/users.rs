//! Handlers for the `/users` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use coachhub_core::types::DbId;
use coachhub_db::models::user::{
    BulkRegisterResult, BulkRegisterUsers, CreateUser, UpdateUser, UserView,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::ApiResponse;
use crate::services::users::{self as service, UserPermissions};
use crate::state::AppState;

/// Maximum page size for user listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for user listing.
const DEFAULT_LIMIT: i64 = 50;

/// Query parameters for `GET /users`.
#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /api/v1/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<ApiResponse<UserView>> {
    let user = service::create(&state, &input).await?;
    Ok(ApiResponse::created("User created successfully", user))
}

/// POST /api/v1/users/bulk
///
/// Called by the mentee roster upload. Users whose email is already
/// registered are reported under `existing` instead of failing the batch.
pub async fn bulk_register(
    State(state): State<AppState>,
    Json(input): Json<BulkRegisterUsers>,
) -> AppResult<ApiResponse<BulkRegisterResult>> {
    let result = service::bulk_register(&state, &input).await?;
    Ok(ApiResponse::created("Users registered successfully", result))
}

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<UserListQuery>,
) -> AppResult<ApiResponse<Vec<UserView>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);
    let users = service::list(&state, limit, offset).await?;
    Ok(ApiResponse::ok("Users fetched successfully", users))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<UserView>> {
    let user = service::find(&state, id).await?;
    Ok(ApiResponse::ok("User fetched successfully", user))
}

/// GET /api/v1/users/{id}/permissions
pub async fn get_user_permissions(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<UserPermissions>> {
    let permissions = service::permissions(&state, id).await?;
    Ok(ApiResponse::ok("User permissions fetched successfully", permissions))
}

/// PATCH /api/v1/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(patch): Json<UpdateUser>,
) -> AppResult<ApiResponse<UserView>> {
    let user = service::update(&state, id, &patch).await?;
    Ok(ApiResponse::ok("User updated successfully", user))
}

/// DELETE /api/v1/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    service::remove(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
