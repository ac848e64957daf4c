//! Handlers for the `/notifications` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use coachhub_core::types::DbId;
use coachhub_db::models::notification::{CreateNotification, Notification, NotificationQuery};
use coachhub_db::repositories::NotificationRepo;

use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::services;
use crate::state::AppState;

/// Maximum page size for notification listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for notification listing.
const DEFAULT_LIMIT: i64 = 50;

/// POST /api/v1/notifications
///
/// Unscheduled notifications are dispatched before the response is sent.
pub async fn create_notification(
    State(state): State<AppState>,
    Json(input): Json<CreateNotification>,
) -> AppResult<ApiResponse<Notification>> {
    let notification = services::notifications::create(&state, &input).await?;
    Ok(ApiResponse::created("Notification created successfully", notification))
}

/// GET /api/v1/notifications?userId=&unreadOnly=&limit=&offset=
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(params): Query<NotificationQuery>,
) -> AppResult<ApiResponse<Vec<Notification>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);

    let notifications = NotificationRepo::list_for_user(
        &state.pool,
        params.user_id,
        params.unread_only,
        limit,
        offset,
    )
    .await?;
    Ok(ApiResponse::ok("Notifications fetched successfully", notifications))
}

/// GET /api/v1/notifications/{id}
pub async fn get_notification(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Notification>> {
    let notification = NotificationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Notification", id))?;
    Ok(ApiResponse::ok("Notification fetched successfully", notification))
}

/// POST /api/v1/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Notification>> {
    let notification = NotificationRepo::mark_read(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Notification", id))?;
    Ok(ApiResponse::ok("Notification marked as read", notification))
}

/// DELETE /api/v1/notifications/{id}
pub async fn delete_notification(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if NotificationRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Notification", id))
    }
}
