//! Handlers for the `/permissions` resource.
//!
//! Slugs are normalised before they are stored or compared.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use coachhub_core::error::CoreError;
use coachhub_core::rbac::normalize_slug;
use coachhub_core::types::DbId;
use coachhub_core::validation::{ensure_non_empty_patch, validate_dto};
use coachhub_db::models::permission::{CreatePermission, Permission, UpdatePermission};
use coachhub_db::repositories::PermissionRepo;

use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/permissions
pub async fn create_permission(
    State(state): State<AppState>,
    Json(input): Json<CreatePermission>,
) -> AppResult<ApiResponse<Permission>> {
    validate_dto(&input)?;
    let slug = normalize_slug(&input.slug)?;
    if PermissionRepo::slug_exists(&state.pool, &slug, None).await? {
        return Err(CoreError::Conflict(format!("Permission '{slug}' already exists")).into());
    }
    let permission = PermissionRepo::create(&state.pool, &input, &slug).await?;
    Ok(ApiResponse::created("Permission created successfully", permission))
}

/// GET /api/v1/permissions
pub async fn list_permissions(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<Permission>>> {
    let permissions = PermissionRepo::list(&state.pool).await?;
    Ok(ApiResponse::ok("Permissions fetched successfully", permissions))
}

/// GET /api/v1/permissions/{id}
pub async fn get_permission(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Permission>> {
    let permission = PermissionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Permission", id))?;
    Ok(ApiResponse::ok("Permission fetched successfully", permission))
}

/// PATCH /api/v1/permissions/{id}
pub async fn update_permission(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(patch): Json<UpdatePermission>,
) -> AppResult<ApiResponse<Permission>> {
    ensure_non_empty_patch(patch.is_empty())?;
    validate_dto(&patch)?;
    let slug = patch.slug.as_deref().map(normalize_slug).transpose()?;
    if let Some(ref slug) = slug {
        if PermissionRepo::slug_exists(&state.pool, slug, Some(id)).await? {
            return Err(CoreError::Conflict(format!("Permission '{slug}' already exists")).into());
        }
    }
    let permission = PermissionRepo::update(&state.pool, id, &patch, slug.as_deref())
        .await?
        .ok_or_else(|| AppError::not_found("Permission", id))?;
    Ok(ApiResponse::ok("Permission updated successfully", permission))
}

/// DELETE /api/v1/permissions/{id}
pub async fn delete_permission(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if PermissionRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Permission", id))
    }
}
