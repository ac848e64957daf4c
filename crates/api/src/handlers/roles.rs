//! Handlers for the `/roles` resource.
//!
//! A role's permission list may only name permissions that exist.

use std::collections::HashSet;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use coachhub_core::error::CoreError;
use coachhub_core::rbac::{normalize_slug, normalize_slugs, unknown_permissions};
use coachhub_core::types::DbId;
use coachhub_core::validation::{ensure_non_empty_patch, validate_dto};
use coachhub_db::models::role::{CreateRole, Role, UpdateRole};
use coachhub_db::repositories::{PermissionRepo, RoleRepo};
use coachhub_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Normalise requested permission slugs and reject any that are not defined.
async fn resolve_permissions(pool: &DbPool, requested: &[String]) -> AppResult<Vec<String>> {
    let slugs = normalize_slugs(requested)?;
    if slugs.is_empty() {
        return Ok(slugs);
    }
    let known: HashSet<String> = PermissionRepo::list_slugs(pool).await?.into_iter().collect();
    let unknown = unknown_permissions(&slugs, &known);
    if !unknown.is_empty() {
        return Err(CoreError::InvalidInput(format!(
            "Unknown permission(s): {}",
            unknown.join(", ")
        ))
        .into());
    }
    Ok(slugs)
}

fn duplicate(slug: &str) -> AppError {
    CoreError::Conflict(format!("Role '{slug}' already exists")).into()
}

/// POST /api/v1/roles
pub async fn create_role(
    State(state): State<AppState>,
    Json(input): Json<CreateRole>,
) -> AppResult<ApiResponse<Role>> {
    validate_dto(&input)?;
    let slug = normalize_slug(&input.slug)?;
    let permissions = resolve_permissions(&state.pool, &input.permissions).await?;
    if RoleRepo::slug_exists(&state.pool, &slug, None).await? {
        return Err(duplicate(&slug));
    }
    let role = RoleRepo::create(&state.pool, input.name.trim(), &slug, &permissions).await?;
    tracing::info!(role_id = role.id, slug = %role.slug, "Role created");
    Ok(ApiResponse::created("Role created successfully", role))
}

/// GET /api/v1/roles
pub async fn list_roles(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<Role>>> {
    let roles = RoleRepo::list(&state.pool).await?;
    Ok(ApiResponse::ok("Roles fetched successfully", roles))
}

/// GET /api/v1/roles/{id}
pub async fn get_role(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Role>> {
    let role = RoleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Role", id))?;
    Ok(ApiResponse::ok("Role fetched successfully", role))
}

/// PATCH /api/v1/roles/{id}
pub async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(patch): Json<UpdateRole>,
) -> AppResult<ApiResponse<Role>> {
    ensure_non_empty_patch(patch.is_empty())?;
    validate_dto(&patch)?;

    let slug = patch.slug.as_deref().map(normalize_slug).transpose()?;
    if let Some(ref slug) = slug {
        if RoleRepo::slug_exists(&state.pool, slug, Some(id)).await? {
            return Err(duplicate(slug));
        }
    }
    let permissions = match patch.permissions {
        Some(ref requested) => Some(resolve_permissions(&state.pool, requested).await?),
        None => None,
    };

    let role = RoleRepo::update(
        &state.pool,
        id,
        patch.name.as_deref().map(str::trim),
        slug.as_deref(),
        permissions.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::not_found("Role", id))?;
    Ok(ApiResponse::ok("Role updated successfully", role))
}

/// DELETE /api/v1/roles/{id}
pub async fn delete_role(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if RoleRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Role", id))
    }
}
