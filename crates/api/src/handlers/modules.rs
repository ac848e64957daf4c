//! Handlers for the `/modules` resource (permission groupings).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use coachhub_core::error::CoreError;
use coachhub_core::rbac::normalize_sub_modules;
use coachhub_core::types::DbId;
use coachhub_core::validation::{ensure_non_empty_patch, validate_dto};
use coachhub_db::models::module::{CreateModule, Module, UpdateModule};
use coachhub_db::repositories::ModuleRepo;

use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::state::AppState;

fn duplicate(name: &str) -> AppError {
    CoreError::Conflict(format!("Module '{name}' already exists")).into()
}

/// POST /api/v1/modules
pub async fn create_module(
    State(state): State<AppState>,
    Json(input): Json<CreateModule>,
) -> AppResult<ApiResponse<Module>> {
    validate_dto(&input)?;
    let name = input.name.trim();
    let sub_modules = normalize_sub_modules(&input.sub_modules)?;
    if ModuleRepo::name_exists(&state.pool, name, None).await? {
        return Err(duplicate(name));
    }
    let module = ModuleRepo::create(&state.pool, name, &sub_modules).await?;
    Ok(ApiResponse::created("Module created successfully", module))
}

/// GET /api/v1/modules
pub async fn list_modules(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<Module>>> {
    let modules = ModuleRepo::list(&state.pool).await?;
    Ok(ApiResponse::ok("Modules fetched successfully", modules))
}

/// GET /api/v1/modules/{id}
pub async fn get_module(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Module>> {
    let module = ModuleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Module", id))?;
    Ok(ApiResponse::ok("Module fetched successfully", module))
}

/// PATCH /api/v1/modules/{id}
pub async fn update_module(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(patch): Json<UpdateModule>,
) -> AppResult<ApiResponse<Module>> {
    ensure_non_empty_patch(patch.is_empty())?;
    validate_dto(&patch)?;

    let name = patch.name.as_deref().map(str::trim);
    if let Some(name) = name {
        if ModuleRepo::name_exists(&state.pool, name, Some(id)).await? {
            return Err(duplicate(name));
        }
    }
    let sub_modules = patch
        .sub_modules
        .as_deref()
        .map(normalize_sub_modules)
        .transpose()?;

    let module = ModuleRepo::update(&state.pool, id, name, sub_modules.as_deref())
        .await?
        .ok_or_else(|| AppError::not_found("Module", id))?;
    Ok(ApiResponse::ok("Module updated successfully", module))
}

/// DELETE /api/v1/modules/{id}
pub async fn delete_module(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ModuleRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Module", id))
    }
}
