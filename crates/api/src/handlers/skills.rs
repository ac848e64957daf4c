//! Handlers for the `/skills` catalogue.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use coachhub_core::error::CoreError;
use coachhub_core::types::DbId;
use coachhub_core::validation::{ensure_non_empty_patch, validate_dto};
use coachhub_db::models::skill::{CreateSkill, Skill, UpdateSkill};
use coachhub_db::repositories::SkillRepo;

use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::state::AppState;

fn duplicate(name: &str) -> AppError {
    CoreError::Conflict(format!("Skill '{name}' already exists")).into()
}

/// POST /api/v1/skills
pub async fn create_skill(
    State(state): State<AppState>,
    Json(input): Json<CreateSkill>,
) -> AppResult<ApiResponse<Skill>> {
    validate_dto(&input)?;
    let name = input.name.trim();
    if SkillRepo::name_exists(&state.pool, name, None).await? {
        return Err(duplicate(name));
    }
    let skill = SkillRepo::create(&state.pool, &input).await?;
    Ok(ApiResponse::created("Skill created successfully", skill))
}

/// GET /api/v1/skills
pub async fn list_skills(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<Skill>>> {
    let skills = SkillRepo::list(&state.pool).await?;
    Ok(ApiResponse::ok("Skills fetched successfully", skills))
}

/// GET /api/v1/skills/{id}
pub async fn get_skill(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Skill>> {
    let skill = SkillRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Skill", id))?;
    Ok(ApiResponse::ok("Skill fetched successfully", skill))
}

/// PATCH /api/v1/skills/{id}
pub async fn update_skill(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(patch): Json<UpdateSkill>,
) -> AppResult<ApiResponse<Skill>> {
    ensure_non_empty_patch(patch.is_empty())?;
    validate_dto(&patch)?;
    if let Some(name) = patch.name.as_deref().map(str::trim) {
        if SkillRepo::name_exists(&state.pool, name, Some(id)).await? {
            return Err(duplicate(name));
        }
    }
    let skill = SkillRepo::update(&state.pool, id, &patch)
        .await?
        .ok_or_else(|| AppError::not_found("Skill", id))?;
    Ok(ApiResponse::ok("Skill updated successfully", skill))
}

/// DELETE /api/v1/skills/{id}
pub async fn delete_skill(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if SkillRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Skill", id))
    }
}
