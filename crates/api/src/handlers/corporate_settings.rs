//! Handlers for the `/corporate-settings` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use coachhub_core::types::DbId;
use coachhub_db::models::corporate_settings::{
    CorporateSettings, CorporateSettingsDetail, CreateCorporateSettings, UpdateCorporateSettings,
};
use coachhub_db::repositories::CorporateSettingsRepo;

use crate::error::AppResult;
use crate::response::ApiResponse;
use crate::services::corporate_settings as service;
use crate::state::AppState;

/// POST /api/v1/corporate-settings
pub async fn create_settings(
    State(state): State<AppState>,
    Json(input): Json<CreateCorporateSettings>,
) -> AppResult<ApiResponse<CorporateSettingsDetail>> {
    let detail = service::create(&state.pool, &input).await?;
    Ok(ApiResponse::created("Corporate settings created successfully", detail))
}

/// GET /api/v1/corporate-settings
pub async fn list_settings(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<CorporateSettings>>> {
    let settings = CorporateSettingsRepo::list(&state.pool).await?;
    Ok(ApiResponse::ok("Corporate settings fetched successfully", settings))
}

/// GET /api/v1/corporate-settings/{id}
pub async fn get_settings(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<CorporateSettingsDetail>> {
    let settings = service::find(&state.pool, id).await?;
    let detail = service::with_prices(&state.pool, settings).await?;
    Ok(ApiResponse::ok("Corporate settings fetched successfully", detail))
}

/// PATCH /api/v1/corporate-settings/{id}
pub async fn update_settings(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(patch): Json<UpdateCorporateSettings>,
) -> AppResult<ApiResponse<CorporateSettingsDetail>> {
    let detail = service::update(&state.pool, id, &patch).await?;
    Ok(ApiResponse::ok("Corporate settings updated successfully", detail))
}

/// DELETE /api/v1/corporate-settings/{id}
pub async fn delete_settings(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    service::remove(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
