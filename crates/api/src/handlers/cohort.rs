//! Handlers for the `/cohort` resource.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use coachhub_core::cohort::{CreateCohort, UpdateCohort};
use coachhub_core::types::DbId;
use coachhub_db::models::cohort::{Cohort, CohortDetail, FeedbackFrequency, Interaction};
use coachhub_db::models::enrollment::CohortMentee;
use coachhub_db::repositories::{CohortRepo, EnrollmentRepo, FeedbackFrequencyRepo, InteractionRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::services;
use crate::services::mentee_upload::UploadSummary;
use crate::state::AppState;

/// Query parameters for `GET /cohort`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortListQuery {
    pub corporate_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Cohort CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/cohort
pub async fn create_cohort(
    State(state): State<AppState>,
    Json(input): Json<CreateCohort>,
) -> AppResult<ApiResponse<CohortDetail>> {
    let detail = services::cohort::create(&state.pool, &input).await?;
    Ok(ApiResponse::created("Cohort created successfully", detail))
}

/// GET /api/v1/cohort
///
/// Optionally filtered by `?corporateId=`.
pub async fn list_cohorts(
    State(state): State<AppState>,
    Query(params): Query<CohortListQuery>,
) -> AppResult<ApiResponse<Vec<Cohort>>> {
    let cohorts = CohortRepo::list(&state.pool, params.corporate_id).await?;
    Ok(ApiResponse::ok("Cohorts fetched successfully", cohorts))
}

/// GET /api/v1/cohort/{id}
pub async fn get_cohort(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<CohortDetail>> {
    let detail = services::cohort::detail(&state.pool, id).await?;
    Ok(ApiResponse::ok("Cohort fetched successfully", detail))
}

/// PATCH /api/v1/cohort/{id}
///
/// Acknowledges the update with `data: null`; fetch the cohort to see it.
pub async fn update_cohort(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(patch): Json<UpdateCohort>,
) -> AppResult<ApiResponse<()>> {
    services::cohort::update(&state.pool, id, &patch).await?;
    Ok(ApiResponse::ok("Cohort updated successfully", ()))
}

/// DELETE /api/v1/cohort/{id}
///
/// Refused with 400 while the cohort still has interactions.
pub async fn delete_cohort(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    services::cohort::remove(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Dependent rows
// ---------------------------------------------------------------------------

/// GET /api/v1/cohort/{id}/interactions
pub async fn list_interactions(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Vec<Interaction>>> {
    services::cohort::find(&state.pool, id).await?;
    let interactions = InteractionRepo::list_by_cohort(&state.pool, id).await?;
    Ok(ApiResponse::ok("Interactions fetched successfully", interactions))
}

/// GET /api/v1/cohort/{id}/feedback-frequencies
pub async fn list_feedback_frequencies(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Vec<FeedbackFrequency>>> {
    services::cohort::find(&state.pool, id).await?;
    let rows = FeedbackFrequencyRepo::list_by_cohort(&state.pool, id).await?;
    Ok(ApiResponse::ok("Feedback frequencies fetched successfully", rows))
}

/// GET /api/v1/cohort/{id}/mentees
pub async fn list_mentees(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Vec<CohortMentee>>> {
    services::cohort::find(&state.pool, id).await?;
    let mentees = EnrollmentRepo::list_by_cohort(&state.pool, id).await?;
    Ok(ApiResponse::ok("Cohort mentees fetched successfully", mentees))
}

// ---------------------------------------------------------------------------
// Mentee upload
// ---------------------------------------------------------------------------

/// POST /api/v1/cohort/upload/{cohort_id}
///
/// Multipart upload of an `.xlsx` roster. The first part carrying a file
/// name is used; other parts are ignored.
pub async fn upload_mentees(
    State(state): State<AppState>,
    Path(cohort_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<ApiResponse<UploadSummary>> {
    let mut workbook = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.file_name().is_none() {
            continue;
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        workbook = Some(data);
        break;
    }

    let workbook =
        workbook.ok_or_else(|| AppError::BadRequest("No roster file was uploaded".to_string()))?;

    let summary = services::mentee_upload::upload(&state, cohort_id, &workbook)
        .await
        .inspect_err(|e| tracing::error!(cohort_id, error = %e, "Mentee upload failed"))?;

    Ok(ApiResponse::ok("Mentees uploaded successfully", summary))
}
