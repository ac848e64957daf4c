//! Excel roster upload for a cohort.
//!
//! Valid rows are registered through the user service in one bulk call; the
//! returned ids, new and pre-existing, are enrolled in the cohort.

use coachhub_core::error::CoreError;
use coachhub_core::mentee_import::{parse_workbook, validate_rows, RowError, RowValidation};
use coachhub_core::types::DbId;
use coachhub_db::repositories::{CohortRepo, EnrollmentRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSummary {
    pub cohort_id: DbId,
    pub total_rows: usize,
    pub valid_rows: usize,
    pub invalid_rows: Vec<RowError>,
    pub registered: usize,
    pub existing: usize,
    pub enrolled: u64,
    pub mentee_ids: Vec<DbId>,
}

pub async fn upload(state: &AppState, cohort_id: DbId, workbook: &[u8]) -> AppResult<UploadSummary> {
    CohortRepo::find_by_id(&state.pool, cohort_id)
        .await?
        .ok_or_else(|| AppError::not_found("Cohort", cohort_id))?;

    let rows = parse_workbook(workbook)?;
    if rows.is_empty() {
        return Err(CoreError::InvalidInput("Roster contains no mentee rows".to_string()).into());
    }

    let total_rows = rows.len();
    let RowValidation { valid, invalid } = validate_rows(rows);

    let mut summary = UploadSummary {
        cohort_id,
        total_rows,
        valid_rows: valid.len(),
        invalid_rows: invalid,
        registered: 0,
        existing: 0,
        enrolled: 0,
        mentee_ids: Vec::new(),
    };
    if valid.is_empty() {
        tracing::warn!(cohort_id, total_rows, "Roster has no valid rows");
        return Ok(summary);
    }

    let registered = state
        .user_service
        .register_mentees(&valid)
        .await
        .map_err(|e| {
            tracing::error!(cohort_id, error = %e, "User service rejected mentee registration");
            AppError::BadRequest(format!("Failed to register mentees: {e}"))
        })?;

    summary.registered = registered.registered.len();
    summary.existing = registered.existing.len();
    summary.mentee_ids = registered
        .registered
        .iter()
        .chain(&registered.existing)
        .map(|u| u.id)
        .collect();

    let mut tx = state.pool.begin().await?;
    summary.enrolled = EnrollmentRepo::enroll_many(&mut tx, cohort_id, &summary.mentee_ids).await?;
    tx.commit().await?;

    tracing::info!(
        cohort_id,
        total_rows,
        invalid = summary.invalid_rows.len(),
        registered = summary.registered,
        existing = summary.existing,
        enrolled = summary.enrolled,
        "Mentee roster imported"
    );
    Ok(summary)
}
