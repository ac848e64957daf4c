//! Cohort create/update/delete workflows.
//!
//! Each write runs in a single transaction: any rule violation or failed
//! statement drops the transaction and nothing is persisted.

use chrono::Utc;
use coachhub_core::cohort::feedback::{ensure_last_interaction, remove_last_interaction};
use coachhub_core::cohort::rules::resolve_cohort_name;
use coachhub_core::cohort::{
    plan_cohort, plan_update, CreateCohort, FeedbackToggle, PlannedFeedback, UnlimitedPriceChange,
    UpdateCohort,
};
use coachhub_core::error::CoreError;
use coachhub_core::types::DbId;
use coachhub_core::validation::{ensure_non_empty_patch, validate_dto};
use coachhub_db::models::cohort::{Cohort, CohortDetail};
use coachhub_db::repositories::{
    CohortRepo, EnrollmentRepo, FeedbackFrequencyRepo, InteractionRepo, UnlimitedPriceRepo,
};
use coachhub_db::DbPool;
use sqlx::MySqlConnection;

use crate::error::{AppError, AppResult};

/// Create a cohort with its interactions and feedback checkpoints.
///
/// Name collisions are reported before any other business rule.
pub async fn create(pool: &DbPool, request: &CreateCohort) -> AppResult<CohortDetail> {
    validate_dto(request)?;

    let mut tx = pool.begin().await?;

    let name = resolve_cohort_name(
        request.name.as_deref(),
        request.corporate_name.as_deref(),
        request.allowed_mentees,
        Utc::now(),
    )?;
    if CohortRepo::name_exists(&mut tx, &name, None).await? {
        return Err(CoreError::Conflict(format!("Cohort with name '{name}' already exists")).into());
    }

    let plan = plan_cohort(request, name)?;

    let cohort = CohortRepo::create(&mut tx, &plan).await?;
    InteractionRepo::create_many(&mut tx, cohort.id, &plan.interactions).await?;
    let feedback = match plan.feedback {
        Some(ref feedback) => vec![FeedbackFrequencyRepo::create(&mut tx, cohort.id, feedback).await?],
        None => Vec::new(),
    };

    tx.commit().await?;

    tracing::info!(
        cohort_id = cohort.id,
        name = %cohort.name,
        interactions = plan.interactions.len(),
        "Cohort created"
    );

    let interactions = InteractionRepo::list_by_cohort(pool, cohort.id).await?;
    Ok(CohortDetail {
        cohort,
        interactions,
        feedback_frequencies: feedback,
    })
}

/// Apply a partial patch to a cohort and its dependent rows.
pub async fn update(pool: &DbPool, id: DbId, patch: &UpdateCohort) -> AppResult<()> {
    ensure_non_empty_patch(patch.is_empty())?;
    validate_dto(patch)?;

    let mut tx = pool.begin().await?;

    let current = CohortRepo::find_for_update(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::not_found("Cohort", id))?;

    if let Some(name) = patch.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        if CohortRepo::name_exists(&mut tx, name, Some(id)).await? {
            return Err(
                CoreError::Conflict(format!("Cohort with name '{name}' already exists")).into(),
            );
        }
    }

    let plan = plan_update(&current.to_state()?, patch)?;

    CohortRepo::update(&mut tx, id, &plan).await?;

    if let Some(toggle) = plan.feedback_toggle {
        apply_feedback_toggle(&mut tx, id, toggle).await?;
    }

    match plan.unlimited_prices {
        Some(UnlimitedPriceChange::Clear { corporate_id }) => {
            let removed = UnlimitedPriceRepo::delete_by_corporate(&mut tx, corporate_id).await?;
            tracing::debug!(corporate_id, removed, "Cleared unlimited prices");
        }
        Some(UnlimitedPriceChange::Replace {
            corporate_id,
            ref prices,
        }) => {
            UnlimitedPriceRepo::replace(&mut tx, corporate_id, prices).await?;
        }
        None => {}
    }

    tx.commit().await?;
    tracing::info!(cohort_id = id, "Cohort updated");
    Ok(())
}

/// Add or drop the last interaction from every feedback row of a cohort.
///
/// Turning the flag on for a cohort without feedback rows creates one; a
/// row left empty by turning it off is deleted.
async fn apply_feedback_toggle(
    conn: &mut MySqlConnection,
    cohort_id: DbId,
    toggle: FeedbackToggle,
) -> Result<(), sqlx::Error> {
    let rows = FeedbackFrequencyRepo::list_by_cohort_for_update(&mut *conn, cohort_id).await?;

    match toggle {
        FeedbackToggle::AddLast(total) => {
            if rows.is_empty() {
                let feedback = PlannedFeedback {
                    frequency: 1,
                    metadata: vec![total.to_string()],
                };
                FeedbackFrequencyRepo::create(&mut *conn, cohort_id, &feedback).await?;
            }
            for row in rows {
                let mut metadata = row.metadata.0;
                if ensure_last_interaction(&mut metadata, total) {
                    FeedbackFrequencyRepo::update_metadata(&mut *conn, row.id, &metadata).await?;
                }
            }
        }
        FeedbackToggle::RemoveLast(total) => {
            for row in rows {
                let mut metadata = row.metadata.0;
                if !remove_last_interaction(&mut metadata, total) {
                    continue;
                }
                if metadata.is_empty() {
                    FeedbackFrequencyRepo::delete(&mut *conn, row.id).await?;
                } else {
                    FeedbackFrequencyRepo::update_metadata(&mut *conn, row.id, &metadata).await?;
                }
            }
        }
    }
    Ok(())
}

/// Delete a cohort that has no interactions.
pub async fn remove(pool: &DbPool, id: DbId) -> AppResult<()> {
    let mut tx = pool.begin().await?;

    CohortRepo::find_for_update(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::not_found("Cohort", id))?;

    let interactions = InteractionRepo::count_by_cohort(&mut tx, id).await?;
    if interactions > 0 {
        return Err(CoreError::InvalidInput(format!(
            "Cohort {id} has {interactions} interaction(s) and cannot be deleted"
        ))
        .into());
    }

    let feedback_rows = FeedbackFrequencyRepo::delete_by_cohort(&mut tx, id).await?;
    EnrollmentRepo::delete_by_cohort(&mut tx, id).await?;
    CohortRepo::delete(&mut tx, id).await?;

    tx.commit().await?;
    tracing::info!(cohort_id = id, feedback_rows, "Cohort deleted");
    Ok(())
}

pub async fn find(pool: &DbPool, id: DbId) -> AppResult<Cohort> {
    CohortRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Cohort", id))
}

/// A cohort with its interactions and feedback rows.
pub async fn detail(pool: &DbPool, id: DbId) -> AppResult<CohortDetail> {
    let cohort = find(pool, id).await?;
    let interactions = InteractionRepo::list_by_cohort(pool, id).await?;
    let feedback_frequencies = FeedbackFrequencyRepo::list_by_cohort(pool, id).await?;
    Ok(CohortDetail {
        cohort,
        interactions,
        feedback_frequencies,
    })
}
