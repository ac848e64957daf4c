//! Cohort mentee enrollment rows.

use coachhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `cohort_mentees` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortMentee {
    pub id: DbId,
    pub cohort_id: DbId,
    pub mentee_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
