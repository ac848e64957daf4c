//! Cohort, interaction and feedback-frequency rows.

use coachhub_core::cohort::{CohortState, MentoringType};
use coachhub_core::error::CoreError;
use coachhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `cohorts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cohort {
    pub id: DbId,
    pub corporate_id: Option<DbId>,
    pub name: String,
    pub description: Option<String>,
    pub mentoring_type: String,
    pub group_size: Option<i32>,
    pub cohort_type: Json<Vec<String>>,
    pub coach_search_type: Json<Vec<String>>,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub duration_in_days: i64,
    pub min_price: f64,
    pub max_price: f64,
    pub allowed_mentees: i32,
    pub no_of_interactions: i32,
    pub enable_duration: bool,
    pub session_duration: Json<Vec<String>>,
    pub is_ff_mandatory: bool,
    pub is_unlimited: bool,
    pub chemistry_session_status: bool,
    pub no_of_chemistry_sessions: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Cohort {
    /// The fields an update patch is validated against.
    pub fn to_state(&self) -> Result<CohortState, CoreError> {
        Ok(CohortState {
            corporate_id: self.corporate_id,
            mentoring_type: MentoringType::parse(&self.mentoring_type)?,
            group_size: self.group_size,
            coach_search_type: self.coach_search_type.0.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            allowed_mentees: self.allowed_mentees,
            min_price: self.min_price,
            max_price: self.max_price,
            enable_duration: self.enable_duration,
            session_duration: self.session_duration.0.clone(),
            no_of_interactions: self.no_of_interactions,
            is_ff_mandatory: self.is_ff_mandatory,
            is_unlimited: self.is_unlimited,
            chemistry_session_status: self.chemistry_session_status,
            no_of_chemistry_sessions: self.no_of_chemistry_sessions,
        })
    }
}

/// A row from the `interactions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub id: DbId,
    pub cohort_id: DbId,
    pub title: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub status: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `feedback_frequencies` table.
///
/// `metadata` lists the 1-based interaction numbers after which feedback is
/// collected; `frequency` is its length.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackFrequency {
    pub id: DbId,
    pub cohort_id: DbId,
    pub frequency: i32,
    pub metadata: Json<Vec<String>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A cohort together with its generated schedule.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortDetail {
    #[serde(flatten)]
    pub cohort: Cohort,
    pub interactions: Vec<Interaction>,
    pub feedback_frequencies: Vec<FeedbackFrequency>,
}
