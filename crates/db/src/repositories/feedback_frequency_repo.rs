//! Repository for the `feedback_frequencies` table.

use coachhub_core::cohort::PlannedFeedback;
use coachhub_core::types::DbId;
use sqlx::types::Json;
use sqlx::{MySqlConnection, MySqlPool};

use crate::models::cohort::FeedbackFrequency;

const COLUMNS: &str = "id, cohort_id, frequency, metadata, created_at, updated_at";

pub struct FeedbackFrequencyRepo;

impl FeedbackFrequencyRepo {
    pub async fn create(
        conn: &mut MySqlConnection,
        cohort_id: DbId,
        feedback: &PlannedFeedback,
    ) -> Result<FeedbackFrequency, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO feedback_frequencies (cohort_id, frequency, metadata) VALUES (?, ?, ?)",
        )
        .bind(cohort_id)
        .bind(feedback.frequency)
        .bind(Json(&feedback.metadata))
        .execute(&mut *conn)
        .await?;

        let query = format!("SELECT {COLUMNS} FROM feedback_frequencies WHERE id = ?");
        sqlx::query_as::<_, FeedbackFrequency>(&query)
            .bind(result.last_insert_id() as DbId)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn list_by_cohort(
        pool: &MySqlPool,
        cohort_id: DbId,
    ) -> Result<Vec<FeedbackFrequency>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM feedback_frequencies WHERE cohort_id = ? ORDER BY id");
        sqlx::query_as::<_, FeedbackFrequency>(&query)
            .bind(cohort_id)
            .fetch_all(pool)
            .await
    }

    /// Same as [`Self::list_by_cohort`], locking the rows.
    pub async fn list_by_cohort_for_update(
        conn: &mut MySqlConnection,
        cohort_id: DbId,
    ) -> Result<Vec<FeedbackFrequency>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM feedback_frequencies WHERE cohort_id = ? ORDER BY id FOR UPDATE"
        );
        sqlx::query_as::<_, FeedbackFrequency>(&query)
            .bind(cohort_id)
            .fetch_all(conn)
            .await
    }

    /// Replace a row's metadata; `frequency` follows its length.
    pub async fn update_metadata(
        conn: &mut MySqlConnection,
        id: DbId,
        metadata: &[String],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE feedback_frequencies SET frequency = ?, metadata = ? WHERE id = ?")
            .bind(metadata.len() as i32)
            .bind(Json(metadata))
            .bind(id)
            .execute(conn)
            .await?;
        Ok(())
    }

    pub async fn delete(conn: &mut MySqlConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM feedback_frequencies WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every feedback row of a cohort, returning how many went.
    pub async fn delete_by_cohort(
        conn: &mut MySqlConnection,
        cohort_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM feedback_frequencies WHERE cohort_id = ?")
            .bind(cohort_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }
}
