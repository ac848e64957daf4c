//! Repository for the `cohort_mentees` table.

use coachhub_core::types::DbId;
use sqlx::{MySqlConnection, MySqlPool};

use crate::models::enrollment::CohortMentee;

const COLUMNS: &str = "id, cohort_id, mentee_id, created_at, updated_at";

pub struct EnrollmentRepo;

impl EnrollmentRepo {
    /// Enroll mentees into a cohort, skipping pairs that already exist.
    ///
    /// Returns the number of new enrollments.
    pub async fn enroll_many(
        conn: &mut MySqlConnection,
        cohort_id: DbId,
        mentee_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        let mut inserted = 0;
        for mentee_id in mentee_ids {
            inserted += sqlx::query(
                "INSERT IGNORE INTO cohort_mentees (cohort_id, mentee_id) VALUES (?, ?)",
            )
            .bind(cohort_id)
            .bind(mentee_id)
            .execute(&mut *conn)
            .await?
            .rows_affected();
        }
        Ok(inserted)
    }

    pub async fn list_by_cohort(
        pool: &MySqlPool,
        cohort_id: DbId,
    ) -> Result<Vec<CohortMentee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cohort_mentees WHERE cohort_id = ? ORDER BY id");
        sqlx::query_as::<_, CohortMentee>(&query)
            .bind(cohort_id)
            .fetch_all(pool)
            .await
    }

    pub async fn delete_by_cohort(
        conn: &mut MySqlConnection,
        cohort_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cohort_mentees WHERE cohort_id = ?")
            .bind(cohort_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }
}
