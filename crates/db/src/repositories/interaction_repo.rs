//! Repository for the `interactions` table.

use coachhub_core::cohort::PlannedInteraction;
use coachhub_core::types::DbId;
use sqlx::{MySqlConnection, MySqlPool};

use crate::models::cohort::Interaction;

const COLUMNS: &str = "id, cohort_id, title, start_date, end_date, status, created_at, updated_at";

pub struct InteractionRepo;

impl InteractionRepo {
    /// Insert every planned interaction for a cohort, returning the row count.
    pub async fn create_many(
        conn: &mut MySqlConnection,
        cohort_id: DbId,
        interactions: &[PlannedInteraction],
    ) -> Result<u64, sqlx::Error> {
        let mut inserted = 0;
        for interaction in interactions {
            inserted += sqlx::query(
                "INSERT INTO interactions (cohort_id, title, start_date, end_date, status)
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(cohort_id)
            .bind(&interaction.title)
            .bind(interaction.start_date)
            .bind(interaction.end_date)
            .bind(interaction.status)
            .execute(&mut *conn)
            .await?
            .rows_affected();
        }
        Ok(inserted)
    }

    /// Interactions of a cohort in insertion order.
    pub async fn list_by_cohort(
        pool: &MySqlPool,
        cohort_id: DbId,
    ) -> Result<Vec<Interaction>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM interactions WHERE cohort_id = ? ORDER BY id");
        sqlx::query_as::<_, Interaction>(&query)
            .bind(cohort_id)
            .fetch_all(pool)
            .await
    }

    pub async fn count_by_cohort(
        conn: &mut MySqlConnection,
        cohort_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM interactions WHERE cohort_id = ?")
            .bind(cohort_id)
            .fetch_one(conn)
            .await
    }
}
