//! Repository for the `corporate_cohort_settings` table.

use coachhub_core::types::DbId;
use sqlx::{MySqlConnection, MySqlPool};

use crate::models::corporate_settings::{
    CorporateSettings, CreateCorporateSettings, UpdateCorporateSettings,
};

const COLUMNS: &str = "id, corporate_id, max_cohorts, max_mentees_per_cohort, \
    min_price, max_price, is_unlimited, created_at, updated_at";

pub struct CorporateSettingsRepo;

impl CorporateSettingsRepo {
    pub async fn create(
        conn: &mut MySqlConnection,
        input: &CreateCorporateSettings,
    ) -> Result<CorporateSettings, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO corporate_cohort_settings
                (corporate_id, max_cohorts, max_mentees_per_cohort, min_price, max_price, is_unlimited)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(input.corporate_id)
        .bind(input.max_cohorts)
        .bind(input.max_mentees_per_cohort)
        .bind(input.min_price)
        .bind(input.max_price)
        .bind(input.is_unlimited)
        .execute(&mut *conn)
        .await?;

        let query = format!("SELECT {COLUMNS} FROM corporate_cohort_settings WHERE id = ?");
        sqlx::query_as::<_, CorporateSettings>(&query)
            .bind(result.last_insert_id() as DbId)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn find_by_id(
        pool: &MySqlPool,
        id: DbId,
    ) -> Result<Option<CorporateSettings>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM corporate_cohort_settings WHERE id = ?");
        sqlx::query_as::<_, CorporateSettings>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_for_update(
        conn: &mut MySqlConnection,
        id: DbId,
    ) -> Result<Option<CorporateSettings>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM corporate_cohort_settings WHERE id = ? FOR UPDATE");
        sqlx::query_as::<_, CorporateSettings>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn list(pool: &MySqlPool) -> Result<Vec<CorporateSettings>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM corporate_cohort_settings ORDER BY id");
        sqlx::query_as::<_, CorporateSettings>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn corporate_exists(
        conn: &mut MySqlConnection,
        corporate_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM corporate_cohort_settings WHERE corporate_id = ?",
        )
        .bind(corporate_id)
        .fetch_one(conn)
        .await?;
        Ok(count > 0)
    }

    /// Patch the row; only `Some` fields change.
    pub async fn update(
        conn: &mut MySqlConnection,
        id: DbId,
        input: &UpdateCorporateSettings,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE corporate_cohort_settings SET
                max_cohorts = COALESCE(?, max_cohorts),
                max_mentees_per_cohort = COALESCE(?, max_mentees_per_cohort),
                min_price = COALESCE(?, min_price),
                max_price = COALESCE(?, max_price),
                is_unlimited = COALESCE(?, is_unlimited)
             WHERE id = ?",
        )
        .bind(input.max_cohorts)
        .bind(input.max_mentees_per_cohort)
        .bind(input.min_price)
        .bind(input.max_price)
        .bind(input.is_unlimited)
        .bind(id)
        .execute(conn)
        .await?;
        Ok(())
    }

    pub async fn delete(conn: &mut MySqlConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM corporate_cohort_settings WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
