//! Repository for the `cohorts` table.

use coachhub_core::cohort::{CohortPlan, CohortUpdatePlan};
use coachhub_core::types::DbId;
use sqlx::types::Json;
use sqlx::{MySqlConnection, MySqlPool};

use crate::models::cohort::Cohort;

/// Column list shared across queries.
const COLUMNS: &str = "id, corporate_id, name, description, mentoring_type, group_size, \
    cohort_type, coach_search_type, start_date, end_date, duration_in_days, \
    min_price, max_price, allowed_mentees, no_of_interactions, enable_duration, \
    session_duration, is_ff_mandatory, is_unlimited, chemistry_session_status, \
    no_of_chemistry_sessions, created_at, updated_at";

pub struct CohortRepo;

impl CohortRepo {
    /// Insert the cohort row of a plan, returning the created row.
    pub async fn create(conn: &mut MySqlConnection, plan: &CohortPlan) -> Result<Cohort, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO cohorts
                (corporate_id, name, description, mentoring_type, group_size,
                 cohort_type, coach_search_type, start_date, end_date, duration_in_days,
                 min_price, max_price, allowed_mentees, no_of_interactions, enable_duration,
                 session_duration, is_ff_mandatory, is_unlimited, chemistry_session_status,
                 no_of_chemistry_sessions)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(plan.corporate_id)
        .bind(&plan.name)
        .bind(&plan.description)
        .bind(plan.mentoring_type.as_str())
        .bind(plan.group_size)
        .bind(Json(&plan.cohort_type))
        .bind(Json(&plan.coach_search_type))
        .bind(plan.start_date)
        .bind(plan.end_date)
        .bind(plan.duration_in_days)
        .bind(plan.min_price)
        .bind(plan.max_price)
        .bind(plan.allowed_mentees)
        .bind(plan.no_of_interactions)
        .bind(plan.enable_duration)
        .bind(Json(&plan.session_duration))
        .bind(plan.is_ff_mandatory)
        .bind(plan.is_unlimited)
        .bind(plan.chemistry_session_status)
        .bind(plan.no_of_chemistry_sessions)
        .execute(&mut *conn)
        .await?;

        let query = format!("SELECT {COLUMNS} FROM cohorts WHERE id = ?");
        sqlx::query_as::<_, Cohort>(&query)
            .bind(result.last_insert_id() as DbId)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn find_by_id(pool: &MySqlPool, id: DbId) -> Result<Option<Cohort>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cohorts WHERE id = ?");
        sqlx::query_as::<_, Cohort>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load a cohort and lock its row for the rest of the transaction.
    pub async fn find_for_update(
        conn: &mut MySqlConnection,
        id: DbId,
    ) -> Result<Option<Cohort>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cohorts WHERE id = ? FOR UPDATE");
        sqlx::query_as::<_, Cohort>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// List cohorts, newest first, optionally for one corporate.
    pub async fn list(
        pool: &MySqlPool,
        corporate_id: Option<DbId>,
    ) -> Result<Vec<Cohort>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cohorts
             WHERE (? IS NULL OR corporate_id = ?)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Cohort>(&query)
            .bind(corporate_id)
            .bind(corporate_id)
            .fetch_all(pool)
            .await
    }

    /// Whether `name` is taken by a cohort other than `exclude_id`.
    pub async fn name_exists(
        conn: &mut MySqlConnection,
        name: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM cohorts WHERE name = ? AND (? IS NULL OR id <> ?)",
        )
        .bind(name)
        .bind(exclude_id)
        .bind(exclude_id)
        .fetch_one(conn)
        .await?;
        Ok(count > 0)
    }

    /// Apply the column changes of an update plan. Only `Some` fields change.
    ///
    /// Returns `false` if no row with the given `id` exists.
    pub async fn update(
        conn: &mut MySqlConnection,
        id: DbId,
        plan: &CohortUpdatePlan,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE cohorts SET
                name = COALESCE(?, name),
                description = COALESCE(?, description),
                group_size = COALESCE(?, group_size),
                cohort_type = COALESCE(?, cohort_type),
                coach_search_type = COALESCE(?, coach_search_type),
                start_date = COALESCE(?, start_date),
                end_date = COALESCE(?, end_date),
                duration_in_days = COALESCE(?, duration_in_days),
                allowed_mentees = COALESCE(?, allowed_mentees),
                min_price = COALESCE(?, min_price),
                max_price = COALESCE(?, max_price),
                enable_duration = COALESCE(?, enable_duration),
                session_duration = COALESCE(?, session_duration),
                is_ff_mandatory = COALESCE(?, is_ff_mandatory),
                is_unlimited = COALESCE(?, is_unlimited),
                chemistry_session_status = COALESCE(?, chemistry_session_status),
                no_of_chemistry_sessions = COALESCE(?, no_of_chemistry_sessions)
             WHERE id = ?",
        )
        .bind(&plan.name)
        .bind(&plan.description)
        .bind(plan.group_size)
        .bind(plan.cohort_type.as_ref().map(Json))
        .bind(plan.coach_search_type.as_ref().map(Json))
        .bind(plan.start_date)
        .bind(plan.end_date)
        .bind(plan.duration_in_days)
        .bind(plan.allowed_mentees)
        .bind(plan.min_price)
        .bind(plan.max_price)
        .bind(plan.enable_duration)
        .bind(plan.session_duration.as_ref().map(Json))
        .bind(plan.is_ff_mandatory)
        .bind(plan.is_unlimited)
        .bind(plan.chemistry_session_status)
        .bind(plan.no_of_chemistry_sessions)
        .bind(id)
        .execute(&mut *conn)
        .await?;
        // Without CLIENT_FOUND_ROWS an unchanged row reports 0 affected.
        Ok(result.rows_affected() > 0 || Self::exists(conn, id).await?)
    }

    async fn exists(conn: &mut MySqlConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cohorts WHERE id = ?")
            .bind(id)
            .fetch_one(conn)
            .await?;
        Ok(count > 0)
    }

    /// Delete a cohort row. Returns `true` if a row was removed.
    pub async fn delete(conn: &mut MySqlConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cohorts WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
