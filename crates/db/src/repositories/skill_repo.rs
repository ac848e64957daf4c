//! Repository for the `skills` table.

use coachhub_core::types::DbId;
use sqlx::MySqlPool;

use crate::models::skill::{CreateSkill, Skill, UpdateSkill};

const COLUMNS: &str = "id, name, description, created_at, updated_at";

pub struct SkillRepo;

impl SkillRepo {
    pub async fn create(pool: &MySqlPool, input: &CreateSkill) -> Result<Skill, sqlx::Error> {
        let result = sqlx::query("INSERT INTO skills (name, description) VALUES (?, ?)")
            .bind(input.name.trim())
            .bind(&input.description)
            .execute(pool)
            .await?;
        let id = result.last_insert_id() as DbId;
        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(pool: &MySqlPool, id: DbId) -> Result<Option<Skill>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM skills WHERE id = ?");
        sqlx::query_as::<_, Skill>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &MySqlPool) -> Result<Vec<Skill>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM skills ORDER BY name");
        sqlx::query_as::<_, Skill>(&query).fetch_all(pool).await
    }

    /// Whether `name` is used by a skill other than `exclude_id`.
    pub async fn name_exists(
        pool: &MySqlPool,
        name: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM skills WHERE name = ? AND (? IS NULL OR id <> ?)",
        )
        .bind(name.trim())
        .bind(exclude_id)
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;
        Ok(count > 0)
    }

    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &MySqlPool,
        id: DbId,
        input: &UpdateSkill,
    ) -> Result<Option<Skill>, sqlx::Error> {
        sqlx::query(
            "UPDATE skills SET
                name = COALESCE(?, name),
                description = COALESCE(?, description)
             WHERE id = ?",
        )
        .bind(input.name.as_deref().map(str::trim))
        .bind(&input.description)
        .bind(id)
        .execute(pool)
        .await?;
        Self::find_by_id(pool, id).await
    }

    pub async fn delete(pool: &MySqlPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM skills WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
