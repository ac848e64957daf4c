//! Repository for the `permissions` table.

use coachhub_core::types::DbId;
use sqlx::MySqlPool;

use crate::models::permission::{CreatePermission, Permission, UpdatePermission};

const COLUMNS: &str = "id, name, slug, description, created_at, updated_at";

pub struct PermissionRepo;

impl PermissionRepo {
    /// Insert a permission. `slug` must already be normalised.
    pub async fn create(
        pool: &MySqlPool,
        input: &CreatePermission,
        slug: &str,
    ) -> Result<Permission, sqlx::Error> {
        let result = sqlx::query("INSERT INTO permissions (name, slug, description) VALUES (?, ?, ?)")
            .bind(input.name.trim())
            .bind(slug)
            .bind(&input.description)
            .execute(pool)
            .await?;
        Self::find_by_id(pool, result.last_insert_id() as DbId)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(pool: &MySqlPool, id: DbId) -> Result<Option<Permission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM permissions WHERE id = ?");
        sqlx::query_as::<_, Permission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &MySqlPool) -> Result<Vec<Permission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM permissions ORDER BY slug");
        sqlx::query_as::<_, Permission>(&query).fetch_all(pool).await
    }

    /// Every known slug, for validating role permission lists.
    pub async fn list_slugs(pool: &MySqlPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT slug FROM permissions")
            .fetch_all(pool)
            .await
    }

    pub async fn slug_exists(
        pool: &MySqlPool,
        slug: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM permissions WHERE slug = ? AND (? IS NULL OR id <> ?)",
        )
        .bind(slug)
        .bind(exclude_id)
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;
        Ok(count > 0)
    }

    /// Patch a permission. `slug`, when given, must already be normalised.
    pub async fn update(
        pool: &MySqlPool,
        id: DbId,
        input: &UpdatePermission,
        slug: Option<&str>,
    ) -> Result<Option<Permission>, sqlx::Error> {
        sqlx::query(
            "UPDATE permissions SET
                name = COALESCE(?, name),
                slug = COALESCE(?, slug),
                description = COALESCE(?, description)
             WHERE id = ?",
        )
        .bind(input.name.as_deref().map(str::trim))
        .bind(slug)
        .bind(&input.description)
        .bind(id)
        .execute(pool)
        .await?;
        Self::find_by_id(pool, id).await
    }

    pub async fn delete(pool: &MySqlPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM permissions WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
