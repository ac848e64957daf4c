//! Repository for the `roles` table.

use coachhub_core::types::DbId;
use sqlx::types::Json;
use sqlx::MySqlPool;

use crate::models::role::Role;

const COLUMNS: &str = "id, name, slug, permissions, created_at, updated_at";

pub struct RoleRepo;

impl RoleRepo {
    /// Insert a role. Slugs must already be normalised.
    pub async fn create(
        pool: &MySqlPool,
        name: &str,
        slug: &str,
        permissions: &[String],
    ) -> Result<Role, sqlx::Error> {
        let result = sqlx::query("INSERT INTO roles (name, slug, permissions) VALUES (?, ?, ?)")
            .bind(name)
            .bind(slug)
            .bind(Json(permissions))
            .execute(pool)
            .await?;
        Self::find_by_id(pool, result.last_insert_id() as DbId)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(pool: &MySqlPool, id: DbId) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE id = ?");
        sqlx::query_as::<_, Role>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &MySqlPool) -> Result<Vec<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles ORDER BY name");
        sqlx::query_as::<_, Role>(&query).fetch_all(pool).await
    }

    /// Roles whose id is in `ids`. Unknown ids are ignored.
    pub async fn find_by_ids(pool: &MySqlPool, ids: &[DbId]) -> Result<Vec<Role>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; ids.len()].join(", ");
        let query = format!("SELECT {COLUMNS} FROM roles WHERE id IN ({placeholders}) ORDER BY id");
        let mut q = sqlx::query_as::<_, Role>(&query);
        for id in ids {
            q = q.bind(*id);
        }
        q.fetch_all(pool).await
    }

    pub async fn slug_exists(
        pool: &MySqlPool,
        slug: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM roles WHERE slug = ? AND (? IS NULL OR id <> ?)",
        )
        .bind(slug)
        .bind(exclude_id)
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;
        Ok(count > 0)
    }

    pub async fn update(
        pool: &MySqlPool,
        id: DbId,
        name: Option<&str>,
        slug: Option<&str>,
        permissions: Option<&[String]>,
    ) -> Result<Option<Role>, sqlx::Error> {
        sqlx::query(
            "UPDATE roles SET
                name = COALESCE(?, name),
                slug = COALESCE(?, slug),
                permissions = COALESCE(?, permissions)
             WHERE id = ?",
        )
        .bind(name)
        .bind(slug)
        .bind(permissions.map(Json))
        .bind(id)
        .execute(pool)
        .await?;
        Self::find_by_id(pool, id).await
    }

    pub async fn delete(pool: &MySqlPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM roles WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
