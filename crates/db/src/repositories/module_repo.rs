//! Repository for the `modules` table.

use coachhub_core::rbac::SubModule;
use coachhub_core::types::DbId;
use sqlx::types::Json;
use sqlx::MySqlPool;

use crate::models::module::Module;

const COLUMNS: &str = "id, name, sub_modules, created_at, updated_at";

pub struct ModuleRepo;

impl ModuleRepo {
    pub async fn create(
        pool: &MySqlPool,
        name: &str,
        sub_modules: &[SubModule],
    ) -> Result<Module, sqlx::Error> {
        let result = sqlx::query("INSERT INTO modules (name, sub_modules) VALUES (?, ?)")
            .bind(name)
            .bind(Json(sub_modules))
            .execute(pool)
            .await?;
        Self::find_by_id(pool, result.last_insert_id() as DbId)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(pool: &MySqlPool, id: DbId) -> Result<Option<Module>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM modules WHERE id = ?");
        sqlx::query_as::<_, Module>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &MySqlPool) -> Result<Vec<Module>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM modules ORDER BY name");
        sqlx::query_as::<_, Module>(&query).fetch_all(pool).await
    }

    pub async fn name_exists(
        pool: &MySqlPool,
        name: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM modules WHERE name = ? AND (? IS NULL OR id <> ?)",
        )
        .bind(name)
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
        sub_modules: Option<&[SubModule]>,
    ) -> Result<Option<Module>, sqlx::Error> {
        sqlx::query(
            "UPDATE modules SET
                name = COALESCE(?, name),
                sub_modules = COALESCE(?, sub_modules)
             WHERE id = ?",
        )
        .bind(name)
        .bind(sub_modules.map(Json))
        .bind(id)
        .execute(pool)
        .await?;
        Self::find_by_id(pool, id).await
    }

    pub async fn delete(pool: &MySqlPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM modules WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
