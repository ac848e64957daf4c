//! Repository for the `users` table.
//!
//! PII columns hold ciphertext; callers pass already-encrypted values, and
//! email lookups compare ciphertext.

use coachhub_core::types::DbId;
use sqlx::types::Json;
use sqlx::{MySqlConnection, MySqlPool};

use crate::models::user::{NewUserRecord, User, UserRecordPatch};

const COLUMNS: &str = "id, first_name, last_name, email, phone, designation, department, \
    user_type, role_ids, is_active, created_at, updated_at";

pub struct UserRepo;

impl UserRepo {
    pub async fn create(conn: &mut MySqlConnection, record: &NewUserRecord) -> Result<User, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO users
                (first_name, last_name, email, phone, designation, department, user_type, role_ids)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(&record.email)
        .bind(&record.phone)
        .bind(&record.designation)
        .bind(&record.department)
        .bind(&record.user_type)
        .bind(Json(&record.role_ids))
        .execute(&mut *conn)
        .await?;

        let query = format!("SELECT {COLUMNS} FROM users WHERE id = ?");
        sqlx::query_as::<_, User>(&query)
            .bind(result.last_insert_id() as DbId)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn find_by_id(pool: &MySqlPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = ?");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(
        conn: &mut MySqlConnection,
        encrypted_email: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = ?");
        sqlx::query_as::<_, User>(&query)
            .bind(encrypted_email)
            .fetch_optional(conn)
            .await
    }

    pub async fn list(pool: &MySqlPool, limit: i64, offset: i64) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id LIMIT ? OFFSET ?");
        sqlx::query_as::<_, User>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn email_exists(
        pool: &MySqlPool,
        encrypted_email: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE email = ? AND (? IS NULL OR id <> ?)",
        )
        .bind(encrypted_email)
        .bind(exclude_id)
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;
        Ok(count > 0)
    }

    /// Patch a user; only `Some` fields change.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &MySqlPool,
        id: DbId,
        patch: &UserRecordPatch,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query(
            "UPDATE users SET
                first_name = COALESCE(?, first_name),
                last_name = COALESCE(?, last_name),
                email = COALESCE(?, email),
                phone = COALESCE(?, phone),
                designation = COALESCE(?, designation),
                department = COALESCE(?, department),
                role_ids = COALESCE(?, role_ids),
                is_active = COALESCE(?, is_active)
             WHERE id = ?",
        )
        .bind(&patch.first_name)
        .bind(&patch.last_name)
        .bind(&patch.email)
        .bind(&patch.phone)
        .bind(&patch.designation)
        .bind(&patch.department)
        .bind(patch.role_ids.as_ref().map(Json))
        .bind(patch.is_active)
        .bind(id)
        .execute(pool)
        .await?;
        Self::find_by_id(pool, id).await
    }

    pub async fn delete(pool: &MySqlPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
