//! Repository for the `notifications` table.

use coachhub_core::types::{DbId, Timestamp};
use sqlx::MySqlPool;

use crate::models::notification::{CreateNotification, Notification};

const COLUMNS: &str =
    "id, user_id, title, body, channel, scheduled_at, sent_at, is_read, created_at, updated_at";

pub struct NotificationRepo;

impl NotificationRepo {
    pub async fn create(
        pool: &MySqlPool,
        input: &CreateNotification,
    ) -> Result<Notification, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO notifications (user_id, title, body, channel, scheduled_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(input.user_id)
        .bind(&input.title)
        .bind(&input.body)
        .bind(&input.channel)
        .bind(input.scheduled_at)
        .execute(pool)
        .await?;
        Self::find_by_id(pool, result.last_insert_id() as DbId)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(
        pool: &MySqlPool,
        id: DbId,
    ) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notifications WHERE id = ?");
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List notifications for a user, newest first.
    ///
    /// When `unread_only` is `true`, only notifications with `is_read = false`
    /// are returned.
    pub async fn list_for_user(
        pool: &MySqlPool,
        user_id: DbId,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let filter = if unread_only { "AND is_read = FALSE" } else { "" };
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE user_id = ? {filter} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ? OFFSET ?"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn mark_sent(pool: &MySqlPool, id: DbId, at: Timestamp) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE notifications SET sent_at = ? WHERE id = ?")
            .bind(at)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Mark a notification read, returning the updated row.
    pub async fn mark_read(
        pool: &MySqlPool,
        id: DbId,
    ) -> Result<Option<Notification>, sqlx::Error> {
        sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Self::find_by_id(pool, id).await
    }

    pub async fn delete(pool: &MySqlPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
