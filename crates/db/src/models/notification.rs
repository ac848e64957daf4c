//! Notification rows and DTOs.

use coachhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub body: String,
    pub channel: String,
    pub scheduled_at: Option<Timestamp>,
    pub sent_at: Option<Timestamp>,
    pub is_read: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

fn default_channel() -> String {
    coachhub_core::notification::CHANNEL_IN_APP.to_string()
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotification {
    #[validate(range(min = 1, message = "must be a positive id"))]
    pub user_id: DbId,
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub body: String,
    #[serde(default = "default_channel")]
    pub channel: String,
    pub scheduled_at: Option<Timestamp>,
}

/// Query string for `GET /notifications`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationQuery {
    pub user_id: DbId,
    #[serde(default)]
    pub unread_only: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
