//! Notification creation and dispatch.

use chrono::Utc;
use coachhub_core::notification::{dispatch_mode, validate_channel, Dispatch};
use coachhub_core::validation::validate_dto;
use coachhub_db::models::notification::{CreateNotification, Notification};
use coachhub_db::repositories::NotificationRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// Store a notification and dispatch it unless it is scheduled.
///
/// A failed delivery is logged and leaves `sent_at` unset; the stored
/// notification is still returned.
pub async fn create(state: &AppState, input: &CreateNotification) -> AppResult<Notification> {
    validate_dto(input)?;
    validate_channel(&input.channel)?;

    let mut notification = NotificationRepo::create(&state.pool, input).await?;

    match dispatch_mode(notification.scheduled_at) {
        Dispatch::Deferred(at) => {
            tracing::info!(notification_id = notification.id, scheduled_at = %at, "Notification scheduled");
        }
        Dispatch::Immediate => match state.notifier.deliver(&notification).await {
            Ok(delivery) => {
                let now = Utc::now();
                NotificationRepo::mark_sent(&state.pool, notification.id, now).await?;
                notification.sent_at = Some(now);
                tracing::debug!(notification_id = notification.id, ?delivery, "Notification sent");
            }
            Err(e) => {
                tracing::warn!(notification_id = notification.id, error = %e, "Notification delivery failed");
            }
        },
    }

    Ok(notification)
}
