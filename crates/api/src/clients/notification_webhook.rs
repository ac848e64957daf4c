//! Outbound delivery of dispatched notifications.
//!
//! With `NOTIFICATION_WEBHOOK_URL` set, each notification is POSTed there as
//! JSON. Without it, delivery is a log line. There is no retry.

use std::time::Duration;

use coachhub_db::models::notification::Notification;

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),
}

/// How a notification left the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Posted,
    Logged,
}

pub struct NotificationWebhook {
    client: reqwest::Client,
    url: Option<String>,
}

impl NotificationWebhook {
    pub fn new(url: Option<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, url })
    }

    pub async fn deliver(&self, notification: &Notification) -> Result<Delivery, WebhookError> {
        let Some(ref url) = self.url else {
            tracing::info!(
                notification_id = notification.id,
                user_id = notification.user_id,
                channel = %notification.channel,
                title = %notification.title,
                "Notification dispatched (no webhook configured)"
            );
            return Ok(Delivery::Logged);
        };

        let payload = serde_json::json!({
            "id": notification.id,
            "userId": notification.user_id,
            "channel": notification.channel,
            "title": notification.title,
            "body": notification.body,
            "createdAt": notification.created_at,
        });

        let response = self.client.post(url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WebhookError::HttpStatus(status.as_u16()));
        }
        tracing::debug!(notification_id = notification.id, url = %url, "Notification delivered");
        Ok(Delivery::Posted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification() -> Notification {
        let now = chrono::Utc::now();
        Notification {
            id: 1,
            user_id: 2,
            title: "Welcome".into(),
            body: "Your cohort starts Monday".into(),
            channel: "email".into(),
            scheduled_at: None,
            sent_at: None,
            is_read: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn without_url_delivery_is_logged() {
        let webhook = NotificationWebhook::new(None).unwrap();
        assert_eq!(webhook.deliver(&notification()).await.unwrap(), Delivery::Logged);
    }

    #[test]
    fn webhook_error_display_http_status() {
        assert_eq!(WebhookError::HttpStatus(503).to_string(), "Webhook returned HTTP 503");
    }
}
