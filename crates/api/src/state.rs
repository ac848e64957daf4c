use std::sync::Arc;

use coachhub_core::crypto::PiiCipher;

use crate::clients::notification_webhook::NotificationWebhook;
use crate::clients::user_service::UserServiceClient;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: coachhub_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// PII cipher keyed from `CRYPTO_SECRET`.
    pub cipher: Arc<PiiCipher>,
    /// Client for bulk mentee registration.
    pub user_service: Arc<UserServiceClient>,
    /// Outbound notification delivery.
    pub notifier: Arc<NotificationWebhook>,
}

impl AppState {
    /// Build the state and its outbound HTTP clients from config.
    pub fn new(pool: coachhub_db::DbPool, config: ServerConfig) -> Result<Self, reqwest::Error> {
        let cipher = PiiCipher::new(&config.crypto_secret);
        let user_service = UserServiceClient::new(&config.user_service_url)?;
        let notifier = NotificationWebhook::new(config.notification_webhook_url.clone())?;
        Ok(Self {
            pool,
            config: Arc::new(config),
            cipher: Arc::new(cipher),
            user_service: Arc::new(user_service),
            notifier: Arc::new(notifier),
        })
    }
}
