/// Server configuration loaded from environment variables.
///
/// Everything except the secrets has a default suitable for local
/// development.
#[derive(Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Base URL of the user service used for bulk mentee registration.
    pub user_service_url: String,
    /// Key material for the PII cipher.
    pub crypto_secret: String,
    /// Where dispatched notifications are POSTed. Unset means log only.
    pub notification_webhook_url: Option<String>,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("cors_origins", &self.cors_origins)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_service_url", &self.user_service_url)
            .field("notification_webhook_url", &self.notification_webhook_url)
            .finish_non_exhaustive()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                          |
    /// |----------------------------|----------------------------------|
    /// | `HOST`                     | `0.0.0.0`                        |
    /// | `PORT`                     | `3000`                           |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`          |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                             |
    /// | `USER_SERVICE_URL`         | `http://localhost:3000/api/v1`   |
    /// | `CRYPTO_SECRET`            | *(required)*                     |
    /// | `NOTIFICATION_WEBHOOK_URL` | *(unset)*                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let user_service_url = std::env::var("USER_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:3000/api/v1".into())
            .trim_end_matches('/')
            .to_string();

        let crypto_secret = std::env::var("CRYPTO_SECRET").expect("CRYPTO_SECRET must be set");

        let notification_webhook_url = std::env::var("NOTIFICATION_WEBHOOK_URL")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            user_service_url,
            crypto_secret,
            notification_webhook_url,
        }
    }
}
