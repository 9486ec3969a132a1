//! API Config

use std::time::Duration;

use clap::Args;

/// Storefront API connection settings.
#[derive(Debug, Clone, Args)]
pub struct ApiConfig {
    /// Storefront API base URL
    #[arg(
        long,
        env = "GRYADKA_API_BASE_URL",
        default_value = "http://localhost:8000/api"
    )]
    pub api_base_url: String,

    /// Telegram Mini App init data, sent as the `Authorization` header
    #[arg(long, env = "TELEGRAM_INIT_DATA", hide_env_values = true)]
    pub init_data: Option<String>,

    /// Development user id, sent as the `X-Dev-User-ID` header
    #[arg(long, env = "GRYADKA_DEV_USER_ID")]
    pub dev_user_id: Option<u64>,

    /// HTTP request timeout in seconds
    #[arg(long, env = "GRYADKA_HTTP_TIMEOUT_SECONDS", default_value_t = 10u64)]
    pub http_timeout_seconds: u64,
}

impl ApiConfig {
    /// Connection settings for `base_url` without credentials.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            init_data: None,
            dev_user_id: None,
            http_timeout_seconds: 10,
        }
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }
}
