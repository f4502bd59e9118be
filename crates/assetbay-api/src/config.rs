//! Client configuration.

use std::time::Duration;

/// Environment variable overriding the API base URL.
pub const ENV_API_URL: &str = "ASSETBAY_API_URL";

/// Environment variable supplying the bearer token.
pub const ENV_TOKEN: &str = "ASSETBAY_TOKEN";

/// Configuration for the storefront client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the marketplace API, e.g. `https://api.assetbay.example/api`.
    pub base_url: String,
    /// Bearer token for authenticated endpoints.
    pub token: Option<String>,
    /// Maximum retry attempts for transient GET failures.
    pub max_retries: u8,
    /// Base delay for exponential backoff between retries.
    pub retry_base_delay: Duration,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000/api".to_string(),
            token: None,
            max_retries: 3,
            retry_base_delay: Duration::from_millis(500),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ApiConfig {
    /// Defaults overridden by `ASSETBAY_API_URL` / `ASSETBAY_TOKEN` when set.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }
        if let Ok(token) = std::env::var(ENV_TOKEN) {
            if !token.trim().is_empty() {
                config.token = Some(token);
            }
        }
        config
    }

    /// Replace the token, taking the whole config by value.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }
}
