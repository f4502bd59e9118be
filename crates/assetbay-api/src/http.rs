//! HTTP backend abstraction for the marketplace API.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. The production implementation
//! uses reqwest with automatic retry logic for transient GET failures.

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that exchange JSON with the marketplace API.
///
/// This is an implementation detail - external code should use the
/// `StorefrontPort` trait.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Fetch JSON from a URL.
    async fn get_json(&self, url: &Url) -> ApiResult<Value>;

    /// Send a JSON body and return the JSON response.
    async fn post_json(&self, url: &Url, body: &Value) -> ApiResult<Value>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
///
/// GETs are retried with exponential backoff on 5xx and network errors.
/// POSTs are never retried: they change server state (a download issuance
/// counts against the quota even when the response is lost).
pub struct ReqwestBackend {
    client: reqwest::Client,
    max_retries: u8,
    retry_base_delay_ms: u64,
    auth_token: Option<String>,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &ApiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("failed to create HTTP client");

        Self {
            client,
            max_retries: config.max_retries,
            #[allow(clippy::cast_possible_truncation)] // Delay milliseconds fit u64 in practice
            retry_base_delay_ms: config.retry_base_delay.as_millis() as u64,
            auth_token: config.token.clone(),
        }
    }

    /// Attach the bearer token when configured.
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    /// Perform a GET with automatic retry for transient errors.
    async fn get_with_retry(&self, url: &Url) -> ApiResult<reqwest::Response> {
        let mut last_error: Option<ApiError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = Duration::from_millis(
                    self.retry_base_delay_ms * 2u64.pow(u32::from(attempt) - 1),
                );
                debug!(url = %url, attempt, "retrying after transient failure");
                tokio::time::sleep(delay).await;
            }

            match self.authorize(self.client.get(url.as_str())).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    // 5xx errors are retryable (server-side issues)
                    if status.is_server_error() && attempt < self.max_retries {
                        last_error = Some(ApiError::RequestFailed {
                            status: status.as_u16(),
                            url: url.to_string(),
                            message: None,
                        });
                        continue;
                    }

                    // 4xx errors or final attempt - fail with the body message
                    return Err(error_from_response(url, response).await);
                }
                Err(e) => {
                    // Network errors are retryable
                    if attempt < self.max_retries {
                        last_error = Some(e.into());
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }

        Err(last_error.unwrap_or_else(|| ApiError::InvalidResponse {
            message: "unknown error during fetch".to_string(),
        }))
    }
}

/// Build a `RequestFailed` error carrying the server's error-body message.
async fn error_from_response(url: &Url, response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .ok()
        .and_then(|body| extract_error_message(&body));
    ApiError::RequestFailed {
        status,
        url: url.to_string(),
        message,
    }
}

/// Pull a human-readable message out of an error body.
///
/// The API returns `{"message": ...}` or `{"error": ...}`; plain-text bodies
/// are used as-is when short enough to be a message rather than an HTML page.
fn extract_error_message(body: &str) -> Option<String> {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(message) = json.get(key).and_then(Value::as_str) {
                if !message.is_empty() {
                    return Some(message.to_string());
                }
            }
        }
        return None;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed.len() > 200 || trimmed.starts_with('<') {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json(&self, url: &Url) -> ApiResult<Value> {
        let response = self.get_with_retry(url).await?;
        let data: Value = response.json().await?;
        Ok(data)
    }

    async fn post_json(&self, url: &Url, body: &Value) -> ApiResult<Value> {
        let response = self
            .authorize(self.client.post(url.as_str()))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(error_from_response(url, response).await);
        }
        let data: Value = response.json().await?;
        Ok(data)
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Canned reply for the fake backend.
    #[derive(Clone)]
    pub enum Canned {
        /// Successful JSON body.
        Json(Value),
        /// HTTP error status with an optional body message.
        Status(u16, Option<String>),
    }

    /// A fake HTTP backend that returns canned responses and records POSTs.
    #[derive(Default)]
    pub struct FakeBackend {
        responses: Mutex<HashMap<String, Canned>>,
        posts: Mutex<Vec<(String, Value)>>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Add a canned JSON response for a URL substring.
        #[must_use]
        pub fn with_json(self, url_contains: &str, json: Value) -> Self {
            self.responses
                .lock()
                .unwrap()
                .insert(url_contains.to_string(), Canned::Json(json));
            self
        }

        /// Add a canned error status for a URL substring.
        #[must_use]
        pub fn with_status(self, url_contains: &str, status: u16, message: Option<&str>) -> Self {
            self.responses.lock().unwrap().insert(
                url_contains.to_string(),
                Canned::Status(status, message.map(str::to_string)),
            );
            self
        }

        /// Bodies posted so far, in order.
        pub fn posted(&self) -> Vec<(String, Value)> {
            self.posts.lock().unwrap().clone()
        }

        fn reply(&self, url: &Url) -> ApiResult<Value> {
            let responses = self.responses.lock().unwrap();
            for (pattern, canned) in responses.iter() {
                if url.as_str().contains(pattern.as_str()) {
                    return match canned {
                        Canned::Json(json) => Ok(json.clone()),
                        Canned::Status(status, message) => Err(ApiError::RequestFailed {
                            status: *status,
                            url: url.to_string(),
                            message: message.clone(),
                        }),
                    };
                }
            }
            Err(ApiError::RequestFailed {
                status: 404,
                url: url.to_string(),
                message: None,
            })
        }
    }

    #[async_trait]
    impl HttpBackend for FakeBackend {
        async fn get_json(&self, url: &Url) -> ApiResult<Value> {
            self.reply(url)
        }

        async fn post_json(&self, url: &Url, body: &Value) -> ApiResult<Value> {
            self.posts
                .lock()
                .unwrap()
                .push((url.to_string(), body.clone()));
            self.reply(url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeBackend;
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_message_from_json_bodies() {
        assert_eq!(
            extract_error_message(r#"{"message": "Daily download limit reached"}"#),
            Some("Daily download limit reached".to_string())
        );
        assert_eq!(
            extract_error_message(r#"{"error": "subscription required"}"#),
            Some("subscription required".to_string())
        );
        assert_eq!(extract_error_message(r#"{"code": 7}"#), None);
    }

    #[test]
    fn plain_text_bodies_pass_through_when_short() {
        assert_eq!(
            extract_error_message("backend offline"),
            Some("backend offline".to_string())
        );
        assert_eq!(extract_error_message(""), None);
        assert_eq!(extract_error_message("<html><body>502</body></html>"), None);
    }

    #[test]
    fn reqwest_backend_creation() {
        let config = ApiConfig::default();
        let backend = ReqwestBackend::new(&config);
        assert_eq!(backend.max_retries, 3);
        assert_eq!(backend.retry_base_delay_ms, 500);
        assert!(backend.auth_token.is_none());
    }

    #[tokio::test]
    async fn fake_backend_returns_canned_json() {
        let backend =
            FakeBackend::new().with_json("download-status", json!({"canDownload": true}));
        let url = Url::parse("https://api.example/assets/a1/download-status").unwrap();
        let value = backend.get_json(&url).await.unwrap();
        assert_eq!(value["canDownload"], true);
    }

    #[tokio::test]
    async fn fake_backend_unknown_url_is_404() {
        let backend = FakeBackend::new();
        let url = Url::parse("https://api.example/unknown").unwrap();
        let result = backend.get_json(&url).await;
        assert!(matches!(
            result,
            Err(ApiError::RequestFailed { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn fake_backend_records_posts() {
        let backend = FakeBackend::new().with_json("download", json!({"downloadUrl": "u"}));
        let url = Url::parse("https://api.example/assets/a1/download").unwrap();
        backend.post_json(&url, &json!({})).await.unwrap();
        assert_eq!(backend.posted().len(), 1);
    }
}
