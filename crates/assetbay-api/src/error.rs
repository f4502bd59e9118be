//! Internal error types for marketplace API operations.
//!
//! These errors are internal to `assetbay-api` and are mapped to the core
//! port taxonomy at the boundary in `port.rs`.

use thiserror::Error;

/// Result type alias for marketplace API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors related to marketplace API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// API request failed with an HTTP error status.
    #[error("API request failed with status {status}: {url}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
        /// Server-provided message extracted from the error body, if any
        message: Option<String>,
    },

    /// API returned an invalid or unexpected response.
    #[error("Invalid response from marketplace API: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_error_message() {
        let error = ApiError::RequestFailed {
            status: 403,
            url: "https://api.example/assets/a1/download".to_string(),
            message: Some("Daily download limit reached".to_string()),
        };
        let msg = error.to_string();
        assert!(msg.contains("403"));
        assert!(msg.contains("assets/a1"));
    }

    #[test]
    fn invalid_response_error_message() {
        let error = ApiError::InvalidResponse {
            message: "missing required field 'canDownload'".to_string(),
        };
        assert!(error.to_string().contains("canDownload"));
    }
}
