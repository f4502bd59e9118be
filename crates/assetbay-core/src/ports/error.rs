//! Error taxonomy for storefront port operations.

use thiserror::Error;

/// Which entitlement rule the server cited when refusing a download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialKind {
    /// Daily download limit exhausted.
    DownloadLimit,
    /// No (or insufficient) subscription.
    SubscriptionRequired,
}

/// Errors from storefront port operations.
///
/// These are domain-level errors that consumers can handle and render.
/// Implementation-specific errors (HTTP statuses, JSON shapes) are mapped
/// to these at the adapter boundary.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Authentication required or the token was rejected.
    #[error("sign in required")]
    AuthRequired,

    /// The server refused the action on entitlement grounds. Expected,
    /// user-facing, and non-retryable without external action.
    #[error("{message}")]
    EntitlementDenied {
        /// Which rule was cited.
        kind: DenialKind,
        /// The server's message, shown verbatim.
        message: String,
    },

    /// Too many requests; same styling family as a reached limit.
    #[error("rate limited: {message}")]
    RateLimited {
        /// The server's message, or a fallback.
        message: String,
    },

    /// The requested asset does not exist.
    #[error("asset not found: {asset_id}")]
    AssetNotFound {
        /// The asset ID that wasn't found.
        asset_id: String,
    },

    /// Transport failure or an unexpected server error.
    #[error("network error: {message}")]
    Network {
        /// Description of what failed.
        message: String,
    },

    /// The server responded but the payload made no sense.
    #[error("invalid API response: {message}")]
    InvalidResponse {
        /// What was invalid.
        message: String,
    },

    /// Client-side setup problem (bad base URL and similar).
    #[error("configuration error: {message}")]
    Configuration {
        /// What's wrong with the configuration.
        message: String,
    },
}

impl StorefrontError {
    /// Whether this error belongs to the entitlement styling family
    /// (styled notice) rather than the generic failure family.
    #[must_use]
    pub const fn is_entitlement_family(&self) -> bool {
        matches!(
            self,
            Self::EntitlementDenied { .. } | Self::RateLimited { .. }
        )
    }
}

/// Result type alias for storefront port operations.
pub type StorefrontResult<T> = Result<T, StorefrontError>;
