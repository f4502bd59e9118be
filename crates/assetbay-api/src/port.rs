//! Port trait implementation for `StorefrontClient`.
//!
//! Implements the core-owned `StorefrontPort` trait, mapping internal API
//! errors to the port taxonomy at this boundary. The 403 keyword rules live
//! here: a forbidden response whose message mentions the download limit or
//! a subscription becomes an entitlement denial with distinct styling;
//! anything else forbidden stays a generic failure.

use async_trait::async_trait;

use assetbay_core::{
    AssetSummary, ChangePlanReceipt, CheckoutSession, DenialKind, DisplayCycle, DownloadReceipt,
    DownloadStatusSnapshot, StorefrontError, StorefrontPort, StorefrontResult,
    SubscriptionPackage, SubscriptionView, UserProfile,
};

use crate::client::StorefrontClient;
use crate::error::ApiError;
use crate::http::HttpBackend;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert an internal `ApiError` to the port taxonomy.
///
/// `asset_id` provides context for 404s on asset-scoped endpoints.
pub(crate) fn map_error(err: ApiError, asset_id: Option<&str>) -> StorefrontError {
    match err {
        ApiError::RequestFailed {
            status,
            url,
            message,
        } => match status {
            401 => StorefrontError::AuthRequired,
            403 => map_forbidden(status, &url, message),
            404 => StorefrontError::AssetNotFound {
                asset_id: asset_id.map_or_else(|| url.clone(), str::to_string),
            },
            429 => StorefrontError::RateLimited {
                message: message.unwrap_or_else(|| "too many requests".to_string()),
            },
            _ => StorefrontError::Network {
                message: message.unwrap_or_else(|| {
                    format!("API request failed with status {status}: {url}")
                }),
            },
        },
        ApiError::InvalidResponse { message } => StorefrontError::InvalidResponse { message },
        ApiError::Network(e) => StorefrontError::Network {
            message: e.to_string(),
        },
        ApiError::InvalidUrl(e) => StorefrontError::Configuration {
            message: e.to_string(),
        },
        ApiError::JsonParse(e) => StorefrontError::InvalidResponse {
            message: e.to_string(),
        },
    }
}

fn map_forbidden(status: u16, url: &str, message: Option<String>) -> StorefrontError {
    let Some(message) = message else {
        return StorefrontError::Network {
            message: format!("API request failed with status {status}: {url}"),
        };
    };
    let lowered = message.to_lowercase();
    if lowered.contains("download limit") || lowered.contains("limit reached") {
        StorefrontError::EntitlementDenied {
            kind: DenialKind::DownloadLimit,
            message,
        }
    } else if lowered.contains("subscription") {
        StorefrontError::EntitlementDenied {
            kind: DenialKind::SubscriptionRequired,
            message,
        }
    } else {
        StorefrontError::Network { message }
    }
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: HttpBackend> StorefrontPort for StorefrontClient<B> {
    async fn download_status(&self, asset_id: &str) -> StorefrontResult<DownloadStatusSnapshot> {
        self.fetch_download_status(asset_id)
            .await
            .map_err(|e| map_error(e, Some(asset_id)))
    }

    async fn perform_download(&self, asset_id: &str) -> StorefrontResult<DownloadReceipt> {
        self.request_download(asset_id)
            .await
            .map_err(|e| map_error(e, Some(asset_id)))
    }

    async fn list_packages(
        &self,
        only_active: bool,
    ) -> StorefrontResult<Vec<SubscriptionPackage>> {
        self.fetch_packages(only_active)
            .await
            .map_err(|e| map_error(e, None))
    }

    async fn current_subscription(&self) -> StorefrontResult<SubscriptionView> {
        self.fetch_current_subscription()
            .await
            .map_err(|e| map_error(e, None))
    }

    async fn create_checkout_session(
        &self,
        plan_id: &str,
        cycle: DisplayCycle,
    ) -> StorefrontResult<CheckoutSession> {
        self.request_checkout_session(plan_id, cycle)
            .await
            .map_err(|e| map_error(e, None))
    }

    async fn change_subscription(&self, new_plan_id: &str) -> StorefrontResult<ChangePlanReceipt> {
        self.request_plan_change(new_plan_id)
            .await
            .map_err(|e| map_error(e, None))
    }

    async fn get_asset(&self, asset_id: &str) -> StorefrontResult<AssetSummary> {
        self.fetch_asset(asset_id)
            .await
            .map_err(|e| map_error(e, Some(asset_id)))
    }

    async fn profile(&self) -> StorefrontResult<UserProfile> {
        self.fetch_profile().await.map_err(|e| map_error(e, None))
    }
}
