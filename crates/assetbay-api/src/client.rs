//! Storefront client.
//!
//! Generic over an HTTP backend for testability; production code uses
//! `DefaultStorefrontClient` and interacts with it through the
//! `StorefrontPort` trait.

use serde_json::json;
use url::Url;

use assetbay_core::{
    AssetSummary, ChangePlanReceipt, CheckoutSession, DisplayCycle, DownloadReceipt,
    DownloadStatusSnapshot, SubscriptionPackage, SubscriptionView, UserProfile,
};

use crate::config::ApiConfig;
use crate::error::ApiResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::{parsing, url as urls};

// ============================================================================
// Type Aliases
// ============================================================================

/// Default storefront client using the reqwest HTTP backend.
pub type DefaultStorefrontClient = StorefrontClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the marketplace REST API.
pub struct StorefrontClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) base_url: Url,
}

impl DefaultStorefrontClient {
    /// Create a new client with the given configuration.
    ///
    /// Fails with a configuration error when the base URL does not parse.
    pub fn new(config: &ApiConfig) -> Result<Self, assetbay_core::StorefrontError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            assetbay_core::StorefrontError::Configuration {
                message: format!("invalid API base URL '{}': {e}", config.base_url),
            }
        })?;
        Ok(Self {
            backend: ReqwestBackend::new(config),
            base_url,
        })
    }
}

impl<B: HttpBackend> StorefrontClient<B> {
    /// Create a client with a custom backend. Used by tests.
    #[cfg(test)]
    pub(crate) fn with_backend(backend: B) -> Self {
        Self {
            backend,
            base_url: Url::parse("https://api.example/api").expect("test URL is valid"),
        }
    }

    pub(crate) async fn fetch_download_status(
        &self,
        asset_id: &str,
    ) -> ApiResult<DownloadStatusSnapshot> {
        let url = urls::download_status_url(&self.base_url, asset_id);
        let json = self.backend.get_json(&url).await?;
        parsing::parse_download_status(&json)
    }

    pub(crate) async fn request_download(&self, asset_id: &str) -> ApiResult<DownloadReceipt> {
        let url = urls::perform_download_url(&self.base_url, asset_id);
        let json = self.backend.post_json(&url, &json!({})).await?;
        parsing::parse_download_receipt(&json)
    }

    pub(crate) async fn fetch_packages(
        &self,
        only_active: bool,
    ) -> ApiResult<Vec<SubscriptionPackage>> {
        let url = urls::packages_url(&self.base_url, only_active);
        let json = self.backend.get_json(&url).await?;
        parsing::parse_package_list(&json)
    }

    pub(crate) async fn fetch_current_subscription(&self) -> ApiResult<SubscriptionView> {
        let url = urls::current_subscription_url(&self.base_url);
        let json = self.backend.get_json(&url).await?;
        parsing::parse_subscription_view(&json)
    }

    pub(crate) async fn request_checkout_session(
        &self,
        plan_id: &str,
        cycle: DisplayCycle,
    ) -> ApiResult<CheckoutSession> {
        let url = urls::checkout_session_url(&self.base_url);
        let body = json!({
            "planId": plan_id,
            "billingCycle": match cycle {
                DisplayCycle::Monthly => "MONTHLY",
                DisplayCycle::Yearly => "YEARLY",
            },
        });
        let json = self.backend.post_json(&url, &body).await?;
        parsing::parse_checkout_session(&json)
    }

    pub(crate) async fn request_plan_change(
        &self,
        new_plan_id: &str,
    ) -> ApiResult<ChangePlanReceipt> {
        let url = urls::change_subscription_url(&self.base_url);
        let body = json!({ "newPlanId": new_plan_id });
        let json = self.backend.post_json(&url, &body).await?;
        parsing::parse_change_receipt(&json)
    }

    pub(crate) async fn fetch_asset(&self, asset_id: &str) -> ApiResult<AssetSummary> {
        let url = urls::asset_url(&self.base_url, asset_id);
        let json = self.backend.get_json(&url).await?;
        parsing::parse_asset_summary(&json)
    }

    pub(crate) async fn fetch_profile(&self) -> ApiResult<UserProfile> {
        let url = urls::profile_url(&self.base_url);
        let json = self.backend.get_json(&url).await?;
        parsing::parse_profile(&json)
    }
}
