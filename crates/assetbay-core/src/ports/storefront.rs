//! Storefront port trait and its DTOs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::StorefrontResult;
use crate::domain::{
    DisplayCycle, DownloadStatusSnapshot, RemainingDownloads, SubscriptionPackage,
    SubscriptionView, UserProfile,
};

/// Minimal asset record used by the confirmation prompt and status display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetSummary {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub price: Option<f64>,
}

/// What the server hands back for an honored download request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadReceipt {
    /// Short-lived URL the asset archive can be fetched from.
    pub download_url: String,
    /// Name of the asset the receipt is for.
    pub asset_name: String,
    /// Remaining count after this download, when the server reports it.
    pub remaining_downloads: Option<RemainingDownloads>,
    pub message: Option<String>,
}

/// Payment-processor checkout session for a browser redirect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub url: String,
}

/// Server acknowledgment of a plan change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePlanReceipt {
    pub message: String,
}

/// Port trait for the remote marketplace API.
///
/// # Design
///
/// - Uses core-owned DTOs, never wire types
/// - Returns `StorefrontError` for all failures
/// - Every method is a fresh round trip; nothing is cached behind this trait
#[async_trait]
pub trait StorefrontPort: Send + Sync {
    /// Fetch the entitlement snapshot for an asset.
    async fn download_status(&self, asset_id: &str) -> StorefrontResult<DownloadStatusSnapshot>;

    /// Ask the server to issue a download for an asset.
    async fn perform_download(&self, asset_id: &str) -> StorefrontResult<DownloadReceipt>;

    /// List subscription packages, optionally restricted to active ones.
    async fn list_packages(&self, only_active: bool)
        -> StorefrontResult<Vec<SubscriptionPackage>>;

    /// Fetch the signed-in user's subscription view.
    async fn current_subscription(&self) -> StorefrontResult<SubscriptionView>;

    /// Create a payment checkout session for a plan.
    async fn create_checkout_session(
        &self,
        plan_id: &str,
        cycle: DisplayCycle,
    ) -> StorefrontResult<CheckoutSession>;

    /// Change the current subscription to a new plan.
    async fn change_subscription(&self, new_plan_id: &str) -> StorefrontResult<ChangePlanReceipt>;

    /// Fetch an asset summary (used for confirmation prompts).
    async fn get_asset(&self, asset_id: &str) -> StorefrontResult<AssetSummary>;

    /// Fetch the signed-in user's profile.
    async fn profile(&self) -> StorefrontResult<UserProfile>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    // Verify the trait is object-safe
    fn _assert_object_safe(_: Arc<dyn StorefrontPort>) {}
}
