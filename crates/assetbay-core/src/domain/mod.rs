//! Canonical domain entities for the marketplace client.
//!
//! Every wire shape the remote API produces is normalized into these types
//! exactly once, at the fetch boundary in `assetbay-api`. Code in this crate
//! and above never re-guesses response shapes.

mod package;
mod session;
mod snapshot;
mod view;

pub use package::{BillingCycle, DisplayCycle, SubscriptionPackage};
pub use session::{UserProfile, UserSession};
pub use snapshot::{
    ActiveSubscription, DownloadStatusSnapshot, RemainingDownloads,
    LOW_REMAINING_WARNING_THRESHOLD,
};
pub use view::{SubscriptionDetail, SubscriptionView};
