#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod entitlement;
pub mod paths;
pub mod ports;
pub mod pricing;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    ActiveSubscription, BillingCycle, DisplayCycle, DownloadStatusSnapshot, RemainingDownloads,
    SubscriptionDetail, SubscriptionPackage, SubscriptionView, UserProfile, UserSession,
    LOW_REMAINING_WARNING_THRESHOLD,
};
pub use entitlement::{classify, DownloadGate, GateAction, GateRule, GateState, GATE_RULES};
pub use ports::{
    AssetSummary, ChangePlanReceipt, CheckoutSession, DenialKind, DownloadReceipt, SessionError,
    SessionStore, StorefrontError, StorefrontPort, StorefrontResult,
};
pub use pricing::{classify_plan_action, resolve_display_price, resolve_yearly_savings, PlanAction};
pub use services::{
    ConfirmOutcome, DownloadFlow, DownloadPrompt, PlanRow, PlanService, RequestOutcome,
};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
