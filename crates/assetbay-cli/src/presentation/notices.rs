//! User-visible notices.
//!
//! Two styling families: entitlement notices (expected refusals the user
//! resolves by subscribing or waiting) and generic failures (transport and
//! server errors). Authentication is a navigation hint, not an error.

use assetbay_core::{GateState, StorefrontError};

/// Human label for a gate state, used by the status display.
#[must_use]
pub const fn gate_state_label(state: GateState) -> &'static str {
    match state {
        GateState::Unauthenticated => "sign-in required",
        GateState::LoadingStatus => "status unavailable",
        GateState::AdminUnlimited => "admin (unlimited)",
        GateState::NoSubscription => "no subscription",
        GateState::LimitReached => "download limit reached",
        GateState::CanDownload => "ready to download",
        GateState::Downloading => "downloading",
    }
}

/// Hint shown instead of an error when authentication is missing.
pub fn sign_in_hint() {
    println!("You are not signed in. Run 'assetbay login' first.");
}

/// Hint shown when a subscription is required.
pub fn subscribe_hint() {
    println!("No active subscription. Run 'assetbay plans' to pick a plan.");
}

/// Render a storefront error in its styling family.
pub fn render_storefront_error(err: &StorefrontError) {
    match err {
        StorefrontError::AuthRequired => sign_in_hint(),
        _ if err.is_entitlement_family() => println!("!! {err}"),
        _ => eprintln!("Error: {err}"),
    }
}

/// Low-remaining warning banner.
pub fn low_remaining_warning(phrase: &str) {
    println!("!  Heads up: only {phrase}.");
}
