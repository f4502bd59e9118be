//! Plan pricing resolver.
//!
//! Pure, side-effect-free price and savings arithmetic for a subscription
//! package under a selected display cycle, plus classification of what a
//! plan change means relative to the current subscription.
//!
//! These functions are total over validated-shape inputs: they never panic
//! and never return errors. An out-of-range `yearly_discount` is passed
//! through unvalidated; the parse boundary in `assetbay-api` is responsible
//! for saturating obviously broken values.

use crate::domain::{BillingCycle, DisplayCycle, SubscriptionPackage};

/// What selecting a candidate plan would do relative to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanAction {
    /// No current plan at all.
    Subscribe,
    /// Candidate is the current plan.
    Current,
    /// Candidate is strictly more expensive.
    Upgrade,
    /// Candidate is strictly cheaper.
    Downgrade,
    /// Same price, different plan. Billing-cycle differences at equal price
    /// are deliberately not distinguished.
    Switch,
}

impl PlanAction {
    /// User-facing label for plan tables and confirmation prompts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Subscribe => "subscribe",
            Self::Current => "current plan",
            Self::Upgrade => "upgrade",
            Self::Downgrade => "downgrade",
            Self::Switch => "switch",
        }
    }
}

/// Price shown for a package under the requested display cycle.
///
/// The yearly discount applies in exactly one combination: a monthly-billed
/// package displayed under the yearly cycle. A package natively billed
/// yearly keeps its base price even when it carries a non-zero
/// `yearly_discount`; that asymmetry is inherited behavior, preserved as-is.
#[must_use]
pub fn resolve_display_price(pkg: &SubscriptionPackage, cycle: DisplayCycle) -> f64 {
    if cycle == DisplayCycle::Yearly && pkg.billing_cycle == BillingCycle::Monthly {
        pkg.base_price * 12.0 * (1.0 - f64::from(pkg.yearly_discount) / 100.0)
    } else {
        pkg.base_price
    }
}

/// Amount saved per year by paying yearly instead of twelve monthly charges.
///
/// Meaningful only for a monthly-billed package with a non-zero discount;
/// `0.0` in every other case.
#[must_use]
pub fn resolve_yearly_savings(pkg: &SubscriptionPackage) -> f64 {
    if pkg.billing_cycle == BillingCycle::Monthly && pkg.yearly_discount > 0 {
        pkg.base_price * 12.0 - resolve_display_price(pkg, DisplayCycle::Yearly)
    } else {
        0.0
    }
}

/// Classify a candidate plan against the current one.
///
/// The tie-break is price-only: equal price with a different id falls
/// through to [`PlanAction::Switch`] even when the billing cycles differ.
#[must_use]
pub fn classify_plan_action(
    current: Option<&SubscriptionPackage>,
    candidate: &SubscriptionPackage,
) -> PlanAction {
    let Some(current) = current else {
        return PlanAction::Subscribe;
    };
    if candidate.id == current.id {
        PlanAction::Current
    } else if candidate.base_price > current.base_price {
        PlanAction::Upgrade
    } else if candidate.base_price < current.base_price {
        PlanAction::Downgrade
    } else {
        PlanAction::Switch
    }
}
