//! Current-subscription view types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::package::SubscriptionPackage;

/// The signed-in user's subscription, as reported by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionView {
    pub has_subscription: bool,
    pub subscription: Option<SubscriptionDetail>,
}

/// Details of an active subscription, including the full plan record used
/// for upgrade/downgrade comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionDetail {
    pub plan: SubscriptionPackage,
    pub end_date: Option<DateTime<Utc>>,
}

impl SubscriptionView {
    /// View for a user with no subscription (also used when the user is not
    /// signed in at all).
    #[must_use]
    pub const fn none() -> Self {
        Self {
            has_subscription: false,
            subscription: None,
        }
    }

    /// The current plan, if the user has one.
    #[must_use]
    pub fn current_plan(&self) -> Option<&SubscriptionPackage> {
        if !self.has_subscription {
            return None;
        }
        self.subscription.as_ref().map(|detail| &detail.plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BillingCycle;

    fn plan(id: &str) -> SubscriptionPackage {
        SubscriptionPackage {
            id: id.to_string(),
            name: "Pro".to_string(),
            description: None,
            base_price: 10.0,
            billing_cycle: BillingCycle::Monthly,
            yearly_discount: 0,
            daily_download_limit: 10,
            features: vec![],
            is_active: true,
        }
    }

    #[test]
    fn current_plan_requires_both_flag_and_detail() {
        assert!(SubscriptionView::none().current_plan().is_none());

        // Flag set but no detail: still no plan
        let view = SubscriptionView {
            has_subscription: true,
            subscription: None,
        };
        assert!(view.current_plan().is_none());

        let view = SubscriptionView {
            has_subscription: true,
            subscription: Some(SubscriptionDetail {
                plan: plan("p1"),
                end_date: None,
            }),
        };
        assert_eq!(view.current_plan().map(|p| p.id.as_str()), Some("p1"));

        // Detail present but flag cleared: the flag wins
        let view = SubscriptionView {
            has_subscription: false,
            subscription: Some(SubscriptionDetail {
                plan: plan("p1"),
                end_date: None,
            }),
        };
        assert!(view.current_plan().is_none());
    }
}
