//! Priced plan rows for the catalog display.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{DisplayCycle, SubscriptionPackage, SubscriptionView};
use crate::ports::{StorefrontError, StorefrontPort, StorefrontResult};
use crate::pricing::{
    classify_plan_action, resolve_display_price, resolve_yearly_savings, PlanAction,
};

/// One catalog row: the package plus everything derived for display.
#[derive(Debug, Clone)]
pub struct PlanRow {
    pub package: SubscriptionPackage,
    /// Price under the requested display cycle.
    pub display_price: f64,
    /// Yearly savings versus twelve monthly charges (0 when not applicable).
    pub yearly_savings: f64,
    /// What selecting this plan would do for the current user.
    pub action: PlanAction,
}

/// Fetches the catalog and derives priced rows.
pub struct PlanService {
    port: Arc<dyn StorefrontPort>,
}

impl PlanService {
    #[must_use]
    pub fn new(port: Arc<dyn StorefrontPort>) -> Self {
        Self { port }
    }

    /// Fetch packages and the current subscription, and derive one row per
    /// package under the requested display cycle.
    ///
    /// An unauthenticated user still gets the catalog: `AuthRequired` from
    /// the subscription fetch is treated as "no subscription".
    pub async fn plan_rows(
        &self,
        cycle: DisplayCycle,
        only_active: bool,
    ) -> StorefrontResult<Vec<PlanRow>> {
        let packages = self.port.list_packages(only_active).await?;
        let view = self.subscription_or_none().await?;
        let current = view.current_plan();

        debug!(count = packages.len(), cycle = %cycle, "derived plan rows");

        Ok(packages
            .into_iter()
            .map(|package| {
                let display_price = resolve_display_price(&package, cycle);
                let yearly_savings = resolve_yearly_savings(&package);
                let action = classify_plan_action(current, &package);
                PlanRow {
                    package,
                    display_price,
                    yearly_savings,
                    action,
                }
            })
            .collect())
    }

    /// Look up one package by id across the full catalog.
    pub async fn find_plan(&self, plan_id: &str) -> StorefrontResult<SubscriptionPackage> {
        let packages = self.port.list_packages(false).await?;
        packages
            .into_iter()
            .find(|pkg| pkg.id == plan_id)
            .ok_or_else(|| StorefrontError::InvalidResponse {
                message: format!("no plan with id '{plan_id}' in the catalog"),
            })
    }

    /// What changing to `plan_id` would mean for the current user.
    pub async fn classify_change(&self, plan_id: &str) -> StorefrontResult<(SubscriptionPackage, PlanAction)> {
        let candidate = self.find_plan(plan_id).await?;
        let view = self.subscription_or_none().await?;
        let action = classify_plan_action(view.current_plan(), &candidate);
        Ok((candidate, action))
    }

    /// The current subscription view, with 401 softened to "none".
    pub async fn subscription_or_none(&self) -> StorefrontResult<SubscriptionView> {
        match self.port.current_subscription().await {
            Ok(view) => Ok(view),
            Err(StorefrontError::AuthRequired) => Ok(SubscriptionView::none()),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BillingCycle, SubscriptionDetail, UserProfile};
    use crate::ports::{
        AssetSummary, ChangePlanReceipt, CheckoutSession, DownloadReceipt, StorefrontPort,
    };
    use async_trait::async_trait;

    fn package(id: &str, price: f64, discount: u8) -> SubscriptionPackage {
        SubscriptionPackage {
            id: id.to_string(),
            name: format!("plan-{id}"),
            description: None,
            base_price: price,
            billing_cycle: BillingCycle::Monthly,
            yearly_discount: discount,
            daily_download_limit: 10,
            features: vec![],
            is_active: true,
        }
    }

    /// Catalog-only port: packages plus an optional current subscription.
    struct CatalogPort {
        packages: Vec<SubscriptionPackage>,
        subscription: StorefrontResult<SubscriptionView>,
    }

    #[async_trait]
    impl StorefrontPort for CatalogPort {
        async fn download_status(
            &self,
            _asset_id: &str,
        ) -> StorefrontResult<crate::domain::DownloadStatusSnapshot> {
            unimplemented!("not used by plan tests")
        }

        async fn perform_download(&self, _asset_id: &str) -> StorefrontResult<DownloadReceipt> {
            unimplemented!("not used by plan tests")
        }

        async fn list_packages(
            &self,
            _only_active: bool,
        ) -> StorefrontResult<Vec<SubscriptionPackage>> {
            Ok(self.packages.clone())
        }

        async fn current_subscription(&self) -> StorefrontResult<SubscriptionView> {
            match &self.subscription {
                Ok(view) => Ok(view.clone()),
                Err(StorefrontError::AuthRequired) => Err(StorefrontError::AuthRequired),
                Err(e) => Err(StorefrontError::Network {
                    message: e.to_string(),
                }),
            }
        }

        async fn create_checkout_session(
            &self,
            _plan_id: &str,
            _cycle: DisplayCycle,
        ) -> StorefrontResult<CheckoutSession> {
            unimplemented!("not used by plan tests")
        }

        async fn change_subscription(
            &self,
            _new_plan_id: &str,
        ) -> StorefrontResult<ChangePlanReceipt> {
            unimplemented!("not used by plan tests")
        }

        async fn get_asset(&self, _asset_id: &str) -> StorefrontResult<AssetSummary> {
            unimplemented!("not used by plan tests")
        }

        async fn profile(&self) -> StorefrontResult<UserProfile> {
            unimplemented!("not used by plan tests")
        }
    }

    fn service(port: CatalogPort) -> PlanService {
        PlanService::new(Arc::new(port))
    }

    fn subscribed_to(plan: SubscriptionPackage) -> StorefrontResult<SubscriptionView> {
        Ok(SubscriptionView {
            has_subscription: true,
            subscription: Some(SubscriptionDetail {
                plan,
                end_date: None,
            }),
        })
    }

    #[tokio::test]
    async fn rows_carry_prices_savings_and_actions() {
        let svc = service(CatalogPort {
            packages: vec![package("basic", 5.0, 0), package("pro", 10.0, 20)],
            subscription: subscribed_to(package("basic", 5.0, 0)),
        });

        let rows = svc.plan_rows(DisplayCycle::Yearly, true).await.unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].action, PlanAction::Current);
        assert!((rows[0].display_price - 60.0).abs() < f64::EPSILON);
        assert!(rows[0].yearly_savings.abs() < f64::EPSILON);

        assert_eq!(rows[1].action, PlanAction::Upgrade);
        assert!((rows[1].display_price - 96.0).abs() < 1e-9);
        assert!((rows[1].yearly_savings - 24.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn unauthenticated_catalog_classifies_as_subscribe() {
        let svc = service(CatalogPort {
            packages: vec![package("basic", 5.0, 0)],
            subscription: Err(StorefrontError::AuthRequired),
        });

        let rows = svc.plan_rows(DisplayCycle::Monthly, true).await.unwrap();
        assert_eq!(rows[0].action, PlanAction::Subscribe);
    }

    #[tokio::test]
    async fn find_plan_reports_unknown_ids() {
        let svc = service(CatalogPort {
            packages: vec![package("basic", 5.0, 0)],
            subscription: Ok(SubscriptionView::none()),
        });

        assert_eq!(svc.find_plan("basic").await.unwrap().id, "basic");
        let err = svc.find_plan("nope").await.unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[tokio::test]
    async fn classify_change_against_current_plan() {
        let svc = service(CatalogPort {
            packages: vec![package("basic", 5.0, 0), package("pro", 10.0, 0)],
            subscription: subscribed_to(package("pro", 10.0, 0)),
        });

        let (candidate, action) = svc.classify_change("basic").await.unwrap();
        assert_eq!(candidate.id, "basic");
        assert_eq!(action, PlanAction::Downgrade);
    }

    #[tokio::test]
    async fn transport_errors_from_subscription_fetch_propagate() {
        let svc = service(CatalogPort {
            packages: vec![package("basic", 5.0, 0)],
            subscription: Err(StorefrontError::Network {
                message: "boom".to_string(),
            }),
        });

        assert!(svc.plan_rows(DisplayCycle::Monthly, true).await.is_err());
    }
}
