//! End-to-end tests for the download flow against a scripted storefront.
//!
//! These cover the ordering guarantees: pre-check before prompt, mandatory
//! resynchronization after the download call (success or failure), and
//! single-flight per gate.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use assetbay_core::{
    AssetSummary, ChangePlanReceipt, CheckoutSession, ConfirmOutcome, DenialKind, DisplayCycle,
    DownloadFlow, DownloadGate, DownloadReceipt, DownloadStatusSnapshot, GateState,
    RemainingDownloads, RequestOutcome, StorefrontError, StorefrontPort, StorefrontResult,
    SubscriptionPackage, SubscriptionView, UserProfile,
};

/// Scripted storefront: snapshot fetches and download calls pop from queues.
#[derive(Default)]
struct ScriptedStorefront {
    statuses: Mutex<VecDeque<StorefrontResult<DownloadStatusSnapshot>>>,
    downloads: Mutex<VecDeque<StorefrontResult<DownloadReceipt>>>,
    status_calls: AtomicUsize,
    download_calls: AtomicUsize,
}

impl ScriptedStorefront {
    fn push_status(&self, result: StorefrontResult<DownloadStatusSnapshot>) {
        self.statuses.lock().unwrap().push_back(result);
    }

    fn push_download(&self, result: StorefrontResult<DownloadReceipt>) {
        self.downloads.lock().unwrap().push_back(result);
    }

    fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StorefrontPort for ScriptedStorefront {
    async fn download_status(&self, _asset_id: &str) -> StorefrontResult<DownloadStatusSnapshot> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected download_status call"))
    }

    async fn perform_download(&self, _asset_id: &str) -> StorefrontResult<DownloadReceipt> {
        self.download_calls.fetch_add(1, Ordering::SeqCst);
        self.downloads
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected perform_download call"))
    }

    async fn list_packages(
        &self,
        _only_active: bool,
    ) -> StorefrontResult<Vec<SubscriptionPackage>> {
        Ok(vec![])
    }

    async fn current_subscription(&self) -> StorefrontResult<SubscriptionView> {
        Ok(SubscriptionView::none())
    }

    async fn create_checkout_session(
        &self,
        _plan_id: &str,
        _cycle: DisplayCycle,
    ) -> StorefrontResult<CheckoutSession> {
        Ok(CheckoutSession {
            url: "https://pay.example/session".to_string(),
        })
    }

    async fn change_subscription(
        &self,
        _new_plan_id: &str,
    ) -> StorefrontResult<ChangePlanReceipt> {
        Ok(ChangePlanReceipt {
            message: "ok".to_string(),
        })
    }

    async fn get_asset(&self, asset_id: &str) -> StorefrontResult<AssetSummary> {
        Ok(AssetSummary {
            id: asset_id.to_string(),
            name: "Stylized Forest Pack".to_string(),
            category: Some("environments".to_string()),
            price: Some(24.99),
        })
    }

    async fn profile(&self) -> StorefrontResult<UserProfile> {
        Err(StorefrontError::AuthRequired)
    }
}

fn snapshot(remaining: u32) -> DownloadStatusSnapshot {
    DownloadStatusSnapshot::permitted(RemainingDownloads::Count(remaining))
}

fn receipt() -> DownloadReceipt {
    DownloadReceipt {
        download_url: "https://cdn.example/forest.zip".to_string(),
        asset_name: "Stylized Forest Pack".to_string(),
        remaining_downloads: Some(RemainingDownloads::Count(1)),
        message: None,
    }
}

#[tokio::test]
async fn successful_download_updates_remaining_count() {
    // User with 2 remaining clicks download, confirms; the resync returns 1
    // and the displayed phrase updates without any further action.
    let port = Arc::new(ScriptedStorefront::default());
    port.push_status(Ok(snapshot(2))); // pre-check
    port.push_download(Ok(receipt()));
    port.push_status(Ok(snapshot(1))); // resync

    let flow = DownloadFlow::new(port.clone() as Arc<dyn StorefrontPort>);
    let mut gate = DownloadGate::new(true);

    let RequestOutcome::Prompt(prompt) = flow.request(&mut gate, "asset-1").await else {
        panic!("expected a confirmation prompt");
    };
    assert_eq!(prompt.asset.name, "Stylized Forest Pack");
    assert_eq!(prompt.remaining_phrase, "2 downloads remaining today");
    assert!(prompt.low_remaining);

    let outcome = flow.confirm(&mut gate, "asset-1").await;
    let ConfirmOutcome::Completed { receipt, state } = outcome else {
        panic!("expected a completed download");
    };
    assert_eq!(receipt.download_url, "https://cdn.example/forest.zip");
    assert_eq!(state, GateState::CanDownload);

    let refreshed = gate.snapshot().expect("resynced snapshot");
    assert_eq!(
        refreshed.remaining_downloads.phrase(),
        "1 download remaining today"
    );
    assert_eq!(port.status_calls(), 2);
}

#[tokio::test]
async fn failed_download_still_resynchronizes() {
    // The download 403s with a limit message; the resync must still run and
    // the gate must settle on the server's refreshed verdict.
    let port = Arc::new(ScriptedStorefront::default());
    port.push_status(Ok(snapshot(1))); // pre-check
    port.push_download(Err(StorefrontError::EntitlementDenied {
        kind: DenialKind::DownloadLimit,
        message: "download limit reached".to_string(),
    }));
    let mut denied = snapshot(0);
    denied.can_download = false;
    port.push_status(Ok(denied)); // resync

    let flow = DownloadFlow::new(port.clone() as Arc<dyn StorefrontPort>);
    let mut gate = DownloadGate::new(true);

    let RequestOutcome::Prompt(_) = flow.request(&mut gate, "asset-1").await else {
        panic!("expected a confirmation prompt");
    };

    let outcome = flow.confirm(&mut gate, "asset-1").await;
    let ConfirmOutcome::Rejected { error, state } = outcome else {
        panic!("expected a rejected download");
    };
    assert!(error.is_entitlement_family());
    assert_eq!(error.to_string(), "download limit reached");
    assert_eq!(state, GateState::LimitReached);
    // Pre-check plus mandatory resync
    assert_eq!(port.status_calls(), 2);
    assert!(!gate.is_downloading());
}

#[tokio::test]
async fn pre_check_catches_concurrent_exhaustion() {
    // The first snapshot said downloads were fine, but by the time the user
    // clicks, another tab exhausted the quota; the pre-check must refuse.
    let port = Arc::new(ScriptedStorefront::default());
    let mut exhausted = snapshot(0);
    exhausted.can_download = false;
    port.push_status(Ok(exhausted));

    let flow = DownloadFlow::new(port as Arc<dyn StorefrontPort>);
    let mut gate = DownloadGate::new(true);
    gate.apply_snapshot(snapshot(3)); // stale optimistic view

    let outcome = flow.request(&mut gate, "asset-1").await;
    let RequestOutcome::Refused { state, .. } = outcome else {
        panic!("expected a refusal");
    };
    assert_eq!(state, GateState::LimitReached);
}

#[tokio::test]
async fn failed_pre_check_blocks_instead_of_falling_through() {
    let port = Arc::new(ScriptedStorefront::default());
    port.push_status(Err(StorefrontError::Network {
        message: "connection refused".to_string(),
    }));

    let flow = DownloadFlow::new(port as Arc<dyn StorefrontPort>);
    let mut gate = DownloadGate::new(true);
    gate.apply_snapshot(snapshot(3));

    let outcome = flow.request(&mut gate, "asset-1").await;
    let RequestOutcome::Refused { state, message } = outcome else {
        panic!("expected a refusal");
    };
    assert_eq!(state, GateState::LoadingStatus);
    assert!(message.unwrap().contains("connection refused"));
    // The stale permissive snapshot must be gone
    assert!(gate.snapshot().is_none());
}

#[tokio::test]
async fn second_confirm_while_in_flight_is_busy() {
    let port = Arc::new(ScriptedStorefront::default());
    let flow = DownloadFlow::new(port as Arc<dyn StorefrontPort>);
    let mut gate = DownloadGate::new(true);
    gate.apply_snapshot(snapshot(2));

    assert!(gate.begin_download());
    let outcome = flow.confirm(&mut gate, "asset-1").await;
    assert!(matches!(outcome, ConfirmOutcome::Busy));
}

#[tokio::test]
async fn unauthenticated_request_is_refused_without_network() {
    let port = Arc::new(ScriptedStorefront::default());
    let flow = DownloadFlow::new(port.clone() as Arc<dyn StorefrontPort>);
    let mut gate = DownloadGate::new(false);

    let outcome = flow.request(&mut gate, "asset-1").await;
    let RequestOutcome::Refused { state, .. } = outcome else {
        panic!("expected a refusal");
    };
    assert_eq!(state, GateState::Unauthenticated);
    assert_eq!(port.status_calls(), 0);
}

#[tokio::test]
async fn resync_failure_leaves_gate_blocked_not_stale() {
    // Download succeeds but the resync fails: the gate must not keep
    // advertising the pre-download remaining count.
    let port = Arc::new(ScriptedStorefront::default());
    port.push_status(Ok(snapshot(1))); // pre-check
    port.push_download(Ok(receipt()));
    port.push_status(Err(StorefrontError::Network {
        message: "timeout".to_string(),
    })); // resync fails

    let flow = DownloadFlow::new(port as Arc<dyn StorefrontPort>);
    let mut gate = DownloadGate::new(true);

    let RequestOutcome::Prompt(_) = flow.request(&mut gate, "asset-1").await else {
        panic!("expected a confirmation prompt");
    };
    let outcome = flow.confirm(&mut gate, "asset-1").await;
    let ConfirmOutcome::Completed { state, .. } = outcome else {
        panic!("expected a completed download");
    };
    assert_eq!(state, GateState::LoadingStatus);
    assert!(gate.fetch_error().is_some());
    assert!(gate.snapshot().is_none());
}
