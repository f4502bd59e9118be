//! Per-asset download gate.
//!
//! A `DownloadGate` tracks what one download control knows locally: whether
//! a user is signed in, the latest snapshot (replaced wholesale on every
//! refresh), whether the last fetch failed, and whether a confirmed download
//! is currently in flight. Everything else is derived.

use super::{classify, GateState};
use crate::domain::DownloadStatusSnapshot;

/// What the primary control does when activated in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateAction {
    /// Navigate to sign-in; no network call.
    SignIn,
    /// Navigate to the plans catalog; no network call.
    OpenPlans,
    /// Run the pre-check fetch and open the confirmation prompt.
    ConfirmDownload,
    /// Control is non-interactive.
    Disabled,
}

/// Local state for one asset's download control.
#[derive(Debug)]
pub struct DownloadGate {
    authenticated: bool,
    snapshot: Option<DownloadStatusSnapshot>,
    fetch_error: Option<String>,
    downloading: bool,
}

impl DownloadGate {
    #[must_use]
    pub const fn new(authenticated: bool) -> Self {
        Self {
            authenticated,
            snapshot: None,
            fetch_error: None,
            downloading: false,
        }
    }

    /// Replace the snapshot wholesale and clear any previous fetch error.
    pub fn apply_snapshot(&mut self, snapshot: DownloadStatusSnapshot) {
        self.snapshot = Some(snapshot);
        self.fetch_error = None;
    }

    /// Record a failed snapshot fetch.
    ///
    /// The stale snapshot is dropped so the gate can never fall through to
    /// `CanDownload` on the strength of an old read.
    pub fn mark_fetch_failed(&mut self, message: impl Into<String>) {
        self.snapshot = None;
        self.fetch_error = Some(message.into());
    }

    /// Derive the current state.
    ///
    /// Layering order: authentication, then the in-flight download flag,
    /// then snapshot availability, then snapshot classification.
    #[must_use]
    pub fn state(&self) -> GateState {
        if !self.authenticated {
            return GateState::Unauthenticated;
        }
        if self.downloading {
            return GateState::Downloading;
        }
        match &self.snapshot {
            None => GateState::LoadingStatus,
            Some(snapshot) => classify(snapshot),
        }
    }

    /// The action bound to the primary control in the current state.
    #[must_use]
    pub fn action(&self) -> GateAction {
        match self.state() {
            GateState::Unauthenticated => GateAction::SignIn,
            GateState::NoSubscription => GateAction::OpenPlans,
            GateState::AdminUnlimited | GateState::CanDownload => GateAction::ConfirmDownload,
            GateState::LoadingStatus | GateState::LimitReached | GateState::Downloading => {
                GateAction::Disabled
            }
        }
    }

    /// Enter the in-flight download state.
    ///
    /// Returns false without changing anything if a download is already in
    /// flight or the current state does not permit one.
    pub fn begin_download(&mut self) -> bool {
        if self.downloading || self.action() != GateAction::ConfirmDownload {
            return false;
        }
        self.downloading = true;
        true
    }

    /// Leave the in-flight download state.
    pub fn finish_download(&mut self) {
        self.downloading = false;
    }

    #[must_use]
    pub const fn is_downloading(&self) -> bool {
        self.downloading
    }

    #[must_use]
    pub const fn snapshot(&self) -> Option<&DownloadStatusSnapshot> {
        self.snapshot.as_ref()
    }

    #[must_use]
    pub fn fetch_error(&self) -> Option<&str> {
        self.fetch_error.as_deref()
    }
}
