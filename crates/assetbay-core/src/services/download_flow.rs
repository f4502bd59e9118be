//! The confirm-download flow.
//!
//! Owns the ordering constraints of the download action:
//!
//! 1. The pre-check snapshot fetch completes before a confirmation prompt
//!    is offered (to catch races with concurrent downloads elsewhere).
//! 2. After the download call resolves, a resynchronization fetch runs
//!    regardless of success or failure, so a stale "download available"
//!    display can never survive a failed attempt.
//! 3. At most one download is in flight per gate; a second confirm while
//!    in flight is rejected as busy.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::entitlement::{DownloadGate, GateAction, GateState};
use crate::ports::{AssetSummary, DownloadReceipt, StorefrontError, StorefrontPort};

/// Everything the confirmation prompt needs to render.
#[derive(Debug, Clone)]
pub struct DownloadPrompt {
    pub asset: AssetSummary,
    /// Exact remaining-count phrasing from the re-checked snapshot.
    pub remaining_phrase: String,
    /// Whether the low-remaining warning applies.
    pub low_remaining: bool,
}

/// Result of asking to download (the pre-check step).
#[derive(Debug)]
pub enum RequestOutcome {
    /// The re-checked snapshot still permits; show the prompt.
    Prompt(DownloadPrompt),
    /// The action is not available in the (refreshed) state.
    Refused {
        state: GateState,
        /// Server or transport message to surface, when there is one.
        message: Option<String>,
    },
}

/// Result of a confirmed download.
#[derive(Debug)]
pub enum ConfirmOutcome {
    /// A download was already in flight on this gate.
    Busy,
    /// The gate state did not permit a download.
    NotPermitted { state: GateState },
    /// The server issued the download. The gate has already been
    /// resynchronized; `state` is the refreshed steady state.
    Completed {
        receipt: DownloadReceipt,
        state: GateState,
    },
    /// The download call failed. The resynchronization fetch has still run;
    /// `state` is the refreshed steady state.
    Rejected {
        error: StorefrontError,
        state: GateState,
    },
}

/// Orchestrates the download flow for one asset at a time.
pub struct DownloadFlow {
    port: Arc<dyn StorefrontPort>,
}

impl DownloadFlow {
    #[must_use]
    pub fn new(port: Arc<dyn StorefrontPort>) -> Self {
        Self { port }
    }

    /// Fetch a fresh snapshot into the gate.
    ///
    /// On failure the gate is marked so it blocks the action; the error is
    /// returned for display.
    pub async fn refresh(
        &self,
        gate: &mut DownloadGate,
        asset_id: &str,
    ) -> Result<(), StorefrontError> {
        match self.port.download_status(asset_id).await {
            Ok(snapshot) => {
                debug!(asset_id, state = ?crate::entitlement::classify(&snapshot), "snapshot refreshed");
                gate.apply_snapshot(snapshot);
                Ok(())
            }
            Err(err) => {
                warn!(asset_id, error = %err, "snapshot fetch failed");
                gate.mark_fetch_failed(err.to_string());
                Err(err)
            }
        }
    }

    /// The pre-check step: re-fetch the snapshot and, only if the refreshed
    /// state still permits a download, return the confirmation prompt.
    pub async fn request(&self, gate: &mut DownloadGate, asset_id: &str) -> RequestOutcome {
        if gate.state() == GateState::Unauthenticated {
            return RequestOutcome::Refused {
                state: GateState::Unauthenticated,
                message: None,
            };
        }

        if let Err(err) = self.refresh(gate, asset_id).await {
            return RequestOutcome::Refused {
                state: gate.state(),
                message: Some(err.to_string()),
            };
        }

        if gate.action() != GateAction::ConfirmDownload {
            let message = gate.snapshot().and_then(|s| s.message.clone());
            return RequestOutcome::Refused {
                state: gate.state(),
                message,
            };
        }

        let asset = match self.port.get_asset(asset_id).await {
            Ok(asset) => asset,
            Err(err) => {
                return RequestOutcome::Refused {
                    state: gate.state(),
                    message: Some(err.to_string()),
                };
            }
        };

        // The pre-check fetch succeeded, so a snapshot is present
        let remaining = gate
            .snapshot()
            .map(|s| s.remaining_downloads)
            .unwrap_or(crate::domain::RemainingDownloads::Count(0));

        RequestOutcome::Prompt(DownloadPrompt {
            asset,
            remaining_phrase: remaining.phrase(),
            low_remaining: remaining.is_low(),
        })
    }

    /// The confirmed download: flip the gate to in-flight, perform the
    /// download, then always resynchronize before settling.
    pub async fn confirm(&self, gate: &mut DownloadGate, asset_id: &str) -> ConfirmOutcome {
        if gate.is_downloading() {
            return ConfirmOutcome::Busy;
        }
        if !gate.begin_download() {
            return ConfirmOutcome::NotPermitted {
                state: gate.state(),
            };
        }

        let result = self.port.perform_download(asset_id).await;

        // Mandatory resynchronization, success or failure; its own failure
        // is recorded on the gate but does not replace the download outcome.
        match self.port.download_status(asset_id).await {
            Ok(snapshot) => gate.apply_snapshot(snapshot),
            Err(err) => {
                warn!(asset_id, error = %err, "resync fetch failed");
                gate.mark_fetch_failed(err.to_string());
            }
        }

        gate.finish_download();
        let state = gate.state();

        match result {
            Ok(receipt) => {
                debug!(asset_id, asset = %receipt.asset_name, "download issued");
                ConfirmOutcome::Completed { receipt, state }
            }
            Err(error) => ConfirmOutcome::Rejected { error, state },
        }
    }
}
