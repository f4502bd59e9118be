//! Entitlement gate: snapshot classification and the per-asset download gate.
//!
//! The server is the source of truth for download entitlement; this module
//! mirrors its verdict into a locally consistent state machine the UI can
//! render. Classification is an explicit ordered rule table rather than a
//! nested conditional, so the priority order is a visible, testable data
//! structure.

mod gate;

pub use gate::{DownloadGate, GateAction};

use crate::domain::DownloadStatusSnapshot;

/// Steady and transient states a download control can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// No signed-in user; checked before any snapshot is fetched.
    Unauthenticated,
    /// Snapshot fetch in flight or failed; the action is blocked either way.
    LoadingStatus,
    /// Admin override: unlimited regardless of the other snapshot fields.
    AdminUnlimited,
    /// Signed in but not subscribed.
    NoSubscription,
    /// Subscribed but the server currently refuses the download.
    LimitReached,
    /// The server will honor a download request.
    CanDownload,
    /// A confirmed download request is in flight.
    Downloading,
}

/// One entry in the ordered classification table.
pub struct GateRule {
    /// Stable name, useful in tests and trace output.
    pub name: &'static str,
    /// Predicate over the snapshot.
    pub applies: fn(&DownloadStatusSnapshot) -> bool,
    /// State produced when the predicate fires.
    pub state: GateState,
}

/// Classification rules, evaluated top to bottom; the first match wins.
///
/// The order is load-bearing: an admin with `has_subscription == false`
/// must land in `AdminUnlimited`, not `NoSubscription`, and the server's
/// `can_download` verdict is only consulted once admin and subscription
/// have been ruled out.
pub const GATE_RULES: &[GateRule] = &[
    GateRule {
        name: "admin-override",
        applies: |s| s.is_admin,
        state: GateState::AdminUnlimited,
    },
    GateRule {
        name: "no-subscription",
        applies: |s| !s.has_subscription,
        state: GateState::NoSubscription,
    },
    GateRule {
        name: "download-denied",
        applies: |s| !s.can_download,
        state: GateState::LimitReached,
    },
    GateRule {
        name: "can-download",
        applies: |_| true,
        state: GateState::CanDownload,
    },
];

/// Map a snapshot onto a gate state via [`GATE_RULES`].
#[must_use]
pub fn classify(snapshot: &DownloadStatusSnapshot) -> GateState {
    GATE_RULES
        .iter()
        .find(|rule| (rule.applies)(snapshot))
        .map_or(GateState::CanDownload, |rule| rule.state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RemainingDownloads;

    fn snapshot(
        can_download: bool,
        is_admin: bool,
        has_subscription: bool,
        remaining: RemainingDownloads,
    ) -> DownloadStatusSnapshot {
        DownloadStatusSnapshot {
            can_download,
            is_admin,
            has_subscription,
            remaining_downloads: remaining,
            subscription: None,
            resets_at: None,
            message: None,
        }
    }

    #[test]
    fn admin_wins_over_missing_subscription() {
        // Priority-order regression test: admin with no subscription and a
        // negative server verdict must still be unlimited
        let s = snapshot(false, true, false, RemainingDownloads::Count(0));
        assert_eq!(classify(&s), GateState::AdminUnlimited);
    }

    #[test]
    fn no_subscription_before_limit() {
        let s = snapshot(false, false, false, RemainingDownloads::Count(0));
        assert_eq!(classify(&s), GateState::NoSubscription);
    }

    #[test]
    fn subscribed_but_denied_is_limit_reached() {
        let s = snapshot(false, false, true, RemainingDownloads::Count(0));
        assert_eq!(classify(&s), GateState::LimitReached);

        // The server's verdict is authoritative even with a nonzero count
        let stale = snapshot(false, false, true, RemainingDownloads::Count(2));
        assert_eq!(classify(&stale), GateState::LimitReached);
    }

    #[test]
    fn permitted_snapshot_can_download() {
        let limited = snapshot(true, false, true, RemainingDownloads::Count(5));
        assert_eq!(classify(&limited), GateState::CanDownload);

        let unlimited = snapshot(true, false, true, RemainingDownloads::Unlimited);
        assert_eq!(classify(&unlimited), GateState::CanDownload);
    }

    #[test]
    fn rule_table_order_is_fixed() {
        let names: Vec<&str> = GATE_RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            ["admin-override", "no-subscription", "download-denied", "can-download"]
        );
    }

    #[test]
    fn last_rule_is_a_catch_all() {
        let s = snapshot(true, false, true, RemainingDownloads::Count(1));
        let last = GATE_RULES.last().unwrap();
        assert!((last.applies)(&s));
    }
}
