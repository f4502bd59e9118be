//! Main commands enum and subcommand arguments.

use std::path::PathBuf;

use clap::Subcommand;

use assetbay_core::DisplayCycle;

/// Available commands for the assetbay marketplace client.
#[derive(Subcommand)]
pub enum Commands {
    /// List subscription plans with prices under a display cycle
    Plans {
        /// Billing cycle to display prices under (monthly or yearly)
        #[arg(long, default_value = "monthly")]
        cycle: DisplayCycle,
        /// Include inactive plans
        #[arg(long)]
        all: bool,
    },

    /// Show the download entitlement status for an asset
    Status {
        /// Asset identifier
        asset_id: String,
    },

    /// Download an asset (subscription-gated)
    Download {
        /// Asset identifier
        asset_id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
        /// Directory to save the archive into
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print the issued download URL instead of saving the file
        #[arg(long)]
        url_only: bool,
    },

    /// Create a checkout session for a plan
    Subscribe {
        /// Plan identifier
        plan_id: String,
        /// Billing cycle to subscribe under
        #[arg(long, default_value = "monthly")]
        cycle: DisplayCycle,
    },

    /// Change the current subscription to a different plan
    ChangePlan {
        /// Plan identifier to switch to
        plan_id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the signed-in profile and current subscription
    Account,

    /// Sign in and store the session snapshot
    Login {
        /// API token; prompted for when omitted
        #[arg(long)]
        token: Option<String>,
    },

    /// Clear the stored session snapshot
    Logout,
}
