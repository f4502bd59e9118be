//! Status command handler.
//!
//! Fetches the download-status snapshot for one asset and prints the
//! resulting gate state with the remaining count and reset time.

use anyhow::Result;

use assetbay_core::GateState;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{gate_state_label, low_remaining_warning, sign_in_hint};

/// Execute the status command.
pub async fn execute(ctx: &CliContext, asset_id: &str) -> Result<()> {
    let mut gate = ctx.gate();

    if gate.state() == GateState::Unauthenticated {
        sign_in_hint();
        return Ok(());
    }

    if let Err(err) = ctx.flow().refresh(&mut gate, asset_id).await {
        println!("Status: {}", gate_state_label(gate.state()));
        return Err(CliError::from(err).into());
    }

    println!("Asset:  {asset_id}");
    println!("Status: {}", gate_state_label(gate.state()));

    if let Some(snapshot) = gate.snapshot() {
        println!("Remaining: {}", snapshot.remaining_downloads.phrase());
        if snapshot.remaining_downloads.is_low() {
            low_remaining_warning(&snapshot.remaining_downloads.phrase());
        }
        if let Some(resets_at) = snapshot.resets_at {
            println!("Resets at: {}", resets_at.format("%Y-%m-%d %H:%M UTC"));
        }
        if let Some(sub) = &snapshot.subscription {
            println!(
                "Plan: {} (until {})",
                sub.plan_name,
                sub.end_date.format("%Y-%m-%d")
            );
        }
        if let Some(message) = &snapshot.message {
            println!("Note: {message}");
        }
    }

    Ok(())
}
