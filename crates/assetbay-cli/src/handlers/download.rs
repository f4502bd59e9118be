//! Download command handler.
//!
//! The full gated flow: pre-check fetch, confirmation prompt, download
//! issuance, archive transfer with a progress bar, and the refreshed
//! remaining count afterwards.

use std::path::PathBuf;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use assetbay_api::transfer;
use assetbay_core::{ConfirmOutcome, GateState, RequestOutcome, StorefrontError};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{
    format_price, gate_state_label, low_remaining_warning, render_storefront_error, sign_in_hint,
    subscribe_hint,
};
use crate::utils::prompt_confirmation;

/// Execute the download command.
pub async fn execute(
    ctx: &CliContext,
    asset_id: &str,
    yes: bool,
    out: Option<PathBuf>,
    url_only: bool,
) -> Result<()> {
    let flow = ctx.flow();
    let mut gate = ctx.gate();

    let prompt = match flow.request(&mut gate, asset_id).await {
        RequestOutcome::Prompt(prompt) => prompt,
        RequestOutcome::Refused { state, message } => {
            return refuse(state, message.as_deref());
        }
    };

    match &prompt.asset.category {
        Some(category) => println!("Asset: {} ({category})", prompt.asset.name),
        None => println!("Asset: {}", prompt.asset.name),
    }
    if let Some(price) = prompt.asset.price {
        println!("Price: {}", format_price(price));
    }
    println!("You have {}.", prompt.remaining_phrase);
    if prompt.low_remaining {
        low_remaining_warning(&prompt.remaining_phrase);
    }

    if !yes && !prompt_confirmation("Download this asset?")? {
        println!("Cancelled.");
        return Ok(());
    }

    match flow.confirm(&mut gate, asset_id).await {
        ConfirmOutcome::Busy => {
            println!("A download is already in progress for this asset.");
            Ok(())
        }
        ConfirmOutcome::NotPermitted { state } => refuse(state, None),
        ConfirmOutcome::Completed { receipt, state: _ } => {
            if let Some(message) = &receipt.message {
                println!("{message}");
            }

            if url_only {
                println!("{}", receipt.download_url);
            } else {
                let dest = out.unwrap_or_else(|| ctx.config.download_dir.clone());
                let bar = progress_bar();
                let saved = transfer::save_to_file(&receipt, &dest, &|done, total| {
                    if let Some(total) = total {
                        bar.set_length(total);
                    }
                    bar.set_position(done);
                })
                .await
                .map_err(CliError::from)?;
                bar.finish_and_clear();
                println!("Saved to {}", saved.display());
            }

            // Refreshed count from the mandatory post-download fetch
            if let Some(snapshot) = gate.snapshot() {
                println!("You now have {}.", snapshot.remaining_downloads.phrase());
            }
            Ok(())
        }
        ConfirmOutcome::Rejected { error, state } => {
            println!("Status is now: {}", gate_state_label(state));
            if error.is_entitlement_family() || matches!(error, StorefrontError::AuthRequired) {
                render_storefront_error(&error);
                Ok(())
            } else {
                Err(CliError::from(error).into())
            }
        }
    }
}

fn refuse(state: GateState, message: Option<&str>) -> Result<()> {
    match state {
        GateState::Unauthenticated => sign_in_hint(),
        GateState::NoSubscription => subscribe_hint(),
        GateState::LimitReached => {
            println!("Daily download limit reached.");
            if let Some(message) = message {
                println!("{message}");
            }
        }
        _ => {
            println!("Download unavailable: {}", gate_state_label(state));
            if let Some(message) = message {
                println!("{message}");
            }
        }
    }
    Ok(())
}

fn progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template(
            "{bar:40.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}
