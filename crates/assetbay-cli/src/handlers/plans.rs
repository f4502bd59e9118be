//! Plans command handler.
//!
//! Displays the subscription catalog with prices under the requested
//! display cycle, the yearly savings line, and the action each plan
//! represents for the current user.

use anyhow::Result;

use assetbay_core::DisplayCycle;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{format_price, print_separator, truncate_string};

/// Execute the plans command.
pub async fn execute(ctx: &CliContext, cycle: DisplayCycle, all: bool) -> Result<()> {
    let rows = ctx
        .plans()
        .plan_rows(cycle, !all)
        .await
        .map_err(CliError::from)?;

    if rows.is_empty() {
        println!("No subscription plans are available right now.");
        return Ok(());
    }

    println!("Available plans ({} billing):\n", cycle.label());
    println!(
        "{:<22} {:<12} {:<14} {:<12} {}",
        "Plan", "Price", "Downloads/day", "Action", "Features"
    );
    print_separator(90);

    for row in &rows {
        let price = format!("{}/{}", format_price(row.display_price), cycle.label());
        let action = row.action.label();
        let features = truncate_string(&row.package.features.join(", "), 32);
        let inactive = if row.package.is_active { "" } else { " (inactive)" };

        println!(
            "{:<22} {:<12} {:<14} {:<12} {}{}",
            truncate_string(&row.package.name, 21),
            price,
            row.package.daily_download_limit,
            action,
            features,
            inactive
        );

        if cycle == DisplayCycle::Yearly && row.yearly_savings > 0.0 {
            println!(
                "{:<22} save {} per year versus monthly billing",
                "",
                format_price(row.yearly_savings)
            );
        }
    }

    println!();
    println!("Use 'assetbay subscribe <plan-id>' to start a subscription.");
    Ok(())
}
