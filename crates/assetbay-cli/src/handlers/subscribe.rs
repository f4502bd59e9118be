//! Subscribe command handler.
//!
//! Creates a payment checkout session for a plan and prints the checkout
//! URL for the user to open in a browser.

use anyhow::Result;

use assetbay_core::{DisplayCycle, StorefrontError};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{format_price, sign_in_hint};

/// Execute the subscribe command.
pub async fn execute(ctx: &CliContext, plan_id: &str, cycle: DisplayCycle) -> Result<()> {
    if !ctx.authenticated {
        sign_in_hint();
        return Ok(());
    }

    let plan = ctx.plans().find_plan(plan_id).await.map_err(CliError::from)?;
    let price = assetbay_core::resolve_display_price(&plan, cycle);
    println!(
        "Plan: {} at {}/{}",
        plan.name,
        format_price(price),
        cycle.label()
    );

    match ctx.port.create_checkout_session(plan_id, cycle).await {
        Ok(session) => {
            println!("Open this URL to complete the purchase:");
            println!("{}", session.url);
            Ok(())
        }
        Err(StorefrontError::AuthRequired) => {
            sign_in_hint();
            Ok(())
        }
        Err(err) => Err(CliError::from(err).into()),
    }
}
