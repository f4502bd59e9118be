//! Account command handler.
//!
//! Shows the signed-in profile and the current subscription, if any.

use anyhow::Result;

use assetbay_core::StorefrontError;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{format_optional, format_price, sign_in_hint};

/// Execute the account command.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    if !ctx.authenticated {
        sign_in_hint();
        return Ok(());
    }

    let profile = match ctx.port.profile().await {
        Ok(profile) => profile,
        Err(StorefrontError::AuthRequired) => {
            sign_in_hint();
            return Ok(());
        }
        Err(err) => return Err(CliError::from(err).into()),
    };

    println!("Email: {}", profile.email);
    println!("Name:  {}", format_optional(&profile.name, "-"));
    if profile.is_admin {
        println!("Role:  admin (unlimited downloads)");
    }

    let view = ctx
        .plans()
        .subscription_or_none()
        .await
        .map_err(CliError::from)?;
    match view.current_plan() {
        Some(plan) => {
            println!(
                "Plan:  {} ({} downloads/day)",
                plan.name, plan.daily_download_limit
            );
            println!(
                "Price: {}/{}",
                format_price(plan.base_price),
                plan.billing_cycle.label()
            );
        }
        None => {
            println!("Plan:  none");
            println!("Run 'assetbay plans' to see available subscriptions.");
        }
    }

    Ok(())
}
