//! Change-plan command handler.
//!
//! Classifies what switching to the target plan means (upgrade, downgrade,
//! lateral switch), confirms, then applies the change.

use anyhow::Result;

use assetbay_core::{PlanAction, StorefrontError};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::sign_in_hint;
use crate::utils::prompt_confirmation;

/// Execute the change-plan command.
pub async fn execute(ctx: &CliContext, plan_id: &str, yes: bool) -> Result<()> {
    if !ctx.authenticated {
        sign_in_hint();
        return Ok(());
    }

    let (plan, action) = ctx
        .plans()
        .classify_change(plan_id)
        .await
        .map_err(CliError::from)?;

    match action {
        PlanAction::Current => {
            println!("'{}' is already your current plan.", plan.name);
            return Ok(());
        }
        PlanAction::Subscribe => {
            println!(
                "You have no active subscription. Run 'assetbay subscribe {plan_id}' instead."
            );
            return Ok(());
        }
        PlanAction::Upgrade | PlanAction::Downgrade | PlanAction::Switch => {}
    }

    let question = format!("{} to '{}'?", capitalized(action.label()), plan.name);
    if !yes && !prompt_confirmation(&question)? {
        println!("Cancelled.");
        return Ok(());
    }

    match ctx.port.change_subscription(plan_id).await {
        Ok(receipt) => {
            println!("{}", receipt.message);
            let view = ctx
                .plans()
                .subscription_or_none()
                .await
                .map_err(CliError::from)?;
            if let Some(current) = view.current_plan() {
                println!("Current plan is now '{}'.", current.name);
            }
            Ok(())
        }
        Err(StorefrontError::AuthRequired) => {
            sign_in_hint();
            Ok(())
        }
        Err(err) => Err(CliError::from(err).into()),
    }
}

fn capitalized(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
