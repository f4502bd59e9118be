//! Login command handler.
//!
//! Validates a token against the profile endpoint and stores the
//! resulting session snapshot, replacing any previous one wholesale.

use anyhow::Result;

use assetbay_api::DefaultStorefrontClient;
// StorefrontPort stays in scope: `profile()` is called on the concrete
// client here, not on a trait object.
use assetbay_core::{StorefrontPort, UserSession};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::utils::prompt_string;

/// Execute the login command.
pub async fn execute(ctx: &CliContext, token: Option<String>) -> Result<()> {
    let token = match token {
        Some(token) => token,
        None => prompt_string("Paste your API token")?,
    };
    if token.trim().is_empty() {
        return Err(CliError::Arguments("token must not be empty".to_string()).into());
    }
    let token = token.trim().to_string();

    // A fresh client carrying the candidate token; the bootstrapped one may
    // hold a different (or no) token.
    let api = ctx.config.api.clone().with_token(Some(token.clone()));
    let client = DefaultStorefrontClient::new(&api).map_err(CliError::from)?;

    let profile = client.profile().await.map_err(CliError::from)?;

    let session = UserSession::new(token, profile.clone());
    ctx.sessions
        .replace(&session)
        .map_err(|e| CliError::Io(e.to_string()))?;

    println!("Signed in as {}.", profile.email);
    Ok(())
}
