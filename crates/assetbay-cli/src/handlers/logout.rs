//! Logout command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the logout command. Clearing an absent session is fine.
pub fn execute(ctx: &CliContext) -> Result<()> {
    ctx.sessions
        .clear()
        .map_err(|e| CliError::Io(e.to_string()))?;
    println!("Signed out.");
    Ok(())
}
