//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Validate CLI-specific input
//!   2. Call core services through the context
//!   3. Format output for the terminal
//!
//! Handlers should NOT contain business logic or touch wire shapes.

pub mod account;
pub mod change_plan;
pub mod download;
pub mod login;
pub mod logout;
pub mod plans;
pub mod status;
pub mod subscribe;
