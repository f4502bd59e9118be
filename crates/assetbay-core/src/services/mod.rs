//! Orchestration services over the storefront port.
//!
//! Services own the multi-step flows (pre-check, confirm, resynchronize)
//! so adapters stay thin: a handler wires user interaction to a service
//! call and renders the outcome.

mod download_flow;
mod plan_service;

pub use download_flow::{ConfirmOutcome, DownloadFlow, DownloadPrompt, RequestOutcome};
pub use plan_service::{PlanRow, PlanService};
