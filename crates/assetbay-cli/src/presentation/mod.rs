//! Shared CLI presentation utilities.
//!
//! Format-only helpers for consistent output across commands. Domain
//! transforms belong in core services, not here.

pub mod notices;
pub mod tables;

// Re-export commonly used items
pub use notices::{
    gate_state_label, low_remaining_warning, render_storefront_error, sign_in_hint, subscribe_hint,
};
pub use tables::{format_optional, format_price, print_separator, truncate_string};
