#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;
mod http;
mod parsing;
mod port;
pub mod transfer;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultStorefrontClient;

// Configuration
pub use config::ApiConfig;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
