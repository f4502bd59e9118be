//! Port traits and core-owned DTOs.
//!
//! The core defines the interfaces it needs; adapters implement them.
//! `StorefrontPort` is implemented by the REST client in `assetbay-api`,
//! `SessionStore` by the file-backed store in `assetbay-cli`.

mod error;
mod session;
mod storefront;

pub use error::{DenialKind, StorefrontError, StorefrontResult};
pub use session::{SessionError, SessionStore};
pub use storefront::{
    AssetSummary, ChangePlanReceipt, CheckoutSession, DownloadReceipt, StorefrontPort,
};
