//! Session snapshot types.
//!
//! The session is the only piece of state this client caches between
//! invocations. It is always replaced as a whole object (login, logout,
//! profile refresh), never merged field-by-field, which is what keeps
//! read-modify-write races structurally impossible.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile snapshot fetched from the remote API at login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

/// The persisted session: bearer token plus the profile snapshot it was
/// fetched with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSession {
    pub token: String,
    pub profile: UserProfile,
    pub fetched_at: DateTime<Utc>,
}

impl UserSession {
    #[must_use]
    pub fn new(token: String, profile: UserProfile) -> Self {
        Self {
            token,
            profile,
            fetched_at: Utc::now(),
        }
    }
}
