//! Session store port.

use thiserror::Error;

use crate::domain::UserSession;

/// Errors from session store operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The backing storage could not be read or written.
    #[error("session storage error: {message}")]
    Storage {
        /// What failed.
        message: String,
    },

    /// The stored session could not be decoded.
    #[error("corrupt session data: {message}")]
    Corrupt {
        /// What was wrong with it.
        message: String,
    },
}

/// Port for the cached session snapshot.
///
/// # Contract
///
/// The session is replaced wholesale: `replace` writes a complete new
/// snapshot and `clear` removes it. There is deliberately no partial-update
/// operation, so concurrent readers can never observe a half-written merge.
pub trait SessionStore: Send + Sync {
    /// Load the current session, if one is stored.
    fn load(&self) -> Result<Option<UserSession>, SessionError>;

    /// Replace the stored session with a new snapshot.
    fn replace(&self, session: &UserSession) -> Result<(), SessionError>;

    /// Remove the stored session.
    fn clear(&self) -> Result<(), SessionError>;
}
