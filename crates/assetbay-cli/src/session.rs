//! File-backed session store.
//!
//! Persists the session snapshot as a single JSON file. Writes go through a
//! temp file plus rename so the stored object is always either the old
//! snapshot or the new one, never a partial write - the file-level analogue
//! of the replace-wholesale contract.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use assetbay_core::paths::session_file_path;
use assetbay_core::{SessionError, SessionStore, UserSession};

/// Session store writing to a single JSON file.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store backed by an explicit path. Used directly by tests.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the platform default location.
    pub fn at_default_path() -> Result<Self, SessionError> {
        let path = session_file_path().map_err(|e| SessionError::Storage {
            message: e.to_string(),
        })?;
        Ok(Self::new(path))
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<UserSession>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| SessionError::Storage {
            message: format!("failed to read {}: {e}", self.path.display()),
        })?;
        let session = serde_json::from_str(&raw).map_err(|e| SessionError::Corrupt {
            message: e.to_string(),
        })?;
        Ok(Some(session))
    }

    fn replace(&self, session: &UserSession) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| SessionError::Storage {
                message: format!("failed to create {}: {e}", parent.display()),
            })?;
        }

        let raw = serde_json::to_string_pretty(session).map_err(|e| SessionError::Corrupt {
            message: e.to_string(),
        })?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, raw).map_err(|e| SessionError::Storage {
            message: format!("failed to write {}: {e}", tmp_path.display()),
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|e| SessionError::Storage {
            message: format!("failed to replace {}: {e}", self.path.display()),
        })?;

        debug!(path = %self.path.display(), "session snapshot replaced");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Storage {
                message: format!("failed to remove {}: {e}", self.path.display()),
            }),
        }
    }
}
