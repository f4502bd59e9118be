//! Path resolution for client-side state.
//!
//! The only file this client owns is the session snapshot. Everything else
//! lives behind the remote API.

use std::path::PathBuf;
use thiserror::Error;

/// Errors related to path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// The platform data directory could not be determined.
    #[error("could not determine a data directory for this platform")]
    DataDirUnavailable,
}

/// Root directory for assetbay client state.
pub fn data_root() -> Result<PathBuf, PathError> {
    dirs::data_dir()
        .map(|dir| dir.join("assetbay"))
        .ok_or(PathError::DataDirUnavailable)
}

/// Location of the persisted session snapshot.
pub fn session_file_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join("session.json"))
}

/// Default directory downloaded asset archives are saved into.
pub fn default_download_dir() -> Result<PathBuf, PathError> {
    Ok(dirs::download_dir().unwrap_or(data_root()?).join("assetbay"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_file_lives_under_data_root() {
        // dirs::data_dir is unavailable on some CI platforms; skip there
        let Ok(root) = data_root() else { return };
        let session = session_file_path().unwrap();
        assert!(session.starts_with(&root));
        assert_eq!(session.file_name().unwrap(), "session.json");
    }
}
