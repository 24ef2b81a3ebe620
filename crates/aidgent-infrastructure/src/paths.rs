//! Path resolution for aidgent's local state.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/aidgent/           # Config directory
//! └── config.toml              # Client configuration (API base URL)
//!
//! ~/.local/share/aidgent/      # Data directory
//! └── sessions.json            # Local session index (single JSON entry)
//! ```

use std::path::PathBuf;

/// File name of the single persisted session index entry.
pub const SESSION_INDEX_FILE: &str = "sessions.json";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config/data directory could not be determined.
    BaseDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::BaseDirNotFound => write!(f, "Cannot find platform base directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for aidgent.
pub struct AidgentPaths;

impl AidgentPaths {
    /// Returns the aidgent configuration directory.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("aidgent"))
            .ok_or(PathError::BaseDirNotFound)
    }

    /// Returns the aidgent data directory.
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join("aidgent"))
            .ok_or(PathError::BaseDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted session index.
    pub fn session_index_file() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join(SESSION_INDEX_FILE))
    }
}
