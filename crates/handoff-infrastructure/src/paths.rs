//! Path resolution for hand-off configuration and routing data.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/handoff/           # Config directory
//! └── config.toml              # HandoffSettings
//!
//! ~/.local/share/handoff/      # Data directory
//! └── routing.json             # JSON routing snapshot
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "handoff";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config/data directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for handoff_core::HandoffError {
    fn from(err: PathError) -> Self {
        handoff_core::HandoffError::config(err.to_string())
    }
}

/// Unified path management for hand-off files.
pub struct HandoffPaths;

impl HandoffPaths {
    /// Returns the configuration directory (e.g., `~/.config/handoff/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the data directory (e.g., `~/.local/share/handoff/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the default JSON routing snapshot path.
    pub fn routing_store_file() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("routing.json"))
    }
}
