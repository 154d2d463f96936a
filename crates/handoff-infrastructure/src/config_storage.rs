//! Loading and saving `HandoffSettings` as TOML.

use std::fs;
use std::path::{Path, PathBuf};

use handoff_core::config::HandoffSettings;
use handoff_core::error::{HandoffError, Result};

use crate::paths::HandoffPaths;

/// Loads settings from the default path (`~/.config/handoff/config.toml`).
pub fn load_settings() -> Result<HandoffSettings> {
    load_settings_from(&HandoffPaths::config_file()?)
}

/// Loads settings from `path`.
///
/// # Returns
///
/// - `Ok(HandoffSettings)`: Parsed settings, or defaults if the file does not
///   exist or is empty.
/// - `Err(_)`: The file exists but cannot be read, parsed or validated.
pub fn load_settings_from(path: &Path) -> Result<HandoffSettings> {
    if !path.exists() {
        tracing::debug!("[ConfigStorage] No settings at {:?}, using defaults", path);
        return Ok(HandoffSettings::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        HandoffError::io(format!("Failed to read settings file at {:?}: {}", path, e))
    })?;

    if content.trim().is_empty() {
        return Ok(HandoffSettings::default());
    }

    HandoffSettings::from_toml_str(&content)
}

/// Writes `settings` to `path`, creating the parent directory if needed.
pub fn save_settings_to(path: &Path, settings: &HandoffSettings) -> Result<()> {
    settings.validate()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            HandoffError::io(format!("Failed to create config directory at {:?}: {}", parent, e))
        })?;
    }

    fs::write(path, settings.to_toml_string()?).map_err(|e| {
        HandoffError::io(format!("Failed to write settings file at {:?}: {}", path, e))
    })?;

    Ok(())
}

/// Resolves where the JSON routing snapshot lives for these settings.
pub fn routing_store_path(settings: &HandoffSettings) -> Result<PathBuf> {
    match &settings.store.path {
        Some(path) => Ok(path.clone()),
        None => Ok(HandoffPaths::routing_store_file()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handoff_core::config::StoreKind;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = load_settings_from(&temp_dir.path().join("config.toml")).unwrap();

        assert_eq!(settings, HandoffSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut settings = HandoffSettings::default();
        settings.store.kind = StoreKind::Memory;
        settings.fixtures.channels = vec!["webchat".to_string()];

        save_settings_to(&path, &settings).unwrap();
        let loaded = load_settings_from(&path).unwrap();

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_invalid_toml_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[store\nkind = ").unwrap();

        let err = load_settings_from(&path).unwrap_err();
        assert!(matches!(err, HandoffError::Serialization { .. }));
    }

    #[test]
    fn test_explicit_store_path_wins() {
        let mut settings = HandoffSettings::default();
        settings.store.path = Some(PathBuf::from("/srv/handoff/routing.json"));

        assert_eq!(
            routing_store_path(&settings).unwrap(),
            PathBuf::from("/srv/handoff/routing.json")
        );
    }
}
