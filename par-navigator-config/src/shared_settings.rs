//! Global shared-settings store.
//!
//! Every option write in any project is mirrored here, so the last choice a
//! user made follows them into other projects. Stored in
//! `~/.config/par-navigator/shared_settings.yaml`.

use crate::defaults;
use crate::error::ConfigError;
use crate::view_options::ViewOptions;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application-wide navigator settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SharedSettings {
    /// Toggle values mirrored from the last project that changed them.
    #[serde(flatten)]
    pub view: ViewOptions,
    /// Open sources selected in a pane in a reusable preview tab.
    #[serde(default = "defaults::bool_false")]
    pub open_in_preview_tab: bool,
}

impl SharedSettings {
    /// Default location of the shared settings file.
    pub fn settings_path() -> PathBuf {
        crate::config_dir().join("shared_settings.yaml")
    }

    /// Load shared settings from `path`.
    ///
    /// Returns defaults when the file is missing or empty, an error when it
    /// exists but cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings: SharedSettings =
            serde_yaml_ng::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!("Loaded shared navigator settings from {:?}", path);
        Ok(settings)
    }

    /// Save shared settings to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;

        // Atomic save: write to temp file then rename
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(|source| ConfigError::Io {
            path: temp_path.clone(),
            source,
        })?;
        fs::rename(&temp_path, path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp = tempdir().unwrap();
        let settings = SharedSettings::load_from(&temp.path().join("missing.yaml")).unwrap();
        assert_eq!(settings, SharedSettings::default());
    }

    #[test]
    fn test_load_corrupt_file_is_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("shared.yaml");
        fs::write(&path, "not: valid: yaml: [[[").unwrap();
        let err = SharedSettings::load_from(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("shared.yaml");

        let mut settings = SharedSettings::default();
        settings.view.sort_by_type = true;
        settings.open_in_preview_tab = true;
        settings.save_to(&path).unwrap();

        let loaded = SharedSettings::load_from(&path).unwrap();
        assert!(loaded.view.sort_by_type);
        assert!(loaded.open_in_preview_tab);
        assert!(!path.with_extension("yaml.tmp").exists());
    }
}
