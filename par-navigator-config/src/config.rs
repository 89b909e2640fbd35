//! Navigator configuration: timing, environment capabilities, default view.

use crate::defaults;
use crate::error::ConfigError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment-wide predicates consulted by some options in addition to the
/// capabilities each pane declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentCapabilities {
    /// The directory model can present packages flattened.
    #[serde(default = "defaults::bool_true")]
    pub supports_flatten_packages: bool,
    /// The directory model can hide or compact empty middle packages.
    #[serde(default = "defaults::bool_true")]
    pub supports_hide_empty_middle_packages: bool,
    /// Member nodes (functions, fields) can be shown under files.
    #[serde(default = "defaults::bool_true")]
    pub show_members_supported: bool,
    /// Visibility icons are meaningful for the languages in use.
    #[serde(default = "defaults::bool_true")]
    pub show_visibility_icons_applicable: bool,
}

impl Default for EnvironmentCapabilities {
    fn default() -> Self {
        Self {
            supports_flatten_packages: true,
            supports_hide_empty_middle_packages: true,
            show_members_supported: true,
            show_visibility_icons_applicable: true,
        }
    }
}

/// Top-level navigator configuration (`~/.config/par-navigator/config.yaml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigatorConfig {
    /// Debounce window for scroll-from-source requests.
    #[serde(default = "defaults::autoscroll_from_source_delay_ms")]
    pub autoscroll_from_source_delay_ms: u64,

    /// Debounce window for opening the source of a pane selection.
    #[serde(default = "defaults::autoscroll_to_source_delay_ms")]
    pub autoscroll_to_source_delay_ms: u64,

    /// Request a scroll-from-source when an editor regains focus.
    #[serde(default = "defaults::bool_true")]
    pub autoscroll_on_focus_gained: bool,

    /// Pane selected when nothing was saved and no pane claims the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_view_id: Option<String>,

    /// Debounce applied to shared settings file change events.
    #[serde(default = "defaults::settings_watch_debounce_ms")]
    pub settings_watch_debounce_ms: u64,

    #[serde(default)]
    pub environment: EnvironmentCapabilities,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            autoscroll_from_source_delay_ms: defaults::autoscroll_from_source_delay_ms(),
            autoscroll_to_source_delay_ms: defaults::autoscroll_to_source_delay_ms(),
            autoscroll_on_focus_gained: true,
            default_view_id: None,
            settings_watch_debounce_ms: defaults::settings_watch_debounce_ms(),
            environment: EnvironmentCapabilities::default(),
        }
    }
}

impl NavigatorConfig {
    /// Default config file location.
    pub fn config_path() -> PathBuf {
        crate::config_dir().join("config.yaml")
    }

    /// Load configuration from the default location, creating it when missing.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            if let Err(e) = config.save_to(&config_path) {
                log::error!("Failed to save default config: {}", e);
                return Err(e);
            }
            Ok(config)
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: NavigatorConfig =
            serde_yaml_ng::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific file (atomic write).
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;
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

    /// Reject values that would make the navigator misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(id) = &self.default_view_id
            && id.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "default_view_id must not be blank".to_string(),
            ));
        }
        Ok(())
    }

    pub fn autoscroll_from_source_delay(&self) -> Duration {
        Duration::from_millis(self.autoscroll_from_source_delay_ms)
    }

    pub fn autoscroll_to_source_delay(&self) -> Duration {
        Duration::from_millis(self.autoscroll_to_source_delay_ms)
    }
}
