//! Configuration system for the par-navigator pane controller.
//!
//! This crate is pure data: it knows nothing about panes or editors. It
//! provides:
//!
//! - [`NavigatorConfig`]: timing, environment capabilities and the default view
//! - [`ViewOptions`]: the per-project toggle state shared by all panes
//! - [`SharedSettings`]: the global store every toggle write is mirrored into
//! - Shared settings file watching (feature `watcher`)

pub mod config;
pub mod defaults;
pub mod error;
pub mod shared_settings;
pub mod view_options;
#[cfg(feature = "watcher")]
pub mod watcher;

pub use config::{EnvironmentCapabilities, NavigatorConfig};
pub use error::ConfigError;
pub use shared_settings::SharedSettings;
pub use view_options::ViewOptions;
#[cfg(feature = "watcher")]
pub use watcher::{SettingsReloadEvent, SettingsWatcher};

/// Directory holding every par-navigator file (`~/.config/par-navigator`).
pub fn config_dir() -> std::path::PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("par-navigator")
}
