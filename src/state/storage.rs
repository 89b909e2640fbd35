//! File I/O for navigator state persistence
//!
//! State is stored in `~/.config/par-navigator/navigator_state.yaml`

use super::NavigatorState;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Get the path to the navigator state file
pub fn state_path() -> PathBuf {
    par_navigator_config::config_dir().join("navigator_state.yaml")
}

/// Save navigator state to a specific file
pub fn save_state_to(state: &NavigatorState, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create state directory {:?}", parent))?;
    }

    let contents =
        serde_yaml_ng::to_string(state).context("Failed to serialize navigator state")?;

    let temp_path = path.with_extension("yaml.tmp");
    std::fs::write(&temp_path, contents)
        .with_context(|| format!("Failed to write navigator state to {:?}", temp_path))?;
    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to move navigator state into {:?}", path))?;

    log::info!(
        "Saved navigator state ({} pane fragments) to {:?}",
        state.panes.len(),
        path
    );
    Ok(())
}

/// Load navigator state from a specific file
///
/// Returns `None` if the file doesn't exist or is empty.
/// Returns an error if the file exists but is corrupt.
pub fn load_state_from(path: &Path) -> Result<Option<NavigatorState>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read navigator state from {:?}", path))?;

    if contents.trim().is_empty() {
        return Ok(None);
    }

    let state: NavigatorState = serde_yaml_ng::from_str(&contents)
        .with_context(|| format!("Failed to parse navigator state from {:?}", path))?;

    log::info!(
        "Loaded navigator state ({} pane fragments) from {:?}",
        state.panes.len(),
        path
    );
    Ok(Some(state))
}

/// Remove a state file if it exists
pub fn clear_state_at(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_file(path)
            .with_context(|| format!("Failed to remove navigator state file {:?}", path))?;
    }
    Ok(())
}
