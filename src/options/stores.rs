//! The three places a toggle write lands.

use super::{OptionKind, OptionSlot};
use par_navigator_config::{SharedSettings, ViewOptions};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

/// Live project state, the template for new projects, and the global shared
/// settings. Clones share the same stores.
///
/// When the shared store is backed by a file, every write that changes it is
/// saved there right away.
#[derive(Clone, Default)]
pub struct OptionStores {
    pub project: Arc<RwLock<ViewOptions>>,
    pub defaults: Arc<RwLock<ViewOptions>>,
    pub shared: Arc<RwLock<SharedSettings>>,
    shared_path: Option<Arc<PathBuf>>,
}

static PROCESS_DEFAULTS: OnceLock<Arc<RwLock<ViewOptions>>> = OnceLock::new();
static PROCESS_SHARED: OnceLock<Arc<RwLock<SharedSettings>>> = OnceLock::new();

/// Shared settings from `path`, or defaults when the file is unreadable.
fn load_shared_or_default(path: &Path) -> SharedSettings {
    match SharedSettings::load_from(path) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Using default shared navigator settings: {:#}", e);
            SharedSettings::default()
        }
    }
}

impl OptionStores {
    /// A fresh project store seeded from the process-wide template. The
    /// template and the shared store are process-wide; the shared store is
    /// read from [`SharedSettings::settings_path`] the first time.
    pub fn process_defaults() -> Self {
        let path = SharedSettings::settings_path();
        let defaults = PROCESS_DEFAULTS
            .get_or_init(|| Arc::new(RwLock::new(ViewOptions::default())))
            .clone();
        let shared = PROCESS_SHARED
            .get_or_init(|| Arc::new(RwLock::new(load_shared_or_default(&path))))
            .clone();
        let project = Arc::new(RwLock::new(*defaults.read()));
        Self {
            project,
            defaults,
            shared,
            shared_path: Some(Arc::new(path)),
        }
    }

    /// Private stores whose shared part is loaded from and saved to `path`.
    pub fn with_shared_file(path: &Path) -> Self {
        Self {
            shared: Arc::new(RwLock::new(load_shared_or_default(path))),
            shared_path: Some(Arc::new(path.to_path_buf())),
            ..Self::default()
        }
    }

    /// Stores nobody else sees, kept in memory only. For tests and embedded
    /// use.
    pub fn isolated() -> Self {
        Self::default()
    }

    /// File backing the shared store, if any.
    pub fn shared_path(&self) -> Option<&Path> {
        self.shared_path.as_deref().map(PathBuf::as_path)
    }

    pub fn is_selected(&self, kind: OptionKind) -> bool {
        kind.spec().read(&self.project.read(), &self.shared.read())
    }

    /// Write through to every store. Returns true when the value read back by
    /// [`is_selected`](Self::is_selected) changed.
    pub fn write(&self, kind: OptionKind, value: bool) -> bool {
        let (changed, shared_changed) = match kind.spec().slot {
            OptionSlot::View { get, set } => {
                let changed = {
                    let mut project = self.project.write();
                    let changed = get(&project) != value;
                    set(&mut project, value);
                    changed
                };
                set(&mut self.defaults.write(), value);
                let shared_changed = {
                    let mut shared = self.shared.write();
                    let shared_changed = get(&shared.view) != value;
                    set(&mut shared.view, value);
                    shared_changed
                };
                (changed, shared_changed)
            }
            OptionSlot::PreviewTab => {
                let mut shared = self.shared.write();
                let changed = shared.open_in_preview_tab != value;
                shared.open_in_preview_tab = value;
                (changed, changed)
            }
        };
        if shared_changed && let Err(e) = self.persist_shared() {
            log::warn!("Failed to save shared navigator settings: {:#}", e);
        }
        changed
    }

    /// Save the shared store to its file. A no-op for in-memory stores.
    pub fn persist_shared(&self) -> anyhow::Result<()> {
        let Some(path) = self.shared_path() else {
            return Ok(());
        };
        let settings = *self.shared.read();
        settings.save_to(path)?;
        crate::debug_log!("OPTIONS", "saved shared settings to {:?}", path);
        Ok(())
    }

    pub fn project_snapshot(&self) -> ViewOptions {
        *self.project.read()
    }

    pub fn replace_project(&self, options: ViewOptions) {
        *self.project.write() = options;
    }

    /// Adopt freshly loaded shared settings.
    pub fn replace_shared(&self, settings: SharedSettings) {
        *self.shared.write() = settings;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_goes_to_all_stores() {
        let stores = OptionStores::isolated();
        assert!(stores.write(OptionKind::SortByType, true));
        assert!(stores.project.read().sort_by_type);
        assert!(stores.defaults.read().sort_by_type);
        assert!(stores.shared.read().view.sort_by_type);
        assert!(stores.is_selected(OptionKind::SortByType));
    }

    #[test]
    fn test_write_same_value_reports_unchanged() {
        let stores = OptionStores::isolated();
        assert!(!stores.write(OptionKind::ShowModules, true));
        assert!(stores.write(OptionKind::ShowModules, false));
    }

    #[test]
    fn test_preview_tab_lives_in_shared_store() {
        let stores = OptionStores::isolated();
        assert!(stores.write(OptionKind::OpenInPreviewTab, true));
        assert!(stores.shared.read().open_in_preview_tab);
        assert!(stores.is_selected(OptionKind::OpenInPreviewTab));
    }

    #[test]
    fn test_shared_writes_are_saved_to_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("shared_settings.yaml");
        let stores = OptionStores::with_shared_file(&path);
        assert!(!path.exists());

        stores.write(OptionKind::SortByType, true);
        stores.write(OptionKind::OpenInPreviewTab, true);

        let saved = SharedSettings::load_from(&path).unwrap();
        assert!(saved.view.sort_by_type);
        assert!(saved.open_in_preview_tab);
    }

    #[test]
    fn test_shared_file_is_read_on_creation() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("shared_settings.yaml");
        std::fs::write(&path, "open_in_preview_tab: true\nmanual_order: true\n").unwrap();

        let stores = OptionStores::with_shared_file(&path);
        assert!(stores.is_selected(OptionKind::OpenInPreviewTab));
        assert!(stores.shared.read().view.manual_order);
        // The project store starts from its own defaults
        assert!(!stores.is_selected(OptionKind::ManualOrder));
    }

    #[test]
    fn test_corrupt_shared_file_falls_back_to_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("shared_settings.yaml");
        std::fs::write(&path, "open_in_preview_tab: [[[").unwrap();

        let stores = OptionStores::with_shared_file(&path);
        assert_eq!(*stores.shared.read(), SharedSettings::default());
    }

    #[test]
    fn test_isolated_stores_are_not_persisted() {
        let stores = OptionStores::isolated();
        assert!(stores.shared_path().is_none());
        assert!(stores.persist_shared().is_ok());
    }

    #[test]
    fn test_isolated_stores_do_not_leak() {
        let a = OptionStores::isolated();
        let b = OptionStores::isolated();
        a.write(OptionKind::ManualOrder, true);
        assert!(!b.is_selected(OptionKind::ManualOrder));
    }
}
