//! The trait every navigator pane implements.

use super::fragment::PaneFragment;
use super::types::{PaneCapabilities, SourceElement, SourceFile};
use crate::error::PaneStateError;

/// A pluggable structural view (project structure, file system, scopes, ...).
///
/// Implementations are shared between the actor thread and plugin-load
/// callbacks, so they must be `Send + Sync`; mutable bits such as the current
/// sub-id use interior mutability.
pub trait NavigatorPane: Send + Sync {
    /// Unique among live panes.
    fn id(&self) -> &str;

    /// Ordering key. Two distinct live panes with equal weight is a
    /// configuration bug.
    fn weight(&self) -> i32;

    fn title(&self) -> String;

    /// Variant views owned by this pane, in display order.
    fn sub_ids(&self) -> Vec<String> {
        Vec::new()
    }

    fn presentable_sub_id_name(&self, sub_id: &str) -> String {
        sub_id.to_string()
    }

    fn capabilities(&self) -> PaneCapabilities {
        PaneCapabilities::default()
    }

    /// Added to the view as soon as it is contributed.
    fn is_initially_visible(&self) -> bool {
        true
    }

    /// Claims the default view when nothing was saved.
    fn is_default_pane(&self) -> bool {
        false
    }

    /// Currently selected sub-view.
    fn sub_id(&self) -> Option<String>;

    fn set_sub_id(&self, sub_id: Option<&str>);

    /// Select the node for `element`, optionally moving focus into the pane.
    fn select(&self, element: &SourceElement, file: Option<&SourceFile>, request_focus: bool);

    fn selected_elements(&self) -> Vec<SourceElement>;

    /// Opaque state to persist; `Ok(None)` when there is nothing to save.
    fn save_state(&self) -> Result<Option<PaneFragment>, PaneStateError>;

    fn load_state(&self, fragment: &PaneFragment) -> Result<(), PaneStateError>;

    /// Whether the pane's tree currently owns keyboard focus.
    fn has_focus(&self) -> bool {
        false
    }

    /// Whether `file` can be shown in the given sub-view.
    fn is_sub_id_selectable(&self, _sub_id: &str, _file: &SourceFile) -> bool {
        true
    }

    /// Whether selecting a node for `file` should open it in an editor.
    fn is_auto_scroll_enabled_for(&self, _file: &SourceFile) -> bool {
        true
    }

    fn save_expanded_paths(&self) {}

    fn restore_expanded_paths(&self) {}

    /// Rebuild the tree; `with_comparator` when the node order changed.
    fn update_from_root(&self, _with_comparator: bool) {}

    /// Release resources; called once when the pane leaves the registry.
    fn dispose(&self) {}
}
