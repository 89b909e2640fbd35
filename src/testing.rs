//! In-memory panes, feeds and editors for tests and demos.
//!
//! Each fixture is built with a small builder, then turned into a handle.
//! Call `probe()` before `handle()` to keep a view of what the navigator did
//! to it.

use crate::error::PaneStateError;
use crate::pane::{
    NavigatorPane, PaneCapabilities, PaneFragment, PaneHandle, SourceElement, SourceFile,
};
use crate::registry::{FeedSink, PaneFeed};
use crate::sync::{EditorHandle, EditorHost, EditorId, ElementLookup, SourceEditor};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

// ============================================================================
// Panes
// ============================================================================

/// What happened to a [`RecordingPane`].
#[derive(Default)]
pub struct PaneProbe {
    sub_id: Mutex<Option<String>>,
    selections: Mutex<Vec<(SourceElement, bool)>>,
    selected: Mutex<Vec<SourceElement>>,
    loaded: Mutex<Vec<PaneFragment>>,
    saved: Mutex<Option<PaneFragment>>,
    refreshes: Mutex<Vec<bool>>,
    fail_save: AtomicBool,
    reject_load: AtomicBool,
    focused: AtomicBool,
    disposed: AtomicBool,
    expanded_saves: AtomicUsize,
    expanded_restores: AtomicUsize,
}

impl PaneProbe {
    /// `(element, request_focus)` for every select routed to the pane.
    pub fn selections(&self) -> Vec<(SourceElement, bool)> {
        self.selections.lock().clone()
    }

    pub fn selection_count(&self) -> usize {
        self.selections.lock().len()
    }

    pub fn set_selected_elements(&self, elements: Vec<SourceElement>) {
        *self.selected.lock() = elements;
    }

    pub fn loaded_states(&self) -> Vec<PaneFragment> {
        self.loaded.lock().clone()
    }

    pub fn set_saved_state(&self, fragment: Option<PaneFragment>) {
        *self.saved.lock() = fragment;
    }

    /// `with_comparator` for every `update_from_root`.
    pub fn refreshes(&self) -> Vec<bool> {
        self.refreshes.lock().clone()
    }

    pub fn fail_save(&self) {
        self.fail_save.store(true, Ordering::SeqCst);
    }

    pub fn reject_load(&self) {
        self.reject_load.store(true, Ordering::SeqCst);
    }

    pub fn set_focus(&self, focused: bool) {
        self.focused.store(focused, Ordering::SeqCst);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    pub fn sub_id(&self) -> Option<String> {
        self.sub_id.lock().clone()
    }

    pub fn expanded_saves(&self) -> usize {
        self.expanded_saves.load(Ordering::SeqCst)
    }

    pub fn expanded_restores(&self) -> usize {
        self.expanded_restores.load(Ordering::SeqCst)
    }
}

/// A pane that records every call.
pub struct RecordingPane {
    id: String,
    weight: i32,
    title: String,
    sub_ids: Vec<String>,
    capabilities: PaneCapabilities,
    initially_visible: bool,
    default_pane: bool,
    probe: Arc<PaneProbe>,
}

impl RecordingPane {
    pub fn new(id: &str, weight: i32) -> Self {
        Self {
            id: id.to_string(),
            weight,
            title: id.to_string(),
            sub_ids: Vec::new(),
            capabilities: PaneCapabilities::all(),
            initially_visible: true,
            default_pane: false,
            probe: Arc::new(PaneProbe::default()),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_sub_ids(mut self, sub_ids: &[&str]) -> Self {
        self.sub_ids = sub_ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_capabilities(mut self, capabilities: PaneCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Not added to the view until someone registers it explicitly.
    pub fn hidden(mut self) -> Self {
        self.initially_visible = false;
        self
    }

    pub fn default_pane(mut self) -> Self {
        self.default_pane = true;
        self
    }

    pub fn probe(&self) -> Arc<PaneProbe> {
        self.probe.clone()
    }

    pub fn handle(self) -> PaneHandle {
        Arc::new(self)
    }
}

impl NavigatorPane for RecordingPane {
    fn id(&self) -> &str {
        &self.id
    }

    fn weight(&self) -> i32 {
        self.weight
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn sub_ids(&self) -> Vec<String> {
        self.sub_ids.clone()
    }

    fn capabilities(&self) -> PaneCapabilities {
        self.capabilities
    }

    fn is_initially_visible(&self) -> bool {
        self.initially_visible
    }

    fn is_default_pane(&self) -> bool {
        self.default_pane
    }

    fn sub_id(&self) -> Option<String> {
        self.probe.sub_id.lock().clone()
    }

    fn set_sub_id(&self, sub_id: Option<&str>) {
        *self.probe.sub_id.lock() = sub_id.map(str::to_string);
    }

    fn select(&self, element: &SourceElement, _file: Option<&SourceFile>, request_focus: bool) {
        self.probe
            .selections
            .lock()
            .push((element.clone(), request_focus));
        *self.probe.selected.lock() = vec![element.clone()];
    }

    fn selected_elements(&self) -> Vec<SourceElement> {
        self.probe.selected.lock().clone()
    }

    fn save_state(&self) -> Result<Option<PaneFragment>, PaneStateError> {
        if self.probe.fail_save.load(Ordering::SeqCst) {
            return Err(PaneStateError::Serialize {
                pane_id: self.id.clone(),
                reason: "scripted failure".to_string(),
            });
        }
        Ok(self.probe.saved.lock().clone())
    }

    fn load_state(&self, fragment: &PaneFragment) -> Result<(), PaneStateError> {
        if self.probe.reject_load.load(Ordering::SeqCst) {
            return Err(PaneStateError::Malformed {
                pane_id: self.id.clone(),
                reason: "scripted rejection".to_string(),
            });
        }
        self.probe.loaded.lock().push(fragment.clone());
        *self.probe.saved.lock() = Some(fragment.clone());
        Ok(())
    }

    fn has_focus(&self) -> bool {
        self.probe.focused.load(Ordering::SeqCst)
    }

    fn save_expanded_paths(&self) {
        self.probe.expanded_saves.fetch_add(1, Ordering::SeqCst);
    }

    fn restore_expanded_paths(&self) {
        self.probe.expanded_restores.fetch_add(1, Ordering::SeqCst);
    }

    fn update_from_root(&self, with_comparator: bool) {
        self.probe.refreshes.lock().push(with_comparator);
    }

    fn dispose(&self) {
        self.probe.disposed.store(true, Ordering::SeqCst);
    }
}

// ============================================================================
// Feed
// ============================================================================

/// A feed whose contents the test controls.
#[derive(Default)]
pub struct StaticFeed {
    panes: Mutex<Vec<PaneHandle>>,
    sink: Mutex<Option<FeedSink>>,
}

impl StaticFeed {
    pub fn new(panes: Vec<PaneHandle>) -> Self {
        Self {
            panes: Mutex::new(panes),
            sink: Mutex::new(None),
        }
    }

    /// Contribute a pane and notify the subscriber.
    pub fn add(&self, pane: PaneHandle) {
        self.panes.lock().push(pane.clone());
        if let Some(sink) = self.sink.lock().as_ref() {
            sink.pane_added(pane);
        }
    }

    /// Withdraw every pane with `pane_id` and notify the subscriber.
    pub fn remove(&self, pane_id: &str) {
        let removed: Vec<PaneHandle> = {
            let mut panes = self.panes.lock();
            let (gone, kept): (Vec<_>, Vec<_>) =
                panes.drain(..).partition(|p| p.id() == pane_id);
            *panes = kept;
            gone
        };
        if let Some(sink) = self.sink.lock().as_ref() {
            for pane in removed {
                sink.pane_removed(pane);
            }
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.sink.lock().is_some()
    }
}

impl PaneFeed for StaticFeed {
    fn panes(&self) -> Vec<PaneHandle> {
        self.panes.lock().clone()
    }

    fn subscribe(&self, sink: FeedSink) {
        *self.sink.lock() = Some(sink);
    }
}

// ============================================================================
// Editors
// ============================================================================

/// Live controls for a [`ScriptedEditor`].
#[derive(Default)]
pub struct EditorProbe {
    caret: AtomicUsize,
    disposed: AtomicBool,
    lookups: AtomicUsize,
}

impl EditorProbe {
    pub fn set_caret(&self, offset: usize) {
        self.caret.store(offset, Ordering::SeqCst);
    }

    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }

    /// How many `element_at` calls were made.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

/// An editor whose element lookup resolves after a configurable delay to a
/// node labelled with the offset.
pub struct ScriptedEditor {
    id: EditorId,
    file: SourceFile,
    text: bool,
    parse_delay: Duration,
    probe: Arc<EditorProbe>,
}

impl ScriptedEditor {
    pub fn new(id: u64, path: &str) -> Self {
        Self {
            id: EditorId(id),
            file: SourceFile::new(path),
            text: true,
            parse_delay: Duration::ZERO,
            probe: Arc::new(EditorProbe::default()),
        }
    }

    pub fn with_caret(self, offset: usize) -> Self {
        self.probe.set_caret(offset);
        self
    }

    pub fn with_parse_delay_ms(mut self, ms: u64) -> Self {
        self.parse_delay = Duration::from_millis(ms);
        self
    }

    pub fn non_text(mut self) -> Self {
        self.text = false;
        self
    }

    pub fn probe(&self) -> Arc<EditorProbe> {
        self.probe.clone()
    }

    pub fn handle(self) -> EditorHandle {
        Arc::new(self)
    }

    /// The element a lookup at `offset` resolves to.
    pub fn node_at(path: &str, offset: usize) -> SourceElement {
        SourceElement::Node {
            file: SourceFile::new(path),
            offset,
            label: format!("node@{}", offset),
        }
    }
}

impl SourceEditor for ScriptedEditor {
    fn editor_id(&self) -> EditorId {
        self.id
    }

    fn file(&self) -> Option<SourceFile> {
        Some(self.file.clone())
    }

    fn is_text(&self) -> bool {
        self.text
    }

    fn caret_offset(&self) -> usize {
        self.probe.caret.load(Ordering::SeqCst)
    }

    fn is_disposed(&self) -> bool {
        self.probe.disposed.load(Ordering::SeqCst)
    }

    fn element_at(&self, offset: usize) -> ElementLookup {
        self.probe.lookups.fetch_add(1, Ordering::SeqCst);
        let delay = self.parse_delay;
        let element = SourceElement::Node {
            file: self.file.clone(),
            offset,
            label: format!("node@{}", offset),
        };
        Box::pin(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            Some(element)
        })
    }
}

/// Editor host with scripted selection that records opened sources.
#[derive(Default)]
pub struct ScriptedEditorHost {
    selected: Mutex<Option<EditorHandle>>,
    visible: Mutex<Vec<EditorHandle>>,
    opened: Mutex<Vec<(SourceElement, bool, bool)>>,
}

impl ScriptedEditorHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_selected(&self, editor: Option<EditorHandle>) {
        *self.selected.lock() = editor;
    }

    pub fn set_visible(&self, editors: Vec<EditorHandle>) {
        *self.visible.lock() = editors;
    }

    /// `(element, request_focus, preview)` for every `open_source`.
    pub fn opened(&self) -> Vec<(SourceElement, bool, bool)> {
        self.opened.lock().clone()
    }
}

impl EditorHost for ScriptedEditorHost {
    fn selected_editor(&self) -> Option<EditorHandle> {
        self.selected.lock().clone()
    }

    fn selected_editors(&self) -> Vec<EditorHandle> {
        let visible = self.visible.lock().clone();
        if visible.is_empty() {
            return self.selected_editor().into_iter().collect();
        }
        visible
    }

    fn open_source(&self, element: &SourceElement, request_focus: bool, preview: bool) {
        self.opened
            .lock()
            .push((element.clone(), request_focus, preview));
    }
}
