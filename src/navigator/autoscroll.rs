//! Selection sync in both directions.
//!
//! From source: editor events schedule a debounced request; when it fires
//! the best select-in context is resolved (a caret lookup for text editors)
//! and the element is selected in the active pane. To source: a selection
//! change in the active pane schedules opening the selected element.

use super::Navigator;
use crate::options::OptionKind;
use crate::pane::{SourceElement, SourceFile};
use crate::sync::{
    EditorHandle, EditorId, LookupOutcome, RequestKey, ScrollRequest, SelectInContext,
};

impl Navigator {
    /// Select `element` in the active pane.
    ///
    /// Skipped once when the current selection was flagged obsolete.
    pub fn select(&mut self, element: &SourceElement, file: Option<&SourceFile>, request_focus: bool) {
        self.actor.assert_current("Navigator::select");
        if self.disposed {
            return;
        }
        if self.sync.obsolete.consume(request_focus) {
            crate::debug_log!("AUTOSCROLL", "select skipped: selection obsolete");
            return;
        }
        let Some(pane) = self.current_pane() else {
            return;
        };
        self.sync.focus_gained_armed = !request_focus;
        crate::debug_log!(
            "AUTOSCROLL",
            "select {:?} in {} (focus={})",
            element,
            pane.id(),
            request_focus
        );
        pane.select(element, file, request_focus);
    }

    /// Select whatever the visible editors show.
    pub fn scroll_from_source(&mut self, request_focus: bool) {
        self.actor.assert_current("Navigator::scroll_from_source");
        if self.disposed {
            return;
        }
        if let Some(ctx) = SelectInContext::find(self.editors.as_ref()) {
            self.select_in_context(ctx, request_focus);
        }
    }

    /// "Select opened file" action. Only available while autoscroll from
    /// source is off; returns whether it ran.
    pub fn select_opened_file(&mut self) -> bool {
        self.actor.assert_current("Navigator::select_opened_file");
        if self.disposed {
            return false;
        }
        let current = self.current_view_id().map(str::to_string);
        if current.is_some_and(|id| self.is_autoscroll_from_source(&id)) {
            return false;
        }
        match SelectInContext::find(self.editors.as_ref()) {
            Some(ctx) => {
                self.select_in_context(ctx, true);
                true
            }
            None => false,
        }
    }

    fn select_in_context(&mut self, ctx: SelectInContext, request_focus: bool) {
        match ctx {
            SelectInContext::Editor { editor, .. } => {
                self.sync.lookup.submit(editor, request_focus);
            }
            SelectInContext::File(file) => {
                let element = SourceElement::File(file.clone());
                self.select(&element, Some(&file), request_focus);
            }
        }
    }

    // ========================================================================
    // Host events
    // ========================================================================

    /// The navigator's tool window became visible.
    pub fn tool_window_shown(&mut self) {
        self.actor.assert_current("Navigator::tool_window_shown");
        self.sync.obsolete.reset();
        let Some(pane) = self.current_pane() else {
            return;
        };
        if !self.is_autoscroll_from_source(pane.id()) {
            return;
        }
        if let Some(ctx) = SelectInContext::find(self.editors.as_ref()) {
            self.sync.obsolete.mark_unsure();
            self.select_in_context(ctx, false);
        }
    }

    pub fn editor_focus_lost(&mut self, editor: &EditorHandle) {
        self.actor.assert_current("Navigator::editor_focus_lost");
        crate::debug_trace!("AUTOSCROLL", "focus lost by {}", editor.editor_id());
        self.sync.alarm.cancel(RequestKey::FromSource);
        self.sync.focus_gained_armed = true;
    }

    pub fn editor_focus_gained(&mut self, editor: &EditorHandle) {
        self.actor.assert_current("Navigator::editor_focus_gained");
        if !self.config.autoscroll_on_focus_gained {
            return;
        }
        if !std::mem::replace(&mut self.sync.focus_gained_armed, true) {
            return;
        }
        if !self.is_autoscroll_from_source_current() {
            return;
        }
        let delay = self.config.autoscroll_from_source_delay();
        self.sync.alarm.schedule(
            RequestKey::FromSource,
            ScrollRequest::FocusGained {
                editor: editor.editor_id(),
            },
            delay,
        );
    }

    /// The selected editor changed or its caret moved.
    pub fn source_changed(&mut self, editor: &EditorHandle) {
        self.actor.assert_current("Navigator::source_changed");
        if self.disposed || !self.is_autoscroll_from_source_current() {
            return;
        }
        let delay = self.config.autoscroll_from_source_delay();
        self.sync.alarm.schedule(
            RequestKey::FromSource,
            ScrollRequest::SourceChanged {
                editor: editor.editor_id(),
            },
            delay,
        );
    }

    /// The user moved the selection inside `pane_id`.
    pub fn pane_selection_changed(&mut self, pane_id: &str) {
        self.actor.assert_current("Navigator::pane_selection_changed");
        if self.disposed || self.current_view_id() != Some(pane_id) {
            return;
        }
        if !self.is_autoscroll_to_source_mode(pane_id) {
            return;
        }
        let delay = self.config.autoscroll_to_source_delay();
        self.sync.alarm.schedule(
            RequestKey::ToSource,
            ScrollRequest::ToSource {
                pane_id: pane_id.to_string(),
            },
            delay,
        );
    }

    /// Abandon any lookup running against a closed editor.
    pub fn editor_disposed(&mut self, editor_id: EditorId) {
        self.actor.assert_current("Navigator::editor_disposed");
        if self.sync.lookup.cancel_for_editor(editor_id) {
            crate::debug_trace!("AUTOSCROLL", "lookup for {} expired", editor_id);
        }
    }

    // ========================================================================
    // Deferred work
    // ========================================================================

    pub(super) fn run_scroll_request(&mut self, request: ScrollRequest) {
        match request {
            ScrollRequest::FocusGained { editor } => {
                // Still enabled, and the editor still belongs to a visible file editor
                if self.is_autoscroll_from_source_current() && self.find_visible_editor(editor).is_some()
                {
                    self.scroll_from_source(false);
                }
            }
            ScrollRequest::SourceChanged { editor } => {
                if !self.is_autoscroll_from_source_current() {
                    return;
                }
                if self.current_pane().is_some_and(|pane| pane.has_focus()) {
                    return;
                }
                if let Some(ctx) = self
                    .find_visible_editor(editor)
                    .and_then(|editor| SelectInContext::for_editor(&editor))
                {
                    self.select_in_context(ctx, false);
                }
            }
            ScrollRequest::ToSource { pane_id } => self.open_selected_source(&pane_id),
        }
    }

    fn find_visible_editor(&self, editor_id: EditorId) -> Option<EditorHandle> {
        self.editors
            .selected_editor()
            .into_iter()
            .chain(self.editors.selected_editors())
            .find(|editor| editor.editor_id() == editor_id)
    }

    fn open_selected_source(&mut self, pane_id: &str) {
        if self.current_view_id() != Some(pane_id) || !self.is_autoscroll_to_source_mode(pane_id) {
            return;
        }
        let Some(pane) = self.current_pane() else {
            return;
        };
        let Some(element) = pane.selected_elements().into_iter().next() else {
            return;
        };
        if !pane.is_auto_scroll_enabled_for(element.file()) {
            return;
        }
        let preview = self.is_option_selected(OptionKind::OpenInPreviewTab);
        crate::debug_log!("AUTOSCROLL", "open {:?} (preview={})", element, preview);
        self.editors.open_source(&element, false, preview);
    }

    pub(super) fn handle_lookup_finished(&mut self, outcome: LookupOutcome) {
        let Some(outcome) = self.sync.lookup.finish(outcome) else {
            return;
        };
        if outcome.editor.is_disposed() {
            crate::debug_trace!("AUTOSCROLL", "lookup #{} expired with its editor", outcome.generation);
            return;
        }
        if !outcome.is_current() {
            crate::debug_trace!(
                "AUTOSCROLL",
                "caret moved from {}; looking up again",
                outcome.offset
            );
            self.sync.lookup.submit(outcome.editor, outcome.request_focus);
            return;
        }
        let element = match outcome.element {
            Some(element) => element,
            None => match outcome.editor.file() {
                Some(file) => SourceElement::File(file),
                None => return,
            },
        };
        let file = element.file().clone();
        self.select(&element, Some(&file), outcome.request_focus);
    }

    // ========================================================================
    // Mode checks
    // ========================================================================

    /// Autoscroll from source is on and applies to `pane_id`.
    pub fn is_autoscroll_from_source(&self, pane_id: &str) -> bool {
        !self.disposed && self.is_option_on(OptionKind::AutoscrollFromSource, pane_id)
    }

    fn is_autoscroll_from_source_current(&self) -> bool {
        self.current_view_id()
            .is_some_and(|id| self.is_autoscroll_from_source(id))
    }

    /// Autoscroll to source applies to `pane_id`.
    pub fn is_autoscroll_to_source(&self, pane_id: &str) -> bool {
        self.is_option_on(OptionKind::AutoscrollToSource, pane_id)
    }

    /// Single-click navigation or the preview tab is on.
    fn is_autoscroll_to_source_mode(&self, pane_id: &str) -> bool {
        (self.is_option_selected(OptionKind::AutoscrollToSource)
            || self.is_option_selected(OptionKind::OpenInPreviewTab))
            && self.is_option_enabled(OptionKind::AutoscrollToSource, pane_id)
    }
}
