//! Editor-side collaborators used for auto-scroll.
//!
//! The host application owns editors. The navigator only needs to ask which
//! editor is selected, where its caret is, what element sits at an offset,
//! and to open an element.

use crate::pane::{SourceElement, SourceFile};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Stable identity of an editor instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditorId(pub u64);

impl fmt::Display for EditorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "editor#{}", self.0)
    }
}

/// Resolves once the document has been parsed far enough.
pub type ElementLookup = Pin<Box<dyn Future<Output = Option<SourceElement>> + Send + 'static>>;

pub trait SourceEditor: Send + Sync {
    fn editor_id(&self) -> EditorId;

    /// File shown in the editor, if it is backed by one.
    fn file(&self) -> Option<SourceFile>;

    /// Text editors carry a caret; others only a file.
    fn is_text(&self) -> bool;

    fn caret_offset(&self) -> usize;

    fn is_disposed(&self) -> bool;

    /// Element enclosing `offset`. May wait for parsing.
    fn element_at(&self, offset: usize) -> ElementLookup;
}

pub type EditorHandle = Arc<dyn SourceEditor>;

pub trait EditorHost: Send + Sync {
    /// Editor with focus, or the most recently focused one.
    fn selected_editor(&self) -> Option<EditorHandle>;

    /// Every editor currently visible.
    fn selected_editors(&self) -> Vec<EditorHandle>;

    /// Open (or reveal) `element`.
    fn open_source(&self, element: &SourceElement, request_focus: bool, preview: bool);
}

/// Where a scroll-from-source starts.
#[derive(Clone)]
pub enum SelectInContext {
    /// Text editor: lookup at the caret
    Editor { editor: EditorHandle, file: SourceFile },
    /// Non-text editor: select the file itself
    File(SourceFile),
}

impl SelectInContext {
    pub fn for_editor(editor: &EditorHandle) -> Option<Self> {
        if editor.is_disposed() {
            return None;
        }
        let file = editor.file()?;
        if editor.is_text() {
            Some(SelectInContext::Editor {
                editor: editor.clone(),
                file,
            })
        } else {
            Some(SelectInContext::File(file))
        }
    }

    /// Best context among the visible editors: the selected editor first,
    /// then any text editor, then any file.
    pub fn find(host: &dyn EditorHost) -> Option<Self> {
        if let Some(editor) = host.selected_editor()
            && let Some(ctx) = Self::for_editor(&editor)
        {
            return Some(ctx);
        }
        let contexts: Vec<Self> = host
            .selected_editors()
            .iter()
            .filter_map(Self::for_editor)
            .collect();
        let text = contexts
            .iter()
            .position(|c| matches!(c, SelectInContext::Editor { .. }));
        match text {
            Some(i) => contexts.into_iter().nth(i),
            None => contexts.into_iter().next(),
        }
    }

    pub fn file(&self) -> &SourceFile {
        match self {
            SelectInContext::Editor { file, .. } => file,
            SelectInContext::File(file) => file,
        }
    }
}

impl fmt::Debug for SelectInContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectInContext::Editor { editor, file } => {
                write!(f, "Editor({}, {})", editor.editor_id(), file)
            }
            SelectInContext::File(file) => write!(f, "File({})", file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedEditor, ScriptedEditorHost};

    #[test]
    fn test_text_context_wins_over_file() {
        let image = ScriptedEditor::new(1, "logo.png").non_text().handle();
        let code = ScriptedEditor::new(2, "main.rs").handle();
        let host = ScriptedEditorHost::new();
        host.set_visible(vec![image, code]);

        let ctx = SelectInContext::find(&host).unwrap();
        assert!(matches!(ctx, SelectInContext::Editor { .. }));
        assert_eq!(ctx.file().path().to_str(), Some("main.rs"));
    }

    #[test]
    fn test_selected_editor_first() {
        let image = ScriptedEditor::new(1, "logo.png").non_text().handle();
        let code = ScriptedEditor::new(2, "main.rs").handle();
        let host = ScriptedEditorHost::new();
        host.set_visible(vec![code, image.clone()]);
        host.set_selected(Some(image));

        let ctx = SelectInContext::find(&host).unwrap();
        assert!(matches!(ctx, SelectInContext::File(_)));
    }

    #[test]
    fn test_disposed_editor_has_no_context() {
        let editor = ScriptedEditor::new(1, "main.rs");
        let probe = editor.probe();
        let editor = editor.handle();
        probe.dispose();
        assert!(SelectInContext::for_editor(&editor).is_none());
    }
}
