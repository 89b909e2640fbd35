//! Debounced autoscroll in both directions, on paused tokio time.

mod common;

use common::Harness;
use par_navigator::options::OptionKind;
use par_navigator::pane::{SourceElement, SourceFile};
use par_navigator::sync::SourceEditor;
use par_navigator::testing::{PaneProbe, RecordingPane, ScriptedEditor};
use std::sync::Arc;

/// Started harness with a single "Project" pane and autoscroll from source on.
fn autoscrolling() -> (Harness, Arc<PaneProbe>) {
    let project = RecordingPane::new("Project", 0);
    let probe = project.probe();
    let mut h = Harness::started(vec![project.handle()]);
    // Before any editor is selected, so enabling does not scroll right away
    h.navigator
        .set_option_selected(OptionKind::AutoscrollFromSource, true);
    (h, probe)
}

// ============================================================================
// From source
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_source_changes_within_window_coalesce() {
    let (mut h, pane) = autoscrolling();
    let editor = ScriptedEditor::new(1, "src/main.rs").with_caret(5);
    let caret = editor.probe();
    let editor = editor.handle();
    h.editors.set_selected(Some(editor.clone()));

    h.navigator.source_changed(&editor);
    h.settle(200).await;
    caret.set_caret(7);
    h.navigator.source_changed(&editor);

    // The first request would have fired at 500ms
    h.settle(400).await;
    assert_eq!(caret.lookups(), 0);

    h.settle(200).await;
    h.settle(10).await;
    assert_eq!(caret.lookups(), 1);
    assert_eq!(
        pane.selections(),
        vec![(ScriptedEditor::node_at("src/main.rs", 7), false)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_source_changed_ignored_without_autoscroll() {
    let project = RecordingPane::new("Project", 0);
    let pane = project.probe();
    let mut h = Harness::started(vec![project.handle()]);
    let editor = ScriptedEditor::new(1, "src/main.rs");
    let caret = editor.probe();
    let editor = editor.handle();
    h.editors.set_selected(Some(editor.clone()));

    h.navigator.source_changed(&editor);
    assert_eq!(h.settle(1_000).await, 0);
    assert_eq!(caret.lookups(), 0);
    assert!(pane.selections().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_focused_pane_is_not_scrolled() {
    let (mut h, pane) = autoscrolling();
    pane.set_focus(true);
    let editor = ScriptedEditor::new(1, "src/main.rs");
    let caret = editor.probe();
    let editor = editor.handle();
    h.editors.set_selected(Some(editor.clone()));

    h.navigator.source_changed(&editor);
    h.settle(600).await;
    assert_eq!(caret.lookups(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_editor_disposed_during_lookup_selects_nothing() {
    let (mut h, pane) = autoscrolling();
    let editor = ScriptedEditor::new(1, "src/main.rs").with_parse_delay_ms(100);
    let controls = editor.probe();
    let editor = editor.handle();
    h.editors.set_selected(Some(editor.clone()));

    h.navigator.source_changed(&editor);
    h.settle(600).await;
    controls.dispose();

    h.settle(200).await;
    assert_eq!(controls.lookups(), 1);
    assert!(pane.selections().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_editor_disposed_notification_expires_lookup() {
    let (mut h, pane) = autoscrolling();
    let editor = ScriptedEditor::new(3, "src/main.rs").with_parse_delay_ms(100);
    let editor = editor.handle();
    h.editors.set_selected(Some(editor.clone()));

    h.navigator.source_changed(&editor);
    h.settle(600).await;
    h.navigator.editor_disposed(editor.editor_id());
    h.settle(200).await;
    assert!(pane.selections().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_caret_moved_during_lookup_looks_up_again() {
    let (mut h, pane) = autoscrolling();
    let editor = ScriptedEditor::new(1, "src/main.rs")
        .with_caret(5)
        .with_parse_delay_ms(100);
    let caret = editor.probe();
    let editor = editor.handle();
    h.editors.set_selected(Some(editor.clone()));

    h.navigator.source_changed(&editor);
    h.settle(600).await;
    caret.set_caret(9);

    h.settle(150).await;
    assert!(pane.selections().is_empty());

    h.settle(150).await;
    assert_eq!(caret.lookups(), 2);
    assert_eq!(
        pane.selections(),
        vec![(ScriptedEditor::node_at("src/main.rs", 9), false)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_view_switch_drops_lookup_for_previous_view() {
    let project = RecordingPane::new("Project", 0);
    let project_probe = project.probe();
    let files = RecordingPane::new("Files", 10);
    let files_probe = files.probe();
    let mut h = Harness::started(vec![project.handle(), files.handle()]);
    h.navigator
        .set_option_selected(OptionKind::AutoscrollFromSource, true);
    let editor = ScriptedEditor::new(1, "src/main.rs").with_parse_delay_ms(100);
    let controls = editor.probe();
    let editor = editor.handle();
    h.editors.set_selected(Some(editor.clone()));

    h.navigator.source_changed(&editor);
    h.settle(600).await;
    h.settle(10).await;
    assert_eq!(controls.lookups(), 1);

    // Showing Files starts its own scroll-from-source
    h.navigator.change_view("Files", None).unwrap();
    h.settle(200).await;
    assert!(project_probe.selections().is_empty());
    assert_eq!(controls.lookups(), 2);
    assert_eq!(files_probe.selection_count(), 1);
}

// ============================================================================
// Select opened file
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_select_opened_file_runs_without_autoscroll() {
    let project = RecordingPane::new("Project", 0);
    let pane = project.probe();
    let mut h = Harness::started(vec![project.handle()]);
    let editor = ScriptedEditor::new(1, "src/main.rs");
    let caret = editor.probe();
    h.editors.set_selected(Some(editor.handle()));

    assert!(h.navigator.select_opened_file());
    h.settle(10).await;
    h.settle(10).await;
    assert_eq!(caret.lookups(), 1);
    assert_eq!(pane.selection_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_select_opened_file_unavailable_with_autoscroll() {
    let (mut h, pane) = autoscrolling();
    let editor = ScriptedEditor::new(1, "src/main.rs");
    let caret = editor.probe();
    h.editors.set_selected(Some(editor.handle()));

    assert!(!h.navigator.select_opened_file());
    h.settle(10).await;
    assert_eq!(caret.lookups(), 0);
    assert!(pane.selections().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_select_opened_file_after_dispose_does_nothing() {
    let project = RecordingPane::new("Project", 0);
    let pane = project.probe();
    let mut h = Harness::started(vec![project.handle()]);
    let editor = ScriptedEditor::new(1, "src/main.rs");
    let caret = editor.probe();
    h.editors.set_selected(Some(editor.handle()));

    h.navigator.dispose();
    assert!(!h.navigator.select_opened_file());
    h.settle(10).await;
    assert_eq!(caret.lookups(), 0);
    assert!(pane.selections().is_empty());
}

// ============================================================================
// Focus
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_focus_gained_scrolls_when_armed() {
    let (mut h, pane) = autoscrolling();
    let editor = ScriptedEditor::new(1, "src/main.rs");
    let caret = editor.probe();
    let editor = editor.handle();
    h.editors.set_selected(Some(editor.clone()));

    h.navigator.editor_focus_gained(&editor);
    h.settle(600).await;
    h.settle(10).await;
    assert_eq!(caret.lookups(), 1);
    assert_eq!(pane.selection_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_focused_select_disarms_focus_gained() {
    let (mut h, _pane) = autoscrolling();
    let editor = ScriptedEditor::new(1, "src/main.rs");
    let caret = editor.probe();
    let editor = editor.handle();
    h.editors.set_selected(Some(editor.clone()));

    let element = SourceElement::File(SourceFile::new("src/main.rs"));
    h.navigator.select(&element, None, true);
    h.navigator.editor_focus_gained(&editor);
    h.settle(600).await;
    assert_eq!(caret.lookups(), 0);

    // The ignored gain re-armed it
    h.navigator.editor_focus_gained(&editor);
    h.settle(600).await;
    h.settle(10).await;
    assert_eq!(caret.lookups(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_focus_lost_cancels_pending_scroll() {
    let (mut h, _pane) = autoscrolling();
    let editor = ScriptedEditor::new(1, "src/main.rs");
    let caret = editor.probe();
    let editor = editor.handle();
    h.editors.set_selected(Some(editor.clone()));

    h.navigator.source_changed(&editor);
    h.settle(100).await;
    h.navigator.editor_focus_lost(&editor);
    h.settle(1_000).await;
    assert_eq!(caret.lookups(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_focus_gained_for_hidden_editor_is_ignored() {
    let (mut h, _pane) = autoscrolling();
    let shown = ScriptedEditor::new(1, "src/main.rs");
    let caret = shown.probe();
    h.editors.set_selected(Some(shown.handle()));
    let detached = ScriptedEditor::new(2, "scratch.rs").handle();

    h.navigator.editor_focus_gained(&detached);
    h.settle(600).await;
    assert_eq!(caret.lookups(), 0);
}

// ============================================================================
// To source
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_pane_selection_opens_source_in_preview_tab() {
    let project = RecordingPane::new("Project", 0);
    let pane = project.probe();
    let mut h = Harness::started(vec![project.handle()]);
    h.navigator
        .set_option_selected(OptionKind::OpenInPreviewTab, true);

    let element = SourceElement::File(SourceFile::new("README.md"));
    pane.set_selected_elements(vec![element.clone()]);
    h.navigator.pane_selection_changed("Project");
    h.settle(100).await;
    assert!(h.editors.opened().is_empty());

    h.settle(250).await;
    assert_eq!(h.editors.opened(), vec![(element, false, true)]);
}

#[tokio::test(start_paused = true)]
async fn test_pane_selection_debounces_to_last() {
    let project = RecordingPane::new("Project", 0);
    let pane = project.probe();
    let mut h = Harness::started(vec![project.handle()]);
    h.navigator
        .set_option_selected(OptionKind::AutoscrollToSource, true);

    pane.set_selected_elements(vec![SourceElement::File(SourceFile::new("a.rs"))]);
    h.navigator.pane_selection_changed("Project");
    h.settle(100).await;
    let last = SourceElement::File(SourceFile::new("b.rs"));
    pane.set_selected_elements(vec![last.clone()]);
    h.navigator.pane_selection_changed("Project");
    h.settle(400).await;

    assert_eq!(h.editors.opened(), vec![(last, false, false)]);
}

#[tokio::test(start_paused = true)]
async fn test_pane_selection_without_to_source_mode_is_ignored() {
    let project = RecordingPane::new("Project", 0);
    let pane = project.probe();
    let mut h = Harness::started(vec![project.handle()]);

    pane.set_selected_elements(vec![SourceElement::File(SourceFile::new("a.rs"))]);
    h.navigator.pane_selection_changed("Project");
    h.navigator.pane_selection_changed("Elsewhere");
    h.settle(1_000).await;
    assert!(h.editors.opened().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_dispose_stops_pending_requests() {
    let (mut h, pane) = autoscrolling();
    let editor = ScriptedEditor::new(1, "src/main.rs");
    let caret = editor.probe();
    let editor = editor.handle();
    h.editors.set_selected(Some(editor.clone()));

    h.navigator.source_changed(&editor);
    h.navigator.dispose();
    h.settle(1_000).await;
    assert_eq!(caret.lookups(), 0);
    assert!(pane.selections().is_empty());
}
