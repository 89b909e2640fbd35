//! Coalesced caret lookups.
//!
//! Resolving the element at the caret may have to wait for parsing, so it
//! runs on the tokio runtime. At most one lookup is in flight per navigator:
//! submitting another aborts the previous one. Results return to the actor
//! as [`ActorMessage::LookupFinished`] and are matched against the in-flight
//! generation, so a superseded result is never applied.

use super::source::{EditorHandle, EditorId};
use crate::actor::{ActorMessage, ActorSender};
use crate::pane::SourceElement;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// A finished lookup on its way back to the actor.
pub struct LookupOutcome {
    pub generation: u64,
    pub editor: EditorHandle,
    /// Caret offset the lookup was computed for
    pub offset: usize,
    pub element: Option<SourceElement>,
    pub request_focus: bool,
}

impl LookupOutcome {
    /// The caret is still where the lookup started.
    pub fn is_current(&self) -> bool {
        self.editor.caret_offset() == self.offset
    }
}

struct InFlight {
    generation: u64,
    editor_id: EditorId,
    task: JoinHandle<()>,
}

pub struct CaretLookup {
    in_flight: Option<InFlight>,
    next_generation: u64,
    tx: ActorSender,
    runtime: Handle,
}

impl CaretLookup {
    pub fn new(tx: ActorSender, runtime: Handle) -> Self {
        Self {
            in_flight: None,
            next_generation: 0,
            tx,
            runtime,
        }
    }

    /// Start a lookup at `editor`'s current caret, replacing any in flight.
    pub fn submit(&mut self, editor: EditorHandle, request_focus: bool) -> u64 {
        self.cancel();
        self.next_generation += 1;
        let generation = self.next_generation;
        let offset = editor.caret_offset();
        let editor_id = editor.editor_id();

        let tx = self.tx.clone();
        let task = self.runtime.spawn(async move {
            let element = editor.element_at(offset).await;
            if editor.is_disposed() {
                return;
            }
            let _ = tx.send(ActorMessage::LookupFinished(LookupOutcome {
                generation,
                editor,
                offset,
                element,
                request_focus,
            }));
        });
        crate::debug_trace!(
            "AUTOSCROLL",
            "lookup #{} submitted for {} at offset {}",
            generation,
            editor_id,
            offset
        );
        self.in_flight = Some(InFlight {
            generation,
            editor_id,
            task,
        });
        generation
    }

    /// Accept a finished lookup if it is the one in flight.
    pub fn finish(&mut self, outcome: LookupOutcome) -> Option<LookupOutcome> {
        match &self.in_flight {
            Some(in_flight) if in_flight.generation == outcome.generation => {
                self.in_flight = None;
                Some(outcome)
            }
            _ => {
                crate::debug_trace!("AUTOSCROLL", "discarded stale lookup #{}", outcome.generation);
                None
            }
        }
    }

    /// Abandon the lookup if it belongs to `editor_id`.
    pub fn cancel_for_editor(&mut self, editor_id: EditorId) -> bool {
        if self
            .in_flight
            .as_ref()
            .is_some_and(|f| f.editor_id == editor_id)
        {
            self.cancel();
            return true;
        }
        false
    }

    pub fn cancel(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.task.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Lookups started so far.
    pub fn submissions(&self) -> u64 {
        self.next_generation
    }
}

impl Drop for CaretLookup {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedEditor;
    use std::sync::mpsc;

    fn outcomes(rx: &mpsc::Receiver<ActorMessage>) -> Vec<LookupOutcome> {
        rx.try_iter()
            .filter_map(|m| match m {
                ActorMessage::LookupFinished(outcome) => Some(outcome),
                _ => None,
            })
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_lookup_delivers_element() {
        let (tx, rx) = mpsc::channel();
        let mut lookup = CaretLookup::new(tx, Handle::current());
        let editor = ScriptedEditor::new(1, "main.rs").with_caret(42).handle();

        let generation = lookup.submit(editor, true);
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        let mut done = outcomes(&rx);
        assert_eq!(done.len(), 1);
        let outcome = lookup.finish(done.remove(0)).unwrap();
        assert_eq!(outcome.generation, generation);
        assert_eq!(outcome.offset, 42);
        assert!(outcome.element.is_some());
        assert!(!lookup.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_resubmit_supersedes() {
        let (tx, rx) = mpsc::channel();
        let mut lookup = CaretLookup::new(tx, Handle::current());
        let editor = ScriptedEditor::new(1, "main.rs").with_parse_delay_ms(100).handle();

        lookup.submit(editor.clone(), false);
        let second = lookup.submit(editor, false);
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;

        let done = outcomes(&rx);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].generation, second);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_for_other_editor_keeps_lookup() {
        let (tx, _rx) = mpsc::channel();
        let mut lookup = CaretLookup::new(tx, Handle::current());
        let editor = ScriptedEditor::new(1, "main.rs").with_parse_delay_ms(100).handle();
        lookup.submit(editor, false);

        assert!(!lookup.cancel_for_editor(EditorId(2)));
        assert!(lookup.is_pending());
        assert!(lookup.cancel_for_editor(EditorId(1)));
        assert!(!lookup.is_pending());
    }
}
