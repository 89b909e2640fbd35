//! Debounced requests keyed by handler.
//!
//! Scheduling under a key cancels whatever was pending for that key, so
//! only the last request inside the delay window fires. Expiry is delivered
//! to the actor as [`ActorMessage::RequestDue`]; the generation check in
//! [`Alarm::take_due`] drops anything that was superseded after its timer
//! already fired.

use super::source::EditorId;
use crate::actor::{ActorMessage, ActorSender};
use std::collections::HashMap;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Who a debounced request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKey {
    /// Editor-driven: select the caret's element in the active pane
    FromSource,
    /// Pane-driven: open the selected node in an editor
    ToSource,
}

/// What to do when a request fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollRequest {
    /// Caret moved or another editor was selected
    SourceChanged { editor: EditorId },
    /// An editor regained focus
    FocusGained { editor: EditorId },
    /// The active pane's selection changed
    ToSource { pane_id: String },
}

struct PendingRequest {
    generation: u64,
    request: ScrollRequest,
    task: JoinHandle<()>,
}

pub struct Alarm {
    pending: HashMap<RequestKey, PendingRequest>,
    next_generation: u64,
    tx: ActorSender,
    runtime: Handle,
}

impl Alarm {
    pub fn new(tx: ActorSender, runtime: Handle) -> Self {
        Self {
            pending: HashMap::new(),
            next_generation: 0,
            tx,
            runtime,
        }
    }

    /// Schedule `request` after `delay`, replacing any pending one for `key`.
    pub fn schedule(&mut self, key: RequestKey, request: ScrollRequest, delay: Duration) -> u64 {
        self.cancel(key);
        self.next_generation += 1;
        let generation = self.next_generation;

        let tx = self.tx.clone();
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(ActorMessage::RequestDue { key, generation });
        });
        crate::debug_trace!(
            "AUTOSCROLL",
            "scheduled {:?} #{} in {:?}: {:?}",
            key,
            generation,
            delay,
            request
        );
        self.pending.insert(
            key,
            PendingRequest {
                generation,
                request,
                task,
            },
        );
        generation
    }

    /// Claim the request behind a fired timer. `None` when it was cancelled
    /// or replaced in the meantime.
    pub fn take_due(&mut self, key: RequestKey, generation: u64) -> Option<ScrollRequest> {
        match self.pending.get(&key) {
            Some(pending) if pending.generation == generation => {
                self.pending.remove(&key).map(|p| p.request)
            }
            _ => {
                crate::debug_trace!("AUTOSCROLL", "discarded stale {:?} #{}", key, generation);
                None
            }
        }
    }

    pub fn cancel(&mut self, key: RequestKey) -> bool {
        match self.pending.remove(&key) {
            Some(pending) => {
                pending.task.abort();
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, pending) in self.pending.drain() {
            pending.task.abort();
        }
    }

    pub fn is_pending(&self, key: RequestKey) -> bool {
        self.pending.contains_key(&key)
    }
}

impl Drop for Alarm {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
