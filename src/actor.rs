//! Actor plumbing: the message type drained by
//! [`crate::navigator::Navigator::process_pending`] and the thread guard that
//! keeps UI-visible state on one thread.

use crate::registry::PaneFeedEvent;
use crate::sync::{LookupOutcome, RequestKey};
use std::sync::mpsc::Sender;
use std::thread::ThreadId;

/// Work handed back to the actor from feeds, timers and background lookups.
pub enum ActorMessage {
    /// Pane added to or removed from the plugin feed.
    Feed(PaneFeedEvent),
    /// Panes were registered off-actor while the registry is running.
    PromotePending,
    /// A debounced request's delay elapsed.
    RequestDue { key: RequestKey, generation: u64 },
    /// A background element lookup completed.
    LookupFinished(LookupOutcome),
}

impl std::fmt::Debug for ActorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActorMessage::Feed(event) => write!(f, "Feed({:?})", event),
            ActorMessage::PromotePending => write!(f, "PromotePending"),
            ActorMessage::RequestDue { key, generation } => {
                write!(f, "RequestDue({:?}, #{})", key, generation)
            }
            ActorMessage::LookupFinished(outcome) => {
                write!(f, "LookupFinished(#{})", outcome.generation)
            }
        }
    }
}

/// Sending half of the actor channel; cheap to clone.
pub type ActorSender = Sender<ActorMessage>;

/// Remembers which thread owns the navigator.
#[derive(Debug, Clone, Copy)]
pub struct ActorThread(ThreadId);

impl ActorThread {
    pub fn current() -> Self {
        Self(std::thread::current().id())
    }

    /// Panics in debug builds when called off the owning thread.
    pub fn assert_current(&self, operation: &str) {
        debug_assert_eq!(
            std::thread::current().id(),
            self.0,
            "{} must run on the navigator's actor thread",
            operation
        );
    }
}
