//! Plugin feed: where panes come from.
//!
//! The feed is an external collaborator (the plugin host). It reports its
//! current contributions on demand and pushes add/remove notifications
//! through a [`FeedSink`] from whatever thread the plugin host uses.

use crate::actor::{ActorMessage, ActorSender};
use crate::pane::PaneHandle;

/// A change in the contributed pane set.
pub enum PaneFeedEvent {
    Added(PaneHandle),
    Removed(PaneHandle),
}

impl std::fmt::Debug for PaneFeedEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaneFeedEvent::Added(pane) => write!(f, "Added({})", pane.id()),
            PaneFeedEvent::Removed(pane) => write!(f, "Removed({})", pane.id()),
        }
    }
}

/// Source of contributed panes.
pub trait PaneFeed: Send + Sync {
    /// Every pane currently contributed, in no particular order.
    fn panes(&self) -> Vec<PaneHandle>;

    /// Called once by the navigator during setup.
    fn subscribe(&self, sink: FeedSink);
}

/// Forwards feed notifications onto the navigator's actor channel.
#[derive(Clone)]
pub struct FeedSink {
    tx: ActorSender,
}

impl FeedSink {
    pub(crate) fn new(tx: ActorSender) -> Self {
        Self { tx }
    }

    pub fn pane_added(&self, pane: PaneHandle) {
        self.send(PaneFeedEvent::Added(pane));
    }

    pub fn pane_removed(&self, pane: PaneHandle) {
        self.send(PaneFeedEvent::Removed(pane));
    }

    fn send(&self, event: PaneFeedEvent) {
        // The navigator is gone; nothing left to update.
        if self.tx.send(ActorMessage::Feed(event)).is_err() {
            log::debug!("Dropping pane feed event: navigator disposed");
        }
    }
}

/// A feed with nothing in it, for hosts that register panes by hand.
#[derive(Debug, Default)]
pub struct EmptyFeed;

impl PaneFeed for EmptyFeed {
    fn panes(&self) -> Vec<PaneHandle> {
        Vec::new()
    }

    fn subscribe(&self, _sink: FeedSink) {}
}
