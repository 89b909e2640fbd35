//! Selection synchronization between editors and the active pane.
//!
//! - [`obsolete`]: the tri-state stale-selection flag
//! - [`source`]: editor collaborators and select-in contexts
//! - [`alarm`]: debounced scroll requests
//! - [`lookup`]: coalesced caret lookups
//!
//! The navigator drives these from its actor; nothing here touches panes.

pub mod alarm;
pub mod lookup;
pub mod obsolete;
pub mod source;

pub use alarm::{Alarm, RequestKey, ScrollRequest};
pub use lookup::{CaretLookup, LookupOutcome};
pub use obsolete::{ObsoleteFlag, SelectionObsolete};
pub use source::{EditorHandle, EditorHost, EditorId, ElementLookup, SelectInContext, SourceEditor};

use crate::actor::ActorSender;
use tokio::runtime::Handle;

/// Auto-scroll bookkeeping owned by the navigator.
pub struct SelectionSync {
    pub alarm: Alarm,
    pub lookup: CaretLookup,
    pub obsolete: ObsoleteFlag,
    /// Cleared by a focused select, re-armed by focus loss; a focus gain
    /// only scrolls while armed
    pub focus_gained_armed: bool,
}

impl SelectionSync {
    pub fn new(tx: ActorSender, runtime: Handle) -> Self {
        Self {
            alarm: Alarm::new(tx.clone(), runtime.clone()),
            lookup: CaretLookup::new(tx, runtime),
            obsolete: ObsoleteFlag::default(),
            focus_gained_armed: true,
        }
    }

    /// Drop every scheduled request and the in-flight lookup.
    pub fn cancel_all(&mut self) {
        self.alarm.cancel_all();
        self.lookup.cancel();
    }
}
