//! Pane registry: which panes exist and which of them are live.
//!
//! Panes enter through [`PaneRegistry::register`] into an uninitialized
//! buffer. Once the registry is running the navigator promotes buffered panes
//! into the content binding and they become live. Persisted fragments for
//! panes that have not registered yet wait here too.
//!
//! All mutable maps sit behind one `parking_lot::Mutex`. Pane callbacks are
//! never invoked while it is held: ids are cached at registration and
//! anything that calls into a pane copies the handles out first.

pub mod diff;
pub mod feed;

pub use diff::{ReloadPlan, diff_panes, normalize_feed};
pub use feed::{EmptyFeed, FeedSink, PaneFeed, PaneFeedEvent};

use crate::actor::{ActorMessage, ActorSender};
use crate::pane::{PaneFragment, PaneHandle, same_pane};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A live pane and the id it registered under.
#[derive(Clone)]
struct LivePane {
    id: String,
    pane: PaneHandle,
}

#[derive(Default)]
struct RegistryState {
    /// Live panes in promotion order
    live: Vec<LivePane>,
    /// Registered but not yet promoted
    uninitialized: Vec<PaneHandle>,
    /// Fragments waiting for their pane, keyed by pane id
    buffered_state: BTreeMap<String, PaneFragment>,
    running: bool,
}

/// Thread-safe pane registry shared by the navigator and plugin callbacks.
pub struct PaneRegistry {
    state: Mutex<RegistryState>,
    /// Serializes whole reloads (feed read, diff and apply)
    reload_lock: Mutex<()>,
    extensions_loaded: AtomicBool,
    feed: Arc<dyn PaneFeed>,
}

impl PaneRegistry {
    pub fn new(feed: Arc<dyn PaneFeed>) -> Self {
        Self {
            state: Mutex::new(RegistryState::default()),
            reload_lock: Mutex::new(()),
            extensions_loaded: AtomicBool::new(false),
            feed,
        }
    }

    pub fn feed(&self) -> &Arc<dyn PaneFeed> {
        &self.feed
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Buffer `pane` for promotion. Returns true when the registry is
    /// running, meaning the caller should promote now.
    ///
    /// Registering the same instance twice is a no-op.
    pub fn register(&self, pane: PaneHandle) -> bool {
        let mut state = self.state.lock();
        if !state.uninitialized.iter().any(|p| same_pane(p, &pane)) {
            state.uninitialized.push(pane);
        }
        state.running
    }

    /// Drain the uninitialized buffer into the live set.
    ///
    /// Duplicate ids (inside the batch, or against a pane that is already
    /// live) are dropped with a warning; the first one seen wins. Returns the
    /// panes that became live, in registration order.
    pub fn promote_pending(&self) -> Vec<PaneHandle> {
        let batch = std::mem::take(&mut self.state.lock().uninitialized);
        if batch.is_empty() {
            return Vec::new();
        }

        let candidates: Vec<(String, PaneHandle)> = batch
            .into_iter()
            .map(|pane| (pane.id().to_string(), pane))
            .collect();

        let mut accepted = Vec::with_capacity(candidates.len());
        let mut state = self.state.lock();
        let mut seen: HashSet<String> = state.live.iter().map(|l| l.id.clone()).collect();
        for (id, pane) in candidates {
            if !seen.insert(id.clone()) {
                log::warn!(
                    "Duplicate navigator pane id '{}'; keeping the first registered pane",
                    id
                );
                crate::debug_info!("REGISTRY", "dropped duplicate pane id={}", id);
                continue;
            }
            state.live.push(LivePane {
                id,
                pane: pane.clone(),
            });
            accepted.push(pane);
        }
        accepted
    }

    /// Remove a pane by id from the live set and the buffer.
    ///
    /// Returns the live pane that was removed; an id that is not live is
    /// silently ignored.
    pub fn unregister(&self, pane_id: &str) -> Option<PaneHandle> {
        let buffered: Vec<PaneHandle> = self.state.lock().uninitialized.clone();
        let stale: Vec<PaneHandle> = buffered
            .into_iter()
            .filter(|p| p.id() == pane_id)
            .collect();

        let mut state = self.state.lock();
        state
            .uninitialized
            .retain(|p| !stale.iter().any(|s| same_pane(s, p)));
        let index = state.live.iter().position(|l| l.id == pane_id)?;
        Some(state.live.remove(index).pane)
    }

    /// Remove one exact instance, wherever it is. Returns true when the
    /// instance was live.
    pub fn unregister_instance(&self, pane: &PaneHandle) -> bool {
        let mut state = self.state.lock();
        state.uninitialized.retain(|p| !same_pane(p, pane));
        match state.live.iter().position(|l| same_pane(&l.pane, pane)) {
            Some(index) => {
                state.live.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drop everything. Returns every pane that was known so the caller can
    /// dispose them.
    pub fn clear(&self) -> Vec<PaneHandle> {
        let mut state = self.state.lock();
        state.running = false;
        state.buffered_state.clear();
        let mut panes: Vec<PaneHandle> = state.live.drain(..).map(|l| l.pane).collect();
        panes.append(&mut state.uninitialized);
        panes
    }

    // ========================================================================
    // Feed loading
    // ========================================================================

    /// Initially-visible panes from the feed, the first time only.
    pub fn ensure_loaded(&self) -> Vec<PaneHandle> {
        if self.extensions_loaded.swap(true, Ordering::SeqCst) {
            return Vec::new();
        }
        self.load_from_feed()
            .into_iter()
            .filter(|pane| pane.is_initially_visible())
            .collect()
    }

    pub fn extensions_loaded(&self) -> bool {
        self.extensions_loaded.load(Ordering::SeqCst)
    }

    /// The feed's current panes, weight-sorted and deduplicated, with any
    /// buffered fragment applied to the pane that claims it.
    pub fn load_from_feed(&self) -> Vec<PaneHandle> {
        let panes = normalize_feed(self.feed.panes());
        for pane in &panes {
            self.apply_buffered_state(pane);
        }
        panes
    }

    /// Recompute the pane set from the feed and hand the differences to
    /// `apply` while holding the reload lock.
    ///
    /// Returns false (without calling `apply`) before the first
    /// [`ensure_loaded`](Self::ensure_loaded).
    pub fn reload_with(&self, apply: impl FnOnce(ReloadPlan)) -> bool {
        if !self.extensions_loaded() {
            return false;
        }
        let _guard = self.reload_lock.lock();
        let desired = self.load_from_feed();
        let old = self.known_panes();
        let plan = diff_panes(&old, &desired);
        crate::debug_log!("REGISTRY", "reload plan {:?}", plan);
        apply(plan);
        true
    }

    // ========================================================================
    // Buffered pane state
    // ========================================================================

    /// Keep a fragment until a pane with `pane_id` shows up.
    pub fn buffer_state(&self, pane_id: &str, fragment: PaneFragment) {
        self.state
            .lock()
            .buffered_state
            .insert(pane_id.to_string(), fragment);
    }

    pub fn take_buffered_state(&self, pane_id: &str) -> Option<PaneFragment> {
        self.state.lock().buffered_state.remove(pane_id)
    }

    /// Snapshot of every fragment still waiting for its pane.
    pub fn buffered_states(&self) -> Vec<(String, PaneFragment)> {
        self.state
            .lock()
            .buffered_state
            .iter()
            .map(|(id, fragment)| (id.clone(), fragment.clone()))
            .collect()
    }

    pub fn clear_buffered_states(&self) {
        self.state.lock().buffered_state.clear();
    }

    /// Give `pane` its buffered fragment, if any. A rejected fragment is
    /// logged and dropped.
    pub fn apply_buffered_state(&self, pane: &PaneHandle) {
        let Some(fragment) = self.take_buffered_state(pane.id()) else {
            return;
        };
        if let Err(e) = pane.load_state(&fragment) {
            log::warn!("Ignoring persisted state for pane '{}': {}", pane.id(), e);
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn set_running(&self, running: bool) {
        self.state.lock().running = running;
    }

    pub fn is_running(&self) -> bool {
        self.state.lock().running
    }

    /// Live pane first, then a still-buffered one.
    pub fn pane_by_id(&self, pane_id: &str) -> Option<PaneHandle> {
        if let Some(pane) = self.live_pane(pane_id) {
            return Some(pane);
        }
        let buffered = self.state.lock().uninitialized.clone();
        buffered.into_iter().find(|p| p.id() == pane_id)
    }

    pub fn live_pane(&self, pane_id: &str) -> Option<PaneHandle> {
        self.state
            .lock()
            .live
            .iter()
            .find(|l| l.id == pane_id)
            .map(|l| l.pane.clone())
    }

    pub fn live_panes(&self) -> Vec<PaneHandle> {
        self.state.lock().live.iter().map(|l| l.pane.clone()).collect()
    }

    /// Live ids in promotion order.
    pub fn pane_ids(&self) -> Vec<String> {
        self.state.lock().live.iter().map(|l| l.id.clone()).collect()
    }

    pub fn live_count(&self) -> usize {
        self.state.lock().live.len()
    }

    pub fn pending_count(&self) -> usize {
        self.state.lock().uninitialized.len()
    }

    /// Whether this exact instance is live or buffered.
    pub fn contains_instance(&self, pane: &PaneHandle) -> bool {
        let state = self.state.lock();
        state.live.iter().any(|l| same_pane(&l.pane, pane))
            || state.uninitialized.iter().any(|p| same_pane(p, pane))
    }

    /// Buffered panes followed by live ones.
    fn known_panes(&self) -> Vec<PaneHandle> {
        let state = self.state.lock();
        state
            .uninitialized
            .iter()
            .cloned()
            .chain(state.live.iter().map(|l| l.pane.clone()))
            .collect()
    }
}

/// Registry access for plugin-load callbacks running off the actor thread.
///
/// Registration lands in the buffer immediately; promotion is posted back to
/// the actor.
#[derive(Clone)]
pub struct RegistryHandle {
    registry: Arc<PaneRegistry>,
    tx: ActorSender,
}

impl RegistryHandle {
    pub(crate) fn new(registry: Arc<PaneRegistry>, tx: ActorSender) -> Self {
        Self { registry, tx }
    }

    pub fn register(&self, pane: PaneHandle) {
        if self.registry.register(pane) && self.tx.send(ActorMessage::PromotePending).is_err() {
            log::debug!("Navigator gone; pane stays buffered");
        }
    }

    pub fn registry(&self) -> &Arc<PaneRegistry> {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingPane, StaticFeed};

    fn registry_with(panes: Vec<PaneHandle>) -> PaneRegistry {
        PaneRegistry::new(Arc::new(StaticFeed::new(panes)))
    }

    #[test]
    fn test_register_reports_running() {
        let registry = registry_with(Vec::new());
        assert!(!registry.register(RecordingPane::new("A", 0).handle()));
        registry.set_running(true);
        assert!(registry.register(RecordingPane::new("B", 1).handle()));
        assert_eq!(registry.pending_count(), 2);
    }

    #[test]
    fn test_register_same_instance_twice() {
        let registry = registry_with(Vec::new());
        let pane = RecordingPane::new("A", 0).handle();
        registry.register(pane.clone());
        registry.register(pane);
        assert_eq!(registry.pending_count(), 1);
    }

    #[test]
    fn test_promote_drops_duplicates_against_live() {
        let registry = registry_with(Vec::new());
        let first = RecordingPane::new("A", 0).handle();
        registry.register(first.clone());
        assert_eq!(registry.promote_pending().len(), 1);

        registry.register(RecordingPane::new("A", 3).handle());
        assert!(registry.promote_pending().is_empty());
        assert!(same_pane(&registry.live_pane("A").unwrap(), &first));
    }

    #[test]
    fn test_unregister_unknown_is_silent() {
        let registry = registry_with(Vec::new());
        assert!(registry.unregister("missing").is_none());
    }

    #[test]
    fn test_unregister_removes_buffered() {
        let registry = registry_with(Vec::new());
        registry.register(RecordingPane::new("A", 0).handle());
        assert!(registry.unregister("A").is_none());
        assert_eq!(registry.pending_count(), 0);
    }

    #[test]
    fn test_pane_by_id_finds_buffered() {
        let registry = registry_with(Vec::new());
        registry.register(RecordingPane::new("A", 0).handle());
        assert!(registry.pane_by_id("A").is_some());
        assert!(registry.live_pane("A").is_none());
    }

    #[test]
    fn test_ensure_loaded_is_one_shot_and_filters_hidden() {
        let registry = registry_with(vec![
            RecordingPane::new("Visible", 1).handle(),
            RecordingPane::new("Hidden", 0).hidden().handle(),
        ]);
        let loaded = registry.ensure_loaded();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id(), "Visible");
        assert!(registry.ensure_loaded().is_empty());
    }

    #[test]
    fn test_load_from_feed_applies_buffered_state() {
        let pane = RecordingPane::new("A", 0);
        let probe = pane.probe();
        let registry = registry_with(vec![pane.handle()]);
        let fragment = PaneFragment::from_value(serde_yaml_ng::Value::Bool(true));
        registry.buffer_state("A", fragment.clone());

        registry.load_from_feed();
        assert_eq!(probe.loaded_states(), vec![fragment]);
        assert!(registry.buffered_states().is_empty());
    }

    #[test]
    fn test_reload_before_load_is_noop() {
        let registry = registry_with(vec![RecordingPane::new("A", 0).handle()]);
        let mut called = false;
        assert!(!registry.reload_with(|_| called = true));
        assert!(!called);
    }
}
