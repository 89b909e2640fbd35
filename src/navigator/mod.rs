//! The navigator: owner of the active pane and everything that routes to it.
//!
//! A [`Navigator`] lives on one thread (the actor). Every `&mut self` entry
//! point runs there; work finished elsewhere (plugin feed notifications,
//! debounce timers, caret lookups) comes back through an `mpsc` channel and
//! is applied in [`Navigator::process_pending`], in the spirit of the
//! settings watcher's `try_recv` polling.
//!
//! The implementation is split across files by concern:
//! - `panes`: registration, promotion, reload, restore selection
//! - `view`: view switches and the active pane transition
//! - `autoscroll`: selection sync in both directions
//! - `options`: toggle reads/writes and pane refresh
//! - `persistence`: saving and loading [`crate::state::NavigatorState`]

mod autoscroll;
mod options;
mod panes;
mod persistence;
mod selection;
mod view;

pub use selection::{SavedSelection, SelectionState};

use crate::actor::{ActorMessage, ActorThread};
use crate::content::{ContentBinding, ContentSlot, ViewMenuEntry};
use crate::error::NavigatorError;
use crate::options::OptionStores;
use crate::pane::PaneHandle;
use crate::registry::{FeedSink, PaneFeed, PaneFeedEvent, PaneRegistry, RegistryHandle};
use crate::sync::{EditorHost, SelectionSync};
use par_navigator_config::{NavigatorConfig, SettingsWatcher, SharedSettings};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};

/// Outbound notification for the active pane changing.
pub trait NavigatorListener: Send + Sync {
    /// `shown` is `None` when the last visible pane went away.
    fn pane_shown(&self, shown: Option<&str>, hidden: Option<&str>);
}

/// Collaborators a navigator is built from.
pub struct NavigatorContext {
    pub config: NavigatorConfig,
    pub feed: Arc<dyn PaneFeed>,
    pub editors: Arc<dyn EditorHost>,
    pub options: OptionStores,
    /// Runtime for debounce timers and caret lookups
    pub runtime: tokio::runtime::Handle,
}

struct SharedSettingsWatch {
    path: PathBuf,
    watcher: SettingsWatcher,
}

pub struct Navigator {
    config: NavigatorConfig,
    registry: Arc<PaneRegistry>,
    binding: ContentBinding,
    selection: SelectionState,
    saved: SavedSelection,
    options: OptionStores,
    sync: SelectionSync,
    editors: Arc<dyn EditorHost>,
    listeners: Vec<Arc<dyn NavigatorListener>>,
    /// Splitter proportions restored from and saved to state
    proportions: Vec<f32>,
    tx: Sender<ActorMessage>,
    rx: Receiver<ActorMessage>,
    actor: ActorThread,
    initialized: bool,
    disposed: bool,
    settings_watch: Option<SharedSettingsWatch>,
}

impl Navigator {
    /// Build a navigator owned by the calling thread.
    pub fn new(ctx: NavigatorContext) -> Self {
        let (tx, rx) = channel();
        Self {
            registry: Arc::new(PaneRegistry::new(ctx.feed)),
            binding: ContentBinding::new(),
            selection: SelectionState::default(),
            saved: SavedSelection::default(),
            options: ctx.options,
            sync: SelectionSync::new(tx.clone(), ctx.runtime),
            editors: ctx.editors,
            listeners: Vec::new(),
            proportions: Vec::new(),
            tx,
            rx,
            actor: ActorThread::current(),
            initialized: false,
            disposed: false,
            settings_watch: None,
            config: ctx.config,
        }
    }

    /// Load panes and start routing. Safe to call more than once.
    ///
    /// With `load_pane_extensions` false only panes registered by hand are
    /// shown; the feed is still subscribed so later contributions arrive.
    pub fn setup(&mut self, load_pane_extensions: bool) {
        self.actor.assert_current("Navigator::setup");
        if self.initialized || self.disposed {
            return;
        }

        if load_pane_extensions {
            for pane in self.registry.ensure_loaded() {
                self.registry.register(pane);
            }
        }
        self.initialized = true;
        self.registry.set_running(true);
        self.promote_pending();
        self.view_selection_changed();

        self.registry
            .feed()
            .subscribe(FeedSink::new(self.tx.clone()));
        log::info!(
            "Navigator ready with {} pane(s): {:?}",
            self.registry.live_count(),
            self.registry.pane_ids()
        );
    }

    /// Apply everything other threads handed back. Returns how many
    /// messages (and settings reloads) were handled.
    pub fn process_pending(&mut self) -> usize {
        self.actor.assert_current("Navigator::process_pending");
        let mut handled = 0;
        while let Ok(message) = self.rx.try_recv() {
            handled += 1;
            if self.disposed {
                continue;
            }
            crate::debug_trace!("ACTOR", "handling {:?}", message);
            match message {
                ActorMessage::Feed(event) => self.handle_feed_event(event),
                ActorMessage::PromotePending => self.promote_pending(),
                ActorMessage::RequestDue { key, generation } => {
                    if let Some(request) = self.sync.alarm.take_due(key, generation) {
                        self.run_scroll_request(request);
                    }
                }
                ActorMessage::LookupFinished(outcome) => self.handle_lookup_finished(outcome),
            }
        }
        handled + self.poll_settings_watch()
    }

    fn handle_feed_event(&mut self, event: PaneFeedEvent) {
        match event {
            PaneFeedEvent::Added(pane) => {
                crate::debug_info!("REGISTRY", "feed added pane {}", pane.id());
                self.reload_panes();
            }
            PaneFeedEvent::Removed(pane) => {
                crate::debug_info!("REGISTRY", "feed removed pane {}", pane.id());
                if self.registry.contains_instance(&pane) {
                    self.reload_panes();
                } else {
                    pane.dispose();
                }
            }
        }
    }

    // ========================================================================
    // Shared settings hot reload
    // ========================================================================

    /// Reload the shared settings store whenever `path` changes on disk.
    pub fn watch_shared_settings(&mut self, path: &Path) -> anyhow::Result<()> {
        let watcher = SettingsWatcher::new(path, self.config.settings_watch_debounce_ms)?;
        self.settings_watch = Some(SharedSettingsWatch {
            path: path.to_path_buf(),
            watcher,
        });
        Ok(())
    }

    fn poll_settings_watch(&mut self) -> usize {
        let Some(watch) = &self.settings_watch else {
            return 0;
        };
        let mut reloads = 0;
        while watch.watcher.try_recv().is_some() {
            reloads += 1;
        }
        if reloads == 0 {
            return 0;
        }
        match SharedSettings::load_from(&watch.path) {
            Ok(settings) => {
                log::info!("Reloaded shared navigator settings from {:?}", watch.path);
                self.options.replace_shared(settings);
            }
            Err(e) => log::warn!("Keeping previous shared settings: {:#}", e),
        }
        reloads
    }

    // ========================================================================
    // Lifecycle and accessors
    // ========================================================================

    /// Stop all background work and dispose every pane. Later calls are
    /// no-ops and option writes are ignored.
    pub fn dispose(&mut self) {
        self.actor.assert_current("Navigator::dispose");
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.sync.cancel_all();
        self.settings_watch = None;
        for pane in self.registry.clear() {
            pane.dispose();
        }
        self.binding = ContentBinding::new();
        self.selection.transition(None);
        log::info!("Navigator disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub(crate) fn ensure_alive(&self) -> Result<(), NavigatorError> {
        if self.disposed {
            return Err(NavigatorError::Disposed);
        }
        Ok(())
    }

    pub fn add_listener(&mut self, listener: Arc<dyn NavigatorListener>) {
        self.listeners.push(listener);
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn options(&self) -> &OptionStores {
        &self.options
    }

    pub fn registry(&self) -> &Arc<PaneRegistry> {
        &self.registry
    }

    /// Handle for registering panes from other threads.
    pub fn registry_handle(&self) -> RegistryHandle {
        RegistryHandle::new(self.registry.clone(), self.tx.clone())
    }

    pub fn current_view_id(&self) -> Option<&str> {
        self.selection.current_view_id()
    }

    pub fn current_sub_id(&self) -> Option<&str> {
        self.selection.current_sub_id()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn saved_selection(&self) -> &SavedSelection {
        &self.saved
    }

    pub fn current_pane(&self) -> Option<PaneHandle> {
        self.selection
            .current_view_id()
            .and_then(|id| self.registry.live_pane(id))
    }

    /// Live pane ids in registration order.
    pub fn pane_ids(&self) -> Vec<String> {
        self.registry.pane_ids()
    }

    pub fn slots(&self) -> &[ContentSlot] {
        self.binding.slots()
    }

    pub fn selected_slot(&self) -> Option<&ContentSlot> {
        self.binding.selected()
    }

    pub fn view_menu(&self) -> Vec<ViewMenuEntry> {
        self.binding.view_menu()
    }

    pub fn proportions(&self) -> &[f32] {
        &self.proportions
    }

    /// Record the host's splitter layout for the next save.
    pub fn set_proportions(&mut self, proportions: Vec<f32>) {
        self.proportions = proportions;
    }
}

impl Drop for Navigator {
    fn drop(&mut self) {
        self.sync.cancel_all();
    }
}
