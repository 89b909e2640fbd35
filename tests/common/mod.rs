//! Shared integration test helpers for par-navigator.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::Harness;
//! ```
//!
//! `#![allow(dead_code)]` suppresses warnings when only a subset of helpers
//! is used per file.

#![allow(dead_code)]

use par_navigator::navigator::{Navigator, NavigatorContext, NavigatorListener};
use par_navigator::options::OptionStores;
use par_navigator::pane::PaneHandle;
use par_navigator::testing::{ScriptedEditorHost, StaticFeed};
use par_navigator_config::NavigatorConfig;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Records every `pane_shown` notification.
#[derive(Default)]
pub struct ShownLog(Mutex<Vec<(Option<String>, Option<String>)>>);

impl ShownLog {
    pub fn events(&self) -> Vec<(Option<String>, Option<String>)> {
        self.0.lock().clone()
    }
}

impl NavigatorListener for ShownLog {
    fn pane_shown(&self, shown: Option<&str>, hidden: Option<&str>) {
        self.0
            .lock()
            .push((shown.map(str::to_string), hidden.map(str::to_string)));
    }
}

/// A navigator wired to in-memory collaborators.
pub struct Harness {
    pub navigator: Navigator,
    pub feed: Arc<StaticFeed>,
    pub editors: Arc<ScriptedEditorHost>,
    pub options: OptionStores,
    pub shown: Arc<ShownLog>,
    // Only set when the test is not already running inside a runtime
    _runtime: Option<tokio::runtime::Runtime>,
}

impl Harness {
    /// Feed contributing `panes`; nothing set up yet.
    pub fn new(panes: Vec<PaneHandle>) -> Self {
        Self::with_config(panes, NavigatorConfig::default())
    }

    pub fn with_config(panes: Vec<PaneHandle>, config: NavigatorConfig) -> Self {
        Self::with_options(panes, config, OptionStores::isolated())
    }

    pub fn with_options(
        panes: Vec<PaneHandle>,
        config: NavigatorConfig,
        options: OptionStores,
    ) -> Self {
        let (runtime, handle) = match tokio::runtime::Handle::try_current() {
            Ok(handle) => (None, handle),
            Err(_) => {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .expect("test runtime");
                let handle = runtime.handle().clone();
                (Some(runtime), handle)
            }
        };

        let feed = Arc::new(StaticFeed::new(panes));
        let editors = Arc::new(ScriptedEditorHost::new());
        let mut navigator = Navigator::new(NavigatorContext {
            config,
            feed: feed.clone(),
            editors: editors.clone(),
            options: options.clone(),
            runtime: handle,
        });
        let shown = Arc::new(ShownLog::default());
        navigator.add_listener(shown.clone());

        Self {
            navigator,
            feed,
            editors,
            options,
            shown,
            _runtime: runtime,
        }
    }

    /// Feed contributing `panes`, loaded and set up.
    pub fn started(panes: Vec<PaneHandle>) -> Self {
        let mut harness = Self::new(panes);
        harness.navigator.setup(true);
        harness
    }

    pub fn current(&self) -> (Option<String>, Option<String>) {
        (
            self.navigator.current_view_id().map(str::to_string),
            self.navigator.current_sub_id().map(str::to_string),
        )
    }

    /// Let background tasks run for `ms` of (paused) time, then drain the
    /// actor channel.
    pub async fn settle(&mut self, ms: u64) -> usize {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        self.navigator.process_pending()
    }
}

/// A `pane_shown` event as recorded by [`ShownLog`].
pub fn shown(id: Option<&str>, hidden: Option<&str>) -> (Option<String>, Option<String>) {
    (id.map(str::to_string), hidden.map(str::to_string))
}

pub fn view(id: &str, sub: Option<&str>) -> (Option<String>, Option<String>) {
    (Some(id.to_string()), sub.map(str::to_string))
}
