//! Shared settings file watcher.
//!
//! Another project (or another process) may rewrite the shared settings
//! file. The watcher reports those writes so the navigator can reload the
//! shared store without a restart. Bursts of writes from a single save are
//! collapsed by a debounce gate.

use anyhow::{Context, Result};
use notify::{Config as NotifyConfig, Event, EventKind, PollWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::time::{Duration, Instant};

/// The shared settings file changed on disk.
#[derive(Debug, Clone)]
pub struct SettingsReloadEvent {
    pub path: PathBuf,
}

/// Drops events that arrive within `delay` of the last accepted one.
#[derive(Debug, Clone)]
struct DebounceGate {
    delay: Duration,
    last: Arc<Mutex<Option<Instant>>>,
}

impl DebounceGate {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            last: Arc::new(Mutex::new(None)),
        }
    }

    fn accept(&self) -> bool {
        let now = Instant::now();
        let mut last = self.last.lock();
        match *last {
            Some(previous) if now.duration_since(previous) < self.delay => false,
            _ => {
                *last = Some(now);
                true
            }
        }
    }
}

/// Watches one settings file and queues [`SettingsReloadEvent`]s.
pub struct SettingsWatcher {
    _watcher: Box<dyn Watcher + Send>,
    events: Receiver<SettingsReloadEvent>,
}

impl std::fmt::Debug for SettingsWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsWatcher").finish_non_exhaustive()
    }
}

fn event_handler(
    filename: OsString,
    path: PathBuf,
    gate: DebounceGate,
    tx: Sender<SettingsReloadEvent>,
) -> impl Fn(std::result::Result<Event, notify::Error>) + Send + 'static {
    move |result| {
        let Ok(event) = result else {
            return;
        };
        // Create covers editors that save via rename
        if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
            return;
        }
        if !event
            .paths
            .iter()
            .any(|p| p.file_name().is_some_and(|f| f == filename))
        {
            return;
        }
        if !gate.accept() {
            log::trace!("Debouncing shared settings reload event");
            return;
        }
        log::info!("Shared settings changed: {}", path.display());
        if let Err(e) = tx.send(SettingsReloadEvent { path: path.clone() }) {
            log::error!("Failed to send settings reload event: {}", e);
        }
    }
}

impl SettingsWatcher {
    /// Start watching `settings_path`.
    ///
    /// Uses the platform watcher and falls back to polling every 500 ms when
    /// the native backend is unavailable.
    ///
    /// # Errors
    /// Fails when the file does not exist or neither backend can watch its
    /// parent directory.
    pub fn new(settings_path: &Path, debounce_delay_ms: u64) -> Result<Self> {
        if !settings_path.exists() {
            anyhow::bail!("Settings file not found: {}", settings_path.display());
        }

        let canonical = settings_path
            .canonicalize()
            .unwrap_or_else(|_| settings_path.to_path_buf());
        let filename = canonical
            .file_name()
            .context("Settings path has no filename")?
            .to_os_string();
        let parent_dir = canonical
            .parent()
            .context("Settings path has no parent directory")?
            .to_path_buf();

        let (tx, rx) = channel();
        let gate = DebounceGate::new(Duration::from_millis(debounce_delay_ms));

        let mut watcher: Box<dyn Watcher + Send> = match notify::recommended_watcher(
            event_handler(filename.clone(), canonical.clone(), gate.clone(), tx.clone()),
        ) {
            Ok(w) => Box::new(w),
            Err(e) => {
                log::warn!(
                    "Settings watcher: native backend unavailable ({}); falling back to PollWatcher",
                    e
                );
                Box::new(
                    PollWatcher::new(
                        event_handler(filename, canonical.clone(), gate, tx),
                        NotifyConfig::default().with_poll_interval(Duration::from_millis(500)),
                    )
                    .context("Failed to create fallback PollWatcher")?,
                )
            }
        };

        watcher
            .watch(&parent_dir, RecursiveMode::NonRecursive)
            .with_context(|| {
                format!(
                    "Failed to watch settings directory: {}",
                    parent_dir.display()
                )
            })?;

        log::info!("Shared settings hot reload: watching {}", canonical.display());

        Ok(Self {
            _watcher: watcher,
            events: rx,
        })
    }

    /// Next pending reload event, if any (non-blocking).
    pub fn try_recv(&self) -> Option<SettingsReloadEvent> {
        self.events.try_recv().ok()
    }
}
