//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes so that a
//! partially written YAML file still loads.

// ── Primitive helpers ──────────────────────────────────────────────────────

pub fn bool_false() -> bool {
    false
}

pub fn bool_true() -> bool {
    true
}

// ── Auto-scroll timing ─────────────────────────────────────────────────────

pub fn autoscroll_from_source_delay_ms() -> u64 {
    500
}

pub fn autoscroll_to_source_delay_ms() -> u64 {
    300
}

// ── Watcher ────────────────────────────────────────────────────────────────

pub fn settings_watch_debounce_ms() -> u64 {
    100
}
