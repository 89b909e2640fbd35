//! Typed error types for par-navigator.
//!
//! Callers at the crate boundary can match on these instead of opaque
//! `anyhow` strings. File helpers still return `anyhow::Result` and wrap
//! these where it matters.

use thiserror::Error;

/// Errors returned by [`crate::navigator::Navigator`] operations.
#[derive(Debug, Error)]
pub enum NavigatorError {
    /// No live or pending pane has this id.
    #[error("navigator pane not found: {0}")]
    UnknownPane(String),

    /// A sub-id was requested for a pane that declares none.
    #[error("pane '{pane_id}' has no sub-views (requested '{sub_id}')")]
    NoSubViews {
        /// Pane that was asked for.
        pane_id: String,
        /// Sub-id that cannot exist.
        sub_id: String,
    },

    /// The pane is known but no content slot matches the request.
    #[error("no view slot for pane '{pane_id}' (sub-id {sub_id:?})")]
    NoMatchingSlot {
        /// Requested pane id.
        pane_id: String,
        /// Requested sub-id, if any.
        sub_id: Option<String>,
    },

    /// The navigator has been disposed and accepts no more work.
    #[error("navigator has been disposed")]
    Disposed,

    /// Reading or writing the persisted state file failed.
    #[error("navigator state persistence failed: {0}")]
    Persistence(#[from] anyhow::Error),
}

/// A pane could not read or produce its opaque state fragment.
#[derive(Debug, Error)]
pub enum PaneStateError {
    /// The fragment did not have the shape the pane expects.
    #[error("malformed state for pane '{pane_id}': {reason}")]
    Malformed {
        /// Pane that rejected the fragment.
        pane_id: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The pane failed to serialize its own state.
    #[error("pane '{pane_id}' could not serialize its state: {reason}")]
    Serialize {
        /// Pane that failed.
        pane_id: String,
        /// Why it failed.
        reason: String,
    },
}
