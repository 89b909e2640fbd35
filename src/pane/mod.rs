//! Pane contract for pluggable navigator views.
//!
//! A pane is contributed by a plugin through the [`crate::registry::PaneFeed`]
//! and rendered by the host UI; this crate only routes selections to it and
//! persists its opaque state.
//!
//! Sub-modules:
//! - [`types`]: capabilities and the source model (files, elements)
//! - [`fragment`]: opaque per-pane state payload
//! - [`contract`]: the [`NavigatorPane`] trait itself

pub mod contract;
pub mod fragment;
pub mod types;

pub use contract::NavigatorPane;
pub use fragment::PaneFragment;
pub use types::{PaneCapabilities, SourceElement, SourceFile};

use std::sync::Arc;

/// Shared handle to a pane. Identity is the allocation, not the id.
pub type PaneHandle = Arc<dyn NavigatorPane>;

/// True when both handles point at the same pane instance.
pub fn same_pane(a: &PaneHandle, b: &PaneHandle) -> bool {
    Arc::ptr_eq(a, b)
}
