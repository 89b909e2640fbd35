// Library exports for embedding and tests
//
// # Threading and Lock Policy
//
// One thread (the actor) owns a `Navigator`. New code should follow these rules:
//
//   - `parking_lot::Mutex`    : guards the pane registry's maps and the test
//                               fixtures. Hold it only to copy data in or out;
//                               never call into a pane while holding it.
//
//   - `parking_lot::RwLock`   : option stores shared between navigators and the
//                               process-wide defaults template.
//
//   - `std::sync::mpsc`       : the only way background work (timers, caret
//                               lookups, plugin feed callbacks) reaches the
//                               actor. Drained by `Navigator::process_pending`.
//
// Background tasks run on a tokio runtime handed in through `NavigatorContext`.

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod actor;
pub mod cli;
pub mod content;
pub mod error;
pub mod navigator;
pub mod options;
pub mod pane;
pub mod registry;
pub mod state;
pub mod sync;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{NavigatorError, PaneStateError};
pub use navigator::{Navigator, NavigatorContext, NavigatorListener};
pub use pane::{NavigatorPane, PaneHandle};
