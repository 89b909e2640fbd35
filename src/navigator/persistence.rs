//! Saving and loading navigator state.

use super::{Navigator, SavedSelection};
use crate::error::NavigatorError;
use crate::state::storage::{load_state_from, save_state_to};
use crate::state::{NavigatorElement, NavigatorState, PaneStateEntry};
use std::path::Path;

impl Navigator {
    /// Snapshot for persistence.
    ///
    /// Live panes contribute their own fragments (a pane that fails to
    /// serialize is skipped), followed by fragments still buffered for panes
    /// that never registered.
    pub fn save_state(&self) -> NavigatorState {
        let current = self.current_pane();
        let element = NavigatorElement {
            current_view: current.as_ref().map(|pane| pane.id().to_string()),
            current_sub_view: current.as_ref().and_then(|pane| pane.sub_id()),
            proportions: self.proportions.clone(),
        };

        let mut panes = Vec::new();
        for pane in self.registry.live_panes() {
            match pane.save_state() {
                Ok(Some(state)) => panes.push(PaneStateEntry {
                    id: pane.id().to_string(),
                    state,
                }),
                Ok(None) => {}
                Err(e) => log::warn!("Skipping state of pane '{}': {}", pane.id(), e),
            }
        }
        panes.extend(
            self.registry
                .buffered_states()
                .into_iter()
                .map(|(id, state)| PaneStateEntry { id, state }),
        );

        NavigatorState {
            saved_at: Some(chrono::Utc::now().to_rfc3339()),
            navigator: (!element.is_empty()).then_some(element),
            options: Some(self.options.project_snapshot()),
            panes,
        }
    }

    /// Adopt persisted state.
    ///
    /// Fragments go to live panes right away and are buffered for the rest.
    /// A fragment a pane rejects is dropped for that pane only. Once set up,
    /// the saved view is restored immediately.
    pub fn load_state(&mut self, state: NavigatorState) {
        self.actor.assert_current("Navigator::load_state");
        if self.disposed {
            return;
        }

        if let Some(element) = state.navigator {
            self.saved = SavedSelection {
                sub_id: element
                    .current_view
                    .as_ref()
                    .and(element.current_sub_view),
                pane_id: element.current_view,
            };
            if valid_proportions(&element.proportions) {
                self.proportions = element.proportions;
            } else {
                log::warn!(
                    "Ignoring persisted navigator proportions {:?}",
                    element.proportions
                );
            }
        }

        if let Some(options) = state.options {
            self.options.replace_project(options);
        }

        for entry in state.panes {
            match self.registry.live_pane(&entry.id) {
                Some(pane) => {
                    if let Err(e) = pane.load_state(&entry.state) {
                        log::warn!("Ignoring persisted state for pane '{}': {}", entry.id, e);
                    }
                }
                None => self.registry.buffer_state(&entry.id, entry.state),
            }
        }

        if self.initialized {
            self.restore_selection();
        }
    }

    /// Write [`save_state`](Self::save_state) to `path`.
    ///
    /// The shared option store is written to its own file at the same time.
    pub fn save_to_path(&self, path: &Path) -> Result<(), NavigatorError> {
        save_state_to(&self.save_state(), path)?;
        self.options.persist_shared()?;
        Ok(())
    }

    /// Load state from `path`. Returns false when there was nothing saved.
    pub fn load_from_path(&mut self, path: &Path) -> Result<bool, NavigatorError> {
        match load_state_from(path)? {
            Some(state) => {
                self.load_state(state);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

fn valid_proportions(proportions: &[f32]) -> bool {
    proportions.iter().all(|p| (0.0..=1.0).contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_proportions() {
        assert!(valid_proportions(&[]));
        assert!(valid_proportions(&[0.0, 0.5, 1.0]));
        assert!(!valid_proportions(&[0.5, 1.5]));
        assert!(!valid_proportions(&[f32::NAN]));
    }
}
