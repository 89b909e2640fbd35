//! The active pane and sub-view.

/// Which pane is shown. Fields only change through [`transition`].
///
/// [`transition`]: SelectionState::transition
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectionState {
    current_view_id: Option<String>,
    current_sub_id: Option<String>,
}

impl SelectionState {
    pub fn current_view_id(&self) -> Option<&str> {
        self.current_view_id.as_deref()
    }

    pub fn current_sub_id(&self) -> Option<&str> {
        self.current_sub_id.as_deref()
    }

    pub fn is_current(&self, pane_id: &str, sub_id: Option<&str>) -> bool {
        self.current_view_id.as_deref() == Some(pane_id) && self.current_sub_id.as_deref() == sub_id
    }

    /// Switch to `view` (pane id and sub-id), or to nothing. Returns the id
    /// of the pane that was active before.
    pub(super) fn transition(&mut self, view: Option<(String, Option<String>)>) -> Option<String> {
        let previous = self.current_view_id.take();
        match view {
            Some((pane_id, sub_id)) => {
                self.current_view_id = Some(pane_id);
                self.current_sub_id = sub_id;
            }
            None => self.current_sub_id = None,
        }
        previous
    }
}

/// Pane and sub-view read from persisted state, waiting for a matching slot.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SavedSelection {
    pub pane_id: Option<String>,
    pub sub_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_returns_previous() {
        let mut state = SelectionState::default();
        assert_eq!(state.transition(Some(("A".into(), None))), None);
        assert_eq!(
            state.transition(Some(("B".into(), Some("x".into())))),
            Some("A".to_string())
        );
        assert!(state.is_current("B", Some("x")));
        assert!(!state.is_current("B", None));
    }

    #[test]
    fn test_transition_to_nothing() {
        let mut state = SelectionState::default();
        state.transition(Some(("A".into(), Some("x".into()))));
        state.transition(None);
        assert_eq!(state, SelectionState::default());
    }
}
