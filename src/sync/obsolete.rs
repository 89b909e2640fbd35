//! Tri-state "selection obsolete" flag.

/// Whether the active pane's selection may be stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionObsolete {
    /// Selection is current.
    #[default]
    No,
    /// The tool window was re-shown; stale unless the next select asks
    /// for focus.
    Unsure,
    /// The next select must be skipped.
    Yes,
}

/// One-shot flag consumed by the navigator's `select`.
#[derive(Debug, Default)]
pub struct ObsoleteFlag(SelectionObsolete);

impl ObsoleteFlag {
    pub fn get(&self) -> SelectionObsolete {
        self.0
    }

    pub fn mark_unsure(&mut self) {
        self.0 = SelectionObsolete::Unsure;
    }

    pub fn reset(&mut self) {
        self.0 = SelectionObsolete::No;
    }

    /// Read the flag on behalf of a select.
    ///
    /// `Yes` is consumed (back to `No`) and skips the select. `Unsure`
    /// commits to `Yes` when focus is requested and to `No` otherwise, and
    /// lets this select through.
    pub fn consume(&mut self, request_focus: bool) -> bool {
        match self.0 {
            SelectionObsolete::Yes => {
                self.0 = SelectionObsolete::No;
                true
            }
            SelectionObsolete::Unsure => {
                self.0 = if request_focus {
                    SelectionObsolete::Yes
                } else {
                    SelectionObsolete::No
                };
                false
            }
            SelectionObsolete::No => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_passes_through() {
        let mut flag = ObsoleteFlag::default();
        assert!(!flag.consume(true));
        assert_eq!(flag.get(), SelectionObsolete::No);
    }

    #[test]
    fn test_unsure_with_focus_skips_the_following_select() {
        let mut flag = ObsoleteFlag::default();
        flag.mark_unsure();
        assert!(!flag.consume(true));
        assert_eq!(flag.get(), SelectionObsolete::Yes);
        assert!(flag.consume(false));
        assert_eq!(flag.get(), SelectionObsolete::No);
    }

    #[test]
    fn test_unsure_without_focus_clears() {
        let mut flag = ObsoleteFlag::default();
        flag.mark_unsure();
        assert!(!flag.consume(false));
        assert_eq!(flag.get(), SelectionObsolete::No);
    }
}
