//! View switching. [`Navigator::view_selection_changed`] is the only path
//! that changes the active pane.

use super::Navigator;
use crate::error::NavigatorError;
use crate::pane::{PaneHandle, same_pane};

impl Navigator {
    /// Show `pane_id` (and `sub_id`). Returns `Ok(false)` when that view is
    /// already active.
    ///
    /// For a pane with sub-views a missing `sub_id` keeps the pane's current
    /// one.
    pub fn change_view(&mut self, pane_id: &str, sub_id: Option<&str>) -> Result<bool, NavigatorError> {
        self.actor.assert_current("Navigator::change_view");
        self.ensure_alive()?;
        let pane = self
            .registry
            .pane_by_id(pane_id)
            .ok_or_else(|| NavigatorError::UnknownPane(pane_id.to_string()))?;

        let sub_id = if !pane.sub_ids().is_empty() {
            sub_id.map(str::to_string).or_else(|| pane.sub_id())
        } else if let Some(sub_id) = sub_id {
            return Err(NavigatorError::NoSubViews {
                pane_id: pane_id.to_string(),
                sub_id: sub_id.to_string(),
            });
        } else {
            None
        };

        if self.selection.is_current(pane_id, sub_id.as_deref()) {
            return Ok(false);
        }

        let index = self
            .binding
            .find_for_view(pane_id, sub_id.as_deref())
            .ok_or_else(|| NavigatorError::NoMatchingSlot {
                pane_id: pane_id.to_string(),
                sub_id: sub_id.clone(),
            })?;
        self.binding.select(index);
        self.view_selection_changed();
        Ok(true)
    }

    /// The host UI selected slot `index` (a tab click).
    pub fn select_slot(&mut self, index: usize) -> bool {
        self.actor.assert_current("Navigator::select_slot");
        if self.disposed || !self.binding.select(index) {
            return false;
        }
        self.view_selection_changed();
        true
    }

    /// Make the binding's selected slot the active view.
    ///
    /// No-op when it already is. Otherwise the pane is shown, listeners are
    /// told, and a scroll-from-source runs if enabled for the new pane.
    pub fn view_selection_changed(&mut self) {
        self.actor.assert_current("Navigator::view_selection_changed");
        let Some(slot) = self.binding.selected().cloned() else {
            return;
        };
        if self.selection.is_current(&slot.pane_id, slot.sub_id.as_deref()) {
            return;
        }
        let Some(pane) = self.registry.live_pane(&slot.pane_id) else {
            return;
        };

        pane.set_sub_id(slot.sub_id.as_deref());
        self.show_pane(&pane);
        if self.is_autoscroll_from_source(&slot.pane_id) {
            self.scroll_from_source(false);
        }
    }

    fn show_pane(&mut self, new_pane: &PaneHandle) {
        let current = self.current_pane();
        let mut carried = None;
        if let Some(current) = &current {
            if !same_pane(current, new_pane) {
                current.save_expanded_paths();
            }
            carried = current.selected_elements().into_iter().next();
        }

        let new_sub_id = new_pane.sub_id();
        let hidden = self
            .selection
            .transition(Some((new_pane.id().to_string(), new_sub_id.clone())));
        // A lookup started for the previous view must not land in this one
        self.sync.lookup.cancel();

        new_pane.restore_expanded_paths();
        if let Some(element) = carried
            && let Some(sub_id) = new_sub_id.as_deref()
            && new_pane.is_sub_id_selectable(sub_id, element.file())
        {
            new_pane.select(&element, Some(element.file()), true);
        }

        log::info!(
            "Navigator pane shown: {} (sub-view {:?}, hidden {:?})",
            new_pane.id(),
            new_sub_id,
            hidden
        );
        for listener in &self.listeners {
            listener.pane_shown(Some(new_pane.id()), hidden.as_deref());
        }
    }
}
