//! Pane registration, promotion into the content binding, reload and the
//! restore-selection pass.

use super::Navigator;
use crate::pane::{PaneHandle, same_pane};
use crate::registry::ReloadPlan;

impl Navigator {
    /// Add a pane. Promoted right away once the navigator is set up.
    pub fn register_pane(&mut self, pane: PaneHandle) {
        self.actor.assert_current("Navigator::register_pane");
        if self.disposed {
            return;
        }
        if self.registry.register(pane) {
            self.promote_pending();
        }
    }

    /// Remove a pane and its slots. Unknown ids are ignored. The pane is
    /// handed back undisposed.
    pub fn unregister_pane(&mut self, pane_id: &str) -> Option<PaneHandle> {
        self.actor.assert_current("Navigator::unregister_pane");
        let pane = self.registry.unregister(pane_id)?;
        self.binding.remove_pane(pane_id);
        self.after_pane_removed(pane_id);
        Some(pane)
    }

    /// Resync with the plugin feed: dispose panes that vanished and add
    /// newly contributed, initially-visible ones.
    pub fn reload_panes(&mut self) {
        self.actor.assert_current("Navigator::reload_panes");
        if self.disposed {
            return;
        }
        let registry = self.registry.clone();
        registry.reload_with(|plan| self.apply_reload_plan(plan));
    }

    fn apply_reload_plan(&mut self, plan: ReloadPlan) {
        if plan.is_empty() {
            return;
        }
        log::info!("Reloading navigator panes: {:?}", plan);
        for pane in plan.removed {
            if self.registry.unregister_instance(&pane) {
                self.binding.remove_pane(pane.id());
                self.after_pane_removed(pane.id());
            }
            pane.dispose();
        }
        for pane in plan.added {
            self.register_pane(pane);
        }
    }

    fn after_pane_removed(&mut self, pane_id: &str) {
        crate::debug_info!("REGISTRY", "pane {} removed", pane_id);
        if self.selection.current_view_id() == Some(pane_id) && self.binding.selected().is_none() {
            let hidden = self.selection.transition(None);
            log::info!("Navigator pane hidden: {:?}, nothing left to show", hidden);
            for listener in &self.listeners {
                listener.pane_shown(None, hidden.as_deref());
            }
        }
        self.view_selection_changed();
    }

    /// Move buffered panes into the binding, then run restore selection.
    pub(crate) fn promote_pending(&mut self) {
        if self.disposed || !self.registry.is_running() {
            return;
        }
        let promoted = self.registry.promote_pending();
        for pane in &promoted {
            self.registry.apply_buffered_state(pane);
            self.binding.add_pane(pane.as_ref());
            crate::debug_info!(
                "REGISTRY",
                "pane {} live (weight {})",
                pane.id(),
                pane.weight()
            );
        }
        self.binding.fix_separators();
        self.restore_selection();
    }

    /// Pick the view to show after panes were added.
    ///
    /// A saved (pane, sub-id) pair that matches a slot exactly wins and is
    /// then forgotten. Otherwise, if nothing is shown yet, the default view
    /// or else the first slot is selected. Anything already shown stays.
    pub fn restore_selection(&mut self) {
        self.actor.assert_current("Navigator::restore_selection");
        if self.disposed {
            return;
        }
        let mut target = None;

        if let Some(saved_id) = self.saved.pane_id.as_deref()
            && let Some(index) = self.binding.find_slot(saved_id, self.saved.sub_id.as_deref())
        {
            target = Some(index);
            self.saved = Default::default();
        }

        if target.is_none() && self.selection.current_view_id().is_none() && !self.binding.is_empty()
        {
            target = self
                .default_view_id()
                .and_then(|id| self.binding.find_for_view(&id, None))
                .or(Some(0));
        }

        let Some(index) = target else {
            return;
        };
        let slot = self.binding.slots()[index].clone();
        crate::debug_log!(
            "VIEW",
            "restoring view {} / {:?}",
            slot.pane_id,
            slot.sub_id
        );
        if let Err(e) = self.change_view(&slot.pane_id, slot.sub_id.as_deref()) {
            log::warn!("Could not restore navigator view '{}': {}", slot.pane_id, e);
        }
    }

    /// A live pane that claims the default, else the configured id.
    fn default_view_id(&self) -> Option<String> {
        self.binding
            .slots()
            .iter()
            .filter_map(|slot| self.registry.live_pane(&slot.pane_id))
            .find(|pane| pane.is_default_pane())
            .map(|pane| pane.id().to_string())
            .or_else(|| self.config.default_view_id.clone())
    }

    /// Whether `pane` is the live instance registered under its id.
    pub fn is_live(&self, pane: &PaneHandle) -> bool {
        self.registry
            .live_pane(pane.id())
            .is_some_and(|live| same_pane(&live, pane))
    }
}
