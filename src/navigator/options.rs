//! Toggle reads and writes, and the pane refresh they trigger.

use super::Navigator;
use crate::options::{OptionContext, OptionKind, Refresh};
use crate::pane::PaneHandle;

impl Navigator {
    pub fn is_option_selected(&self, kind: OptionKind) -> bool {
        self.options.is_selected(kind)
    }

    /// Whether `kind` applies to `pane_id`. False for unknown panes.
    pub fn is_option_enabled(&self, kind: OptionKind, pane_id: &str) -> bool {
        let Some(pane) = self.registry.pane_by_id(pane_id) else {
            return false;
        };
        let options = self.options.project_snapshot();
        let ctx = OptionContext {
            options: &options,
            environment: &self.config.environment,
        };
        kind.spec().is_enabled(&ctx, &pane.capabilities())
    }

    /// Selected and enabled: the only meaningful read.
    pub fn is_option_on(&self, kind: OptionKind, pane_id: &str) -> bool {
        self.is_option_selected(kind) && self.is_option_enabled(kind, pane_id)
    }

    /// Store a toggle value. Panes the toggle applies to are refreshed when
    /// the stored value actually changed.
    pub fn set_option_selected(&mut self, kind: OptionKind, value: bool) {
        self.actor.assert_current("Navigator::set_option_selected");
        if self.disposed {
            return;
        }
        if !self.options.write(kind, value) {
            return;
        }
        crate::debug_log!("OPTIONS", "{:?} set to {}", kind, value);

        if kind == OptionKind::AutoscrollFromSource && value {
            let focused = self.current_pane().is_some_and(|pane| pane.has_focus());
            if !focused {
                self.scroll_from_source(false);
            }
        }

        match kind.spec().refresh {
            Refresh::None => {}
            Refresh::Rebuild => self.refresh_panes(Some(kind), false),
            Refresh::RebuildWithComparator => self.refresh_panes(Some(kind), true),
        }
    }

    /// Set `kind` only if it applies to `pane_id`.
    pub fn set_option_for_pane(&mut self, kind: OptionKind, pane_id: &str, value: bool) -> bool {
        if !self.is_option_enabled(kind, pane_id) {
            return false;
        }
        self.set_option_selected(kind, value);
        true
    }

    /// Rebuild every live pane, keeping the active pane's selection.
    pub fn refresh(&mut self) {
        self.actor.assert_current("Navigator::refresh");
        if self.disposed {
            return;
        }
        self.refresh_panes(None, false);
    }

    /// Rebuild live panes; with `only_enabled` set, just those the toggle
    /// applies to.
    fn refresh_panes(&mut self, only_enabled: Option<OptionKind>, with_comparator: bool) {
        let panes: Vec<PaneHandle> = self
            .registry
            .live_panes()
            .into_iter()
            .filter(|pane| only_enabled.is_none_or(|kind| self.is_option_enabled(kind, pane.id())))
            .collect();
        let current_id = self.current_view_id().map(str::to_string);

        for pane in panes {
            let is_current = current_id.as_deref() == Some(pane.id());
            let keep = if is_current {
                pane.selected_elements().into_iter().next()
            } else {
                None
            };
            pane.update_from_root(with_comparator);
            if let Some(element) = keep {
                pane.select(&element, Some(element.file()), false);
            }
        }
    }
}
