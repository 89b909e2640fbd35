//! Pure helpers behind registry reloads.
//!
//! Nothing here touches a lock or a feed, so the rules are tested on plain
//! pane lists.

use crate::pane::{PaneHandle, same_pane};
use std::collections::{HashMap, HashSet};

/// What a reload has to do to the registry.
#[derive(Default)]
pub struct ReloadPlan {
    /// Old panes that are no longer contributed (or were replaced by another
    /// instance with the same id). Disposed by the caller.
    pub removed: Vec<PaneHandle>,
    /// Newly contributed, initially-visible panes to register.
    pub added: Vec<PaneHandle>,
}

impl ReloadPlan {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }
}

impl std::fmt::Debug for ReloadPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids = |panes: &[PaneHandle]| panes.iter().map(|p| p.id().to_string()).collect::<Vec<_>>();
        f.debug_struct("ReloadPlan")
            .field("removed", &ids(&self.removed))
            .field("added", &ids(&self.added))
            .finish()
    }
}

/// Drop panes whose id was already seen. The first occurrence wins and every
/// later one is returned in the second list.
pub fn dedup_by_id(panes: Vec<PaneHandle>) -> (Vec<PaneHandle>, Vec<PaneHandle>) {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(panes.len());
    let mut dropped = Vec::new();
    for pane in panes {
        if seen.insert(pane.id().to_string()) {
            kept.push(pane);
        } else {
            dropped.push(pane);
        }
    }
    (kept, dropped)
}

/// Sort by weight (stable), then dedup. The shape the feed is consumed in.
pub fn normalize_feed(mut panes: Vec<PaneHandle>) -> Vec<PaneHandle> {
    panes.sort_by_key(|pane| pane.weight());
    let (kept, dropped) = dedup_by_id(panes);
    for pane in &dropped {
        log::warn!(
            "Pane feed contributed duplicate id '{}'; keeping the first one",
            pane.id()
        );
    }
    kept
}

/// Compare the registry's panes (`old`, live and buffered) with the feed's
/// normalized set (`desired`) by identity.
pub fn diff_panes(old: &[PaneHandle], desired: &[PaneHandle]) -> ReloadPlan {
    let by_id: HashMap<&str, &PaneHandle> = desired.iter().map(|p| (p.id(), p)).collect();

    let mut plan = ReloadPlan::default();
    let mut kept: Vec<&PaneHandle> = Vec::new();
    for pane in old {
        match by_id.get(pane.id()) {
            Some(wanted) if same_pane(wanted, pane) => kept.push(pane),
            _ => plan.removed.push(pane.clone()),
        }
    }

    for pane in desired {
        let present = kept.iter().any(|k| same_pane(k, pane));
        if !present && pane.is_initially_visible() {
            plan.added.push(pane.clone());
        }
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingPane;

    fn ids(panes: &[PaneHandle]) -> Vec<&str> {
        panes.iter().map(|p| p.id()).collect()
    }

    #[test]
    fn test_dedup_keeps_first_seen() {
        let first = RecordingPane::new("Project", 0).handle();
        let second = RecordingPane::new("Project", 5).handle();
        let other = RecordingPane::new("Scope", 1).handle();

        let (kept, dropped) = dedup_by_id(vec![first.clone(), other, second.clone()]);
        assert_eq!(ids(&kept), vec!["Project", "Scope"]);
        assert!(same_pane(&kept[0], &first));
        assert_eq!(dropped.len(), 1);
        assert!(same_pane(&dropped[0], &second));
    }

    #[test]
    fn test_normalize_sorts_before_dedup() {
        let heavy = RecordingPane::new("Project", 9).handle();
        let light = RecordingPane::new("Project", 1).handle();
        let files = RecordingPane::new("Files", 4).handle();

        let kept = normalize_feed(vec![heavy, files, light.clone()]);
        assert_eq!(ids(&kept), vec!["Project", "Files"]);
        assert!(same_pane(&kept[0], &light));
    }

    #[test]
    fn test_diff_same_instances_is_empty() {
        let a = RecordingPane::new("A", 0).handle();
        let b = RecordingPane::new("B", 1).handle();
        let plan = diff_panes(&[a.clone(), b.clone()], &[a, b]);
        assert!(plan.is_empty());
    }

    #[test]
    fn test_diff_removed_and_added() {
        let a = RecordingPane::new("A", 0).handle();
        let b = RecordingPane::new("B", 1).handle();
        let c = RecordingPane::new("C", 2).handle();

        let plan = diff_panes(&[a.clone(), b], &[a, c]);
        assert_eq!(ids(&plan.removed), vec!["B"]);
        assert_eq!(ids(&plan.added), vec!["C"]);
    }

    #[test]
    fn test_diff_replaced_instance_with_same_id() {
        let old = RecordingPane::new("A", 0).handle();
        let new = RecordingPane::new("A", 0).handle();

        let plan = diff_panes(&[old.clone()], &[new.clone()]);
        assert!(same_pane(&plan.removed[0], &old));
        assert!(same_pane(&plan.added[0], &new));
    }

    #[test]
    fn test_diff_skips_hidden_new_panes() {
        let hidden = RecordingPane::new("Hidden", 3).hidden().handle();
        let plan = diff_panes(&[], &[hidden]);
        assert!(plan.added.is_empty());
    }
}
