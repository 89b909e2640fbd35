//! Content binding: one displayable slot per (pane id, sub-id).
//!
//! Slots of one pane stay contiguous and follow the pane's declared sub-id
//! order. Panes are placed by ascending weight. The binding also tracks
//! which slot the host UI has selected; turning that into an active pane is
//! the navigator's job.

use crate::pane::NavigatorPane;

/// A tab in the navigator surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSlot {
    pub pane_id: String,
    /// `None` for panes that declare no sub-views
    pub sub_id: Option<String>,
    pub title: String,
    /// Weight of the owning pane, cached for ordering
    pub weight: i32,
    /// Group header shown before this slot. `Some("")` is a plain line.
    pub separator: Option<String>,
}

/// Entry of the "change view" menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMenuEntry {
    View {
        pane_id: String,
        sub_id: Option<String>,
        title: String,
    },
    Separator,
}

/// Ordered slots plus the selected index.
#[derive(Debug, Default)]
pub struct ContentBinding {
    slots: Vec<ContentSlot>,
    selected: Option<usize>,
}

impl ContentBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the slots for `pane` at its weight position.
    ///
    /// # Panics
    ///
    /// When another pane already bound here has the same weight. That is a
    /// configuration bug in the contributing plugin.
    pub fn add_pane(&mut self, pane: &dyn NavigatorPane) {
        let weight = pane.weight();
        let mut index = 0;
        while index < self.slots.len() {
            let existing = &self.slots[index];
            assert!(
                existing.weight != weight,
                "Navigator pane '{}' has the same weight ({}) as pane '{}'; \
                 every pane must declare a distinct weight",
                pane.id(),
                weight,
                existing.pane_id
            );
            if existing.weight > weight {
                break;
            }
            index += 1;
        }

        let sub_ids = pane.sub_ids();
        let new_slots: Vec<ContentSlot> = if sub_ids.is_empty() {
            vec![ContentSlot {
                pane_id: pane.id().to_string(),
                sub_id: None,
                title: pane.title(),
                weight,
                separator: None,
            }]
        } else {
            sub_ids
                .iter()
                .enumerate()
                .map(|(i, sub_id)| ContentSlot {
                    pane_id: pane.id().to_string(),
                    sub_id: Some(sub_id.clone()),
                    title: pane.presentable_sub_id_name(sub_id),
                    weight,
                    separator: (i == 0).then(|| pane.title()),
                })
                .collect()
        };

        let count = new_slots.len();
        self.slots.splice(index..index, new_slots);
        if let Some(selected) = self.selected
            && selected >= index
        {
            self.selected = Some(selected + count);
        }
        crate::debug_log!(
            "CONTENT",
            "added {} slot(s) for pane {} at index {}",
            count,
            pane.id(),
            index
        );
    }

    /// Give a slot that starts a new pane right after a sub-id group a plain
    /// separator, unless it already has a header.
    pub fn fix_separators(&mut self) {
        for i in 1..self.slots.len() {
            let (before, after) = self.slots.split_at_mut(i);
            let prev = &before[i - 1];
            let slot = &mut after[0];
            if slot.pane_id != prev.pane_id && prev.sub_id.is_some() && slot.separator.is_none() {
                slot.separator = Some(String::new());
            }
        }
    }

    /// Remove every slot of `pane_id`. Returns how many were removed.
    ///
    /// When the selected slot goes away the selection moves to the slot now
    /// at the same position (clamped), or to nothing when the binding is
    /// empty.
    pub fn remove_pane(&mut self, pane_id: &str) -> usize {
        let Some(first) = self.slots.iter().position(|s| s.pane_id == pane_id) else {
            return 0;
        };
        let before = self.slots.len();
        self.slots.retain(|s| s.pane_id != pane_id);
        let removed = before - self.slots.len();

        self.selected = match self.selected {
            Some(selected) if selected < first => Some(selected),
            Some(selected) if selected >= first + removed => Some(selected - removed),
            Some(_) if self.slots.is_empty() => None,
            Some(_) => Some(first.min(self.slots.len() - 1)),
            None => None,
        };
        removed
    }

    /// Mark `index` selected. Returns false for an out-of-range index.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.slots.len() {
            return false;
        }
        self.selected = Some(index);
        true
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&ContentSlot> {
        self.selected.and_then(|i| self.slots.get(i))
    }

    pub fn slots(&self) -> &[ContentSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains_pane(&self, pane_id: &str) -> bool {
        self.slots.iter().any(|s| s.pane_id == pane_id)
    }

    /// Slot whose id and sub-id both match exactly.
    pub fn find_slot(&self, pane_id: &str, sub_id: Option<&str>) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.pane_id == pane_id && s.sub_id.as_deref() == sub_id)
    }

    /// Slot for a view switch: with no sub-id, the pane's first slot.
    pub fn find_for_view(&self, pane_id: &str, sub_id: Option<&str>) -> Option<usize> {
        self.slots.iter().position(|s| {
            s.pane_id == pane_id && (sub_id.is_none() || s.sub_id.as_deref() == sub_id)
        })
    }

    /// "Change view" menu: every slot in order, with separators where the
    /// sub-id-ness flips or one sub-id group hands over to another pane's.
    pub fn view_menu(&self) -> Vec<ViewMenuEntry> {
        let mut entries = Vec::with_capacity(self.slots.len());
        let mut last: Option<&ContentSlot> = None;
        for slot in &self.slots {
            if let Some(prev) = last {
                let prev_grouped = prev.sub_id.is_some();
                let grouped = slot.sub_id.is_some();
                if prev_grouped != grouped || (prev_grouped && prev.pane_id != slot.pane_id) {
                    entries.push(ViewMenuEntry::Separator);
                }
            }
            entries.push(ViewMenuEntry::View {
                pane_id: slot.pane_id.clone(),
                sub_id: slot.sub_id.clone(),
                title: slot.title.clone(),
            });
            last = Some(slot);
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingPane;

    fn keys(binding: &ContentBinding) -> Vec<(String, Option<String>)> {
        binding
            .slots()
            .iter()
            .map(|s| (s.pane_id.clone(), s.sub_id.clone()))
            .collect()
    }

    fn key(id: &str, sub: Option<&str>) -> (String, Option<String>) {
        (id.to_string(), sub.map(str::to_string))
    }

    #[test]
    fn test_slots_ordered_by_weight() {
        let mut binding = ContentBinding::new();
        binding.add_pane(&RecordingPane::new("Files", 20));
        binding.add_pane(&RecordingPane::new("Project", 0));
        binding.add_pane(&RecordingPane::new("Packages", 10));

        let weights: Vec<i32> = binding.slots().iter().map(|s| s.weight).collect();
        assert_eq!(weights, vec![0, 10, 20]);
    }

    #[test]
    fn test_sub_ids_contiguous_with_title_separator() {
        let mut binding = ContentBinding::new();
        binding.add_pane(&RecordingPane::new("Project", 0));
        binding.add_pane(&RecordingPane::new("Scope", 5).with_sub_ids(&["All", "Tests"]));

        assert_eq!(
            keys(&binding),
            vec![
                key("Project", None),
                key("Scope", Some("All")),
                key("Scope", Some("Tests")),
            ]
        );
        assert_eq!(binding.slots()[1].separator.as_deref(), Some("Scope"));
        assert_eq!(binding.slots()[2].separator, None);
    }

    #[test]
    fn test_fix_separators_after_sub_id_group() {
        let mut binding = ContentBinding::new();
        binding.add_pane(&RecordingPane::new("Scope", 0).with_sub_ids(&["All"]));
        binding.add_pane(&RecordingPane::new("Files", 5));
        binding.fix_separators();

        assert_eq!(binding.slots()[1].separator.as_deref(), Some(""));
    }

    #[test]
    #[should_panic(expected = "same weight")]
    fn test_weight_collision_panics() {
        let mut binding = ContentBinding::new();
        binding.add_pane(&RecordingPane::new("A", 7));
        binding.add_pane(&RecordingPane::new("B", 7));
    }

    #[test]
    fn test_insert_before_selection_shifts_it() {
        let mut binding = ContentBinding::new();
        binding.add_pane(&RecordingPane::new("B", 10));
        binding.select(0);
        binding.add_pane(&RecordingPane::new("A", 0));
        assert_eq!(binding.selected().unwrap().pane_id, "B");
    }

    #[test]
    fn test_remove_selected_moves_to_neighbour() {
        let mut binding = ContentBinding::new();
        binding.add_pane(&RecordingPane::new("A", 0));
        binding.add_pane(&RecordingPane::new("B", 1).with_sub_ids(&["x", "y"]));
        binding.add_pane(&RecordingPane::new("C", 2));
        binding.select(2);

        assert_eq!(binding.remove_pane("B"), 2);
        assert_eq!(binding.selected().unwrap().pane_id, "C");

        assert_eq!(binding.remove_pane("C"), 1);
        assert_eq!(binding.selected().unwrap().pane_id, "A");

        binding.remove_pane("A");
        assert!(binding.selected().is_none());
        assert_eq!(binding.remove_pane("A"), 0);
    }

    #[test]
    fn test_find_slot_and_find_for_view() {
        let mut binding = ContentBinding::new();
        binding.add_pane(&RecordingPane::new("Scope", 0).with_sub_ids(&["All", "Tests"]));

        assert_eq!(binding.find_slot("Scope", Some("Tests")), Some(1));
        assert_eq!(binding.find_slot("Scope", None), None);
        assert_eq!(binding.find_for_view("Scope", None), Some(0));
        assert_eq!(binding.find_for_view("Scope", Some("Nope")), None);
    }

    #[test]
    fn test_view_menu_separators() {
        let mut binding = ContentBinding::new();
        binding.add_pane(&RecordingPane::new("Project", 0));
        binding.add_pane(&RecordingPane::new("Files", 1));
        binding.add_pane(&RecordingPane::new("Scope", 2).with_sub_ids(&["All", "Tests"]));
        binding.add_pane(&RecordingPane::new("Favorites", 3).with_sub_ids(&["Mine"]));

        let separators: Vec<usize> = binding
            .view_menu()
            .iter()
            .enumerate()
            .filter(|(_, e)| **e == ViewMenuEntry::Separator)
            .map(|(i, _)| i)
            .collect();
        // Project, Files | All, Tests | Mine
        assert_eq!(separators, vec![2, 5]);
    }
}
