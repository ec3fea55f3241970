//! Row selection over the visible page of results
//!
//! Selection is ephemeral (never written to the URL) and capped. Every
//! operation is total: hitting the cap silently stops adding ids.

use std::collections::BTreeSet;

/// Hard ceiling on the number of selected rows
pub const MAX_SELECTION: usize = 50;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionManager {
    selected: BTreeSet<u64>,
    /// Index (in the visible list) of the last toggled row, for shift-click
    last_index: Option<usize>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a row.
    ///
    /// With `shift` and a previous index, every visible id between the two
    /// indices (inclusive, either direction) is added until the cap.
    /// Otherwise the single id flips membership.
    pub fn toggle(&mut self, id: u64, index: usize, visible: &[u64], shift: bool) {
        match self.last_index {
            Some(last) if shift && !visible.is_empty() => {
                let start = last.min(index).min(visible.len() - 1);
                let end = last.max(index).min(visible.len() - 1);
                for row in &visible[start..=end] {
                    if !self.insert(*row) {
                        break;
                    }
                }
            }
            _ => {
                if !self.selected.remove(&id) {
                    self.insert(id);
                }
            }
        }
        self.last_index = Some(index);
    }

    /// Select every visible row, or deselect exactly the visible rows when all
    /// of them are already selected. Rows selected on other pages are kept.
    pub fn select_all_visible(&mut self, visible: &[u64]) {
        if self.is_all_selected(visible) {
            for id in visible {
                self.selected.remove(id);
            }
        } else {
            for id in visible {
                if !self.insert(*id) {
                    break;
                }
            }
        }
        self.last_index = None;
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.last_index = None;
    }

    /// Every visible row is selected (false for an empty page)
    pub fn is_all_selected(&self, visible: &[u64]) -> bool {
        !visible.is_empty() && visible.iter().all(|id| self.selected.contains(id))
    }

    /// Some, but not all, visible rows are selected
    pub fn is_indeterminate(&self, visible: &[u64]) -> bool {
        let count = visible.iter().filter(|id| self.selected.contains(id)).count();
        count > 0 && count < visible.len()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.selected.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.selected.len() >= MAX_SELECTION
    }

    /// Selected ids in ascending order
    pub fn selected_ids(&self) -> Vec<u64> {
        self.selected.iter().copied().collect()
    }

    pub fn last_index(&self) -> Option<usize> {
        self.last_index
    }

    /// Returns `false` once the cap is reached; an already-selected id counts
    /// as inserted.
    fn insert(&mut self, id: u64) -> bool {
        if self.selected.contains(&id) {
            return true;
        }
        if self.is_full() {
            return false;
        }
        self.selected.insert(id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(range: std::ops::RangeInclusive<u64>) -> Vec<u64> {
        range.collect()
    }

    #[test]
    fn test_shift_click_extends_range() {
        // a..j
        let visible = ids(1..=10);
        let mut selection = SelectionManager::new();

        selection.toggle(3, 2, &visible, false);
        assert_eq!(selection.selected_ids(), vec![3]);

        selection.toggle(8, 7, &visible, true);
        assert_eq!(selection.selected_ids(), vec![3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_shift_click_backwards() {
        let visible = ids(1..=10);
        let mut selection = SelectionManager::new();
        selection.toggle(9, 8, &visible, false);
        selection.toggle(6, 5, &visible, true);
        assert_eq!(selection.selected_ids(), vec![6, 7, 8, 9]);
    }

    #[test]
    fn test_shift_without_anchor_toggles_single() {
        let visible = ids(1..=10);
        let mut selection = SelectionManager::new();
        selection.toggle(5, 4, &visible, true);
        assert_eq!(selection.selected_ids(), vec![5]);
    }

    #[test]
    fn test_toggle_removes() {
        let visible = ids(1..=3);
        let mut selection = SelectionManager::new();
        selection.toggle(2, 1, &visible, false);
        selection.toggle(2, 1, &visible, false);
        assert!(selection.is_empty());
        assert_eq!(selection.last_index(), Some(1));
    }

    #[test]
    fn test_select_all_caps_in_list_order() {
        let visible = ids(1..=60);
        let mut selection = SelectionManager::new();
        selection.select_all_visible(&visible);
        assert_eq!(selection.len(), MAX_SELECTION);
        assert_eq!(selection.selected_ids(), ids(1..=50));
        assert!(selection.is_indeterminate(&visible));
        assert!(!selection.is_all_selected(&visible));
    }

    #[test]
    fn test_toggle_respects_cap() {
        let visible = ids(1..=60);
        let mut selection = SelectionManager::new();
        selection.select_all_visible(&visible);
        selection.toggle(55, 54, &visible, false);
        assert!(!selection.contains(55));
        assert_eq!(selection.len(), MAX_SELECTION);

        // Removing still works at the cap
        selection.toggle(10, 9, &visible, false);
        assert_eq!(selection.len(), MAX_SELECTION - 1);
    }

    #[test]
    fn test_shift_range_stops_at_cap() {
        let visible = ids(1..=100);
        let mut selection = SelectionManager::new();
        selection.toggle(1, 0, &visible, false);
        selection.toggle(100, 99, &visible, true);
        assert_eq!(selection.selected_ids(), ids(1..=50));
    }

    #[test]
    fn test_select_all_toggles_only_visible_page() {
        let page_one = ids(1..=10);
        let page_two = ids(11..=20);
        let mut selection = SelectionManager::new();
        selection.toggle(3, 2, &page_one, false);

        selection.select_all_visible(&page_two);
        assert!(selection.is_all_selected(&page_two));
        assert!(!selection.is_indeterminate(&page_two));
        assert_eq!(selection.last_index(), None);

        selection.select_all_visible(&page_two);
        assert_eq!(selection.selected_ids(), vec![3]);
        assert!(!selection.is_all_selected(&page_two));
        assert!(!selection.is_indeterminate(&page_two));
    }

    #[test]
    fn test_predicates_ignore_offscreen_selection() {
        let mut selection = SelectionManager::new();
        selection.toggle(99, 0, &[99], false);
        let visible = ids(1..=5);
        assert!(!selection.is_indeterminate(&visible));
        assert!(!selection.is_all_selected(&visible));
        assert!(!selection.is_all_selected(&[]));
    }
}
