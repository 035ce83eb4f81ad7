//! Multi-select overlay keyed by candidate id.
//!
//! Slots are kept in selection order. Deselecting leaves a tombstone (`None`)
//! in place; the next selection reuses the first tombstone before growing the
//! slot vector. The set never looks at the match list, so selections survive
//! any amount of re-filtering.

use core_items::ItemId;
use tracing::trace;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    slots: Vec<Option<ItemId>>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`. Returns the new membership state.
    pub fn toggle(&mut self, id: ItemId) -> bool {
        if let Some(slot) = self.slots.iter_mut().find(|s| **s == Some(id)) {
            *slot = None;
            trace!(target: "state.selection", id, "selection_removed");
            return false;
        }
        match self.slots.iter_mut().find(|s| s.is_none()) {
            Some(tombstone) => *tombstone = Some(id),
            None => self.slots.push(Some(id)),
        }
        trace!(target: "state.selection", id, slots = self.slots.len(), "selection_added");
        true
    }

    pub fn is_selected(&self, id: ItemId) -> bool {
        self.slots.contains(&Some(id))
    }

    /// Live ids in slot order.
    pub fn selected(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.slots.iter().filter_map(|s| *s)
    }

    pub fn len(&self) -> usize {
        self.selected().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Slot vector including tombstones.
    #[cfg(test)]
    fn slots(&self) -> &[Option<ItemId>] {
        &self.slots
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn toggle_adds_and_removes() {
        let mut s = SelectionSet::new();
        assert!(s.toggle(3));
        assert!(s.is_selected(3));
        assert!(!s.toggle(3));
        assert!(!s.is_selected(3));
        assert!(s.is_empty());
        assert_eq!(s.slots(), &[None]);
    }

    #[test]
    fn first_tombstone_is_reused() {
        let mut s = SelectionSet::new();
        s.toggle(1);
        s.toggle(2);
        s.toggle(3);
        s.toggle(1);
        s.toggle(2);
        assert_eq!(s.slots(), &[None, None, Some(3)]);
        s.toggle(9);
        assert_eq!(s.slots(), &[Some(9), None, Some(3)]);
        assert_eq!(s.selected().collect::<Vec<_>>(), vec![9, 3]);
        assert_eq!(s.len(), 2);
    }
}
