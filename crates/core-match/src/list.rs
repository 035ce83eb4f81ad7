//! Ordered match list stored as an index-linked arena.
//!
//! Each slot in `links` corresponds to the candidate with the same
//! [`ItemId`]. A candidate is a member of the list when its slot is `linked`;
//! `left`/`right` then name its neighbours by id. Nothing here owns a
//! candidate, so rebuilding the list on every keystroke cannot leave a
//! dangling reference behind.
//!
//! Invariants (checked by [`MatchList::is_consistent`]):
//! * `a.right == Some(b)` iff `b.left == Some(a)`.
//! * Walking `right` from `head` visits exactly `len` distinct members and
//!   ends at `tail`; the list is linear and acyclic.
//! * Each candidate appears at most once.

use core_items::ItemId;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Link {
    left: Option<ItemId>,
    right: Option<ItemId>,
    distance: f64,
    linked: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchList {
    links: Vec<Link>,
    head: Option<ItemId>,
    tail: Option<ItemId>,
    len: usize,
}

impl MatchList {
    /// Empty list with arena slots pre-sized for a store of `capacity` candidates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            links: vec![Link::default(); capacity],
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Append `id` at the tail. A candidate that is already linked is ignored.
    pub fn push_back(&mut self, id: ItemId, distance: f64) {
        if id >= self.links.len() {
            self.links.resize(id + 1, Link::default());
        }
        if self.links[id].linked {
            debug_assert!(false, "candidate {id} linked twice");
            return;
        }
        self.links[id] = Link {
            left: self.tail,
            right: None,
            distance,
            linked: true,
        };
        match self.tail {
            Some(tail) => self.links[tail].right = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
    }

    pub fn head(&self) -> Option<ItemId> {
        self.head
    }

    pub fn tail(&self) -> Option<ItemId> {
        self.tail
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.links.get(id).is_some_and(|l| l.linked)
    }

    pub fn left(&self, id: ItemId) -> Option<ItemId> {
        self.link(id).and_then(|l| l.left)
    }

    pub fn right(&self, id: ItemId) -> Option<ItemId> {
        self.link(id).and_then(|l| l.right)
    }

    pub fn distance(&self, id: ItemId) -> Option<f64> {
        self.link(id).map(|l| l.distance)
    }

    fn link(&self, id: ItemId) -> Option<&Link> {
        self.links.get(id).filter(|l| l.linked)
    }

    /// Walk the list head to tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    /// Walk from `start` (inclusive) toward the tail.
    pub fn iter_from(&self, start: Option<ItemId>) -> Iter<'_> {
        Iter {
            list: self,
            cursor: start.filter(|&id| self.contains(id)),
        }
    }

    /// 1-based position of `id` counted from the head.
    pub fn rank(&self, id: ItemId) -> Option<usize> {
        self.iter().position(|x| x == id).map(|p| p + 1)
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.iter().collect()
    }

    /// Verify the structural invariants listed in the module docs.
    pub fn is_consistent(&self) -> bool {
        let mut seen = vec![false; self.links.len()];
        let mut prev: Option<ItemId> = None;
        let mut cursor = self.head;
        let mut count = 0usize;
        while let Some(id) = cursor {
            let Some(link) = self.link(id) else {
                return false;
            };
            if seen[id] || link.left != prev {
                return false;
            }
            seen[id] = true;
            count += 1;
            prev = Some(id);
            cursor = link.right;
        }
        let linked_total = self.links.iter().filter(|l| l.linked).count();
        prev == self.tail && count == self.len && linked_total == self.len
    }
}

pub struct Iter<'a> {
    list: &'a MatchList,
    cursor: Option<ItemId>,
}

impl Iterator for Iter<'_> {
    type Item = ItemId;

    fn next(&mut self) -> Option<ItemId> {
        let id = self.cursor?;
        self.cursor = self.list.right(id);
        Some(id)
    }
}
