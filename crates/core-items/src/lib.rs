//! Item Store: the full, unfiltered candidate set.
//!
//! The store owns every [`Candidate`] as a flat `Vec` and hands out dense,
//! zero-based ids equal to each candidate's index. Matching never copies or
//! mutates candidates; it only refers to them by [`ItemId`].
//!
//! Invariants:
//! * `store.get(id).unwrap().id == id` for every `id < store.len()`.
//! * Ids are stable for the lifetime of the store and never reused.
//! * `json_ref` is `Some` only for stores built from a keyed object.

use core_text::{CaseRule, WidthOracle};
use serde_json::Value;

mod priority;
mod source;

pub use priority::PrioritySet;
pub use source::{SourceError, load_json_file, parse_json_object};

/// Index of a candidate inside its [`ItemStore`].
pub type ItemId = usize;

/// One selectable text entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub text: String,
    pub id: ItemId,
    pub is_priority: bool,
    /// Value paired with `text` when the source was a keyed object.
    pub json_ref: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemStore {
    items: Vec<Candidate>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an ordered sequence of lines. Each line's priority flag is
    /// the bounded-compare membership test against `priority`.
    pub fn from_lines<I, S>(lines: I, priority: &PrioritySet, case: CaseRule) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut store = Self::new();
        for line in lines {
            let text = line.into();
            let is_priority = priority.contains(&text, case);
            store.push(text, is_priority, None);
        }
        tracing::debug!(
            target: "items",
            count = store.len(),
            priority = store.items.iter().filter(|c| c.is_priority).count(),
            "store_from_lines"
        );
        store
    }

    /// Build from a keyed object: keys become text, values are retained as
    /// `json_ref`. Order is the object's own iteration order.
    pub fn from_json_object(object: &serde_json::Map<String, Value>) -> Self {
        let mut store = Self::new();
        for (key, value) in object {
            store.push(key.clone(), false, Some(value.clone()));
        }
        tracing::debug!(target: "items", count = store.len(), "store_from_json");
        store
    }

    /// Read newline-separated candidates from a reader (typically stdin).
    pub fn read_lines<R: std::io::BufRead>(
        reader: R,
        priority: &PrioritySet,
        case: CaseRule,
    ) -> Result<Self, SourceError> {
        let lines = source::collect_lines(reader)?;
        Ok(Self::from_lines(lines, priority, case))
    }

    fn push(&mut self, text: String, is_priority: bool, json_ref: Option<Value>) {
        let id = self.items.len();
        self.items.push(Candidate {
            text,
            id,
            is_priority,
            json_ref,
        });
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&Candidate> {
        self.items.get(id)
    }

    pub fn text(&self, id: ItemId) -> Option<&str> {
        self.items.get(id).map(|c| c.text.as_str())
    }

    pub fn as_slice(&self) -> &[Candidate] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.items.iter()
    }

    /// Widest candidate according to `oracle` (0 for an empty store). Used
    /// for initial input-field sizing.
    pub fn max_width(&self, oracle: &dyn WidthOracle) -> u32 {
        self.items
            .iter()
            .map(|c| oracle.measure(&c.text))
            .max()
            .unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a ItemStore {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
