//! Externally supplied priority strings.

use core_text::CaseRule;

/// Set of priority prefixes. Membership is the "starts-with-within-shorter-length"
/// test: an entry and a candidate match when they agree on the first
/// `min(len(entry), len(candidate))` chars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrioritySet {
    entries: Vec<String>,
}

impl PrioritySet {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a comma separated list. Empty fields are skipped.
    pub fn parse(csv: &str) -> Self {
        Self::new(csv.split(',').filter(|s| !s.is_empty()))
    }

    pub fn extend<I, S>(&mut self, more: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.extend(more.into_iter().map(Into::into));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, text: &str, case: CaseRule) -> bool {
        self.entries
            .iter()
            .any(|entry| case.eq_within_shorter(entry, text))
    }
}
