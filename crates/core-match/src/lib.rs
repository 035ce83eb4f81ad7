//! Matching engine: rebuilds the ordered match list from the candidate set
//! and the current query.
//!
//! A rebuild is a pure function of `(candidates, query, mode, case rules)`.
//! The previous list is discarded wholesale, so there is no incremental
//! state to drift out of sync with the query.

pub mod fuzzy;
pub mod list;
pub mod token;

pub use fuzzy::{fuzzy_distance, highlight_positions};
pub use list::MatchList;
pub use token::Bucket;

use core_items::Candidate;
use core_text::CaseRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    #[default]
    Fuzzy,
    Token,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Matcher {
    pub mode: MatchMode,
    /// Rule for char comparison, exact and prefix tests.
    pub case: CaseRule,
    /// Rule for token containment tests.
    pub substring_case: CaseRule,
}

impl Matcher {
    pub fn new(mode: MatchMode, case: CaseRule) -> Self {
        Self {
            mode,
            case,
            substring_case: case,
        }
    }

    pub fn with_substring_case(mut self, substring_case: CaseRule) -> Self {
        self.substring_case = substring_case;
        self
    }

    /// Produce a fresh match list for `query`.
    pub fn rebuild(&self, items: &[Candidate], query: &str) -> MatchList {
        let list = match self.mode {
            MatchMode::Fuzzy => fuzzy::fuzzy_match(items, query, self.case),
            MatchMode::Token => {
                token::token_match(items, query, self.case, self.substring_case)
            }
        };
        tracing::debug!(
            target: "match",
            mode = ?self.mode,
            candidates = items.len(),
            matched = list.len(),
            query_len = query.len(),
            "match_rebuilt"
        );
        list
    }

    /// Char indices of `text` to highlight for `query`.
    pub fn highlight(&self, text: &str, query: &str) -> Vec<usize> {
        highlight_positions(text, query, self.case)
    }
}
