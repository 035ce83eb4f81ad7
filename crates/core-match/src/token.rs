//! Whitespace-token substring matching with bucketed ordering.

use crate::list::MatchList;
use core_items::{Candidate, ItemId};
use core_text::CaseRule;

/// Ordering class of a token-mode match. Buckets are emitted in declaration
/// order; within a bucket candidates keep store order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Bucket {
    /// Text equals the raw, untokenized query.
    Exact,
    /// Priority candidate starting with the first token.
    PriorityPrefix,
    /// Any other candidate starting with the first token.
    Prefix,
    /// Contains every token somewhere.
    Substring,
}

/// Classify one candidate, or `None` when some token is missing from it.
///
/// `case` governs the exact and prefix comparisons; `substring_case` governs
/// the per-token containment test (the JSON source forces it insensitive).
pub fn classify(
    candidate: &Candidate,
    query: &str,
    tokens: &[&str],
    case: CaseRule,
    substring_case: CaseRule,
) -> Option<Bucket> {
    let text = candidate.text.as_str();
    if !tokens.iter().all(|t| substring_case.contains(text, t)) {
        return None;
    }
    let Some(&first) = tokens.first() else {
        return Some(Bucket::Substring);
    };
    let bucket = if case.eq(query, text) {
        Bucket::Exact
    } else if candidate.is_priority && case.starts_with(text, first) {
        Bucket::PriorityPrefix
    } else if case.starts_with(text, first) {
        Bucket::Prefix
    } else {
        Bucket::Substring
    };
    Some(bucket)
}

/// Rebuild a match list in token mode. An empty (or all-whitespace) query
/// puts every candidate in the substring bucket, i.e. store order.
pub fn token_match(
    items: &[Candidate],
    query: &str,
    case: CaseRule,
    substring_case: CaseRule,
) -> MatchList {
    let tokens: Vec<&str> = query.split_whitespace().collect();
    let mut buckets: [Vec<ItemId>; 4] = Default::default();
    for c in items {
        if let Some(bucket) = classify(c, query, &tokens, case, substring_case) {
            buckets[bucket as usize].push(c.id);
        }
    }
    let mut list = MatchList::with_capacity(items.len());
    for id in buckets.into_iter().flatten() {
        list.push_back(id, 0.0);
    }
    list
}
