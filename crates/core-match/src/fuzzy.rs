//! Fuzzy subsequence matching.
//!
//! A candidate matches when every query char appears in it in order. The
//! scan is greedy: each query char binds to its earliest occurrence after the
//! previous binding, so the reported span is the leftmost one, not the
//! tightest. Lower distance ranks earlier; ties keep store order.

use crate::list::MatchList;
use core_items::Candidate;
use core_text::CaseRule;

/// Distance of `text` from `query`, or `None` when `query` is not a
/// subsequence of `text`.
///
/// For a span starting at char `start`, ending at char `end`, with `q` query
/// chars the distance is `ln(start + 2) + 1 + (end - start - q)`, which is
/// always positive. Priority candidates score `0.0`.
pub fn fuzzy_distance(text: &str, query: &str, is_priority: bool, case: CaseRule) -> Option<f64> {
    let needle: Vec<char> = query.chars().collect();
    if needle.is_empty() {
        return Some(0.0);
    }
    let (start, end) = greedy_span(text, &needle, case)?;
    if is_priority {
        return Some(0.0);
    }
    let gap = end as f64 - start as f64 - needle.len() as f64;
    Some(1.0 + ((start + 2) as f64).ln() + gap)
}

/// Char positions (first, last) of the greedy left-to-right binding.
fn greedy_span(text: &str, needle: &[char], case: CaseRule) -> Option<(usize, usize)> {
    let mut pending = needle.iter().peekable();
    let mut start = None;
    for (idx, ch) in text.chars().enumerate() {
        let Some(&&want) = pending.peek() else {
            break;
        };
        if case.chars_eq(ch, want) {
            start.get_or_insert(idx);
            pending.next();
            if pending.peek().is_none() {
                return start.map(|s| (s, idx));
            }
        }
    }
    None
}

/// Rebuild a match list in fuzzy mode.
///
/// An empty query keeps every candidate in store order with distance zero.
/// Otherwise matches are stably sorted by ascending distance.
pub fn fuzzy_match(items: &[Candidate], query: &str, case: CaseRule) -> MatchList {
    let mut list = MatchList::with_capacity(items.len());
    if query.is_empty() {
        for c in items {
            list.push_back(c.id, 0.0);
        }
        return list;
    }
    let mut scored: Vec<(usize, f64)> = items
        .iter()
        .filter_map(|c| fuzzy_distance(&c.text, query, c.is_priority, case).map(|d| (c.id, d)))
        .collect();
    // Stable: equal distances keep store order.
    scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    for (id, distance) in scored {
        list.push_back(id, distance);
    }
    list
}

/// Char indices of `text` to highlight for `query`: the greedy binding of
/// each query char in turn, stopping once the query is exhausted. Partial
/// bindings are returned as-is, so a non-matching candidate may still get
/// highlights for the prefix of the query it does contain.
pub fn highlight_positions(text: &str, query: &str, case: CaseRule) -> Vec<usize> {
    let mut pending = query.chars().peekable();
    let mut out = Vec::new();
    for (idx, ch) in text.chars().enumerate() {
        let Some(&want) = pending.peek() else {
            break;
        };
        if case.chars_eq(ch, want) {
            out.push(idx);
            pending.next();
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_items::{ItemStore, PrioritySet};

    fn store(lines: &[&str]) -> ItemStore {
        ItemStore::from_lines(lines.iter().copied(), &PrioritySet::default(), CaseRule::Sensitive)
    }

    fn texts<'a>(store: &'a ItemStore, list: &MatchList) -> Vec<&'a str> {
        list.iter().filter_map(|id| store.text(id)).collect()
    }

    #[test]
    fn distance_formula() {
        // "ap" in "apple": start 0, end 1 -> 1 + ln 2 + (1 - 0 - 2)
        let d = fuzzy_distance("apple", "ap", false, CaseRule::Sensitive).unwrap();
        assert!((d - 2f64.ln()).abs() < 1e-9);
        // "ae" in "apple": start 0, end 4 -> 1 + ln 2 + 2
        let d = fuzzy_distance("apple", "ae", false, CaseRule::Sensitive).unwrap();
        assert!((d - (3.0 + 2f64.ln())).abs() < 1e-9);
        assert_eq!(fuzzy_distance("apple", "pa", false, CaseRule::Sensitive), None);
    }

    #[test]
    fn priority_scores_zero() {
        assert_eq!(fuzzy_distance("xxxxapple", "ae", true, CaseRule::Sensitive), Some(0.0));
        assert_eq!(fuzzy_distance("banana", "ae", true, CaseRule::Sensitive), None);
    }

    #[test]
    fn greedy_span_is_leftmost_not_tightest() {
        // "ab" binds a@0 and b@3 even though "ab" also occurs at 4..5.
        let loose = fuzzy_distance("axxbab", "ab", false, CaseRule::Sensitive).unwrap();
        let tight = fuzzy_distance("ab", "ab", false, CaseRule::Sensitive).unwrap();
        assert!(loose > tight);
    }

    #[test]
    fn empty_query_keeps_everything_in_order() {
        let s = store(&["b", "a", "c"]);
        let list = fuzzy_match(s.as_slice(), "", CaseRule::Sensitive);
        assert_eq!(texts(&s, &list), vec!["b", "a", "c"]);
        assert!(list.iter().all(|id| list.distance(id) == Some(0.0)));
    }

    #[test]
    fn sorted_by_distance_with_stable_ties() {
        let s = store(&["apple", "apricot", "banana"]);
        let list = fuzzy_match(s.as_slice(), "ap", CaseRule::Sensitive);
        assert_eq!(texts(&s, &list), vec!["apple", "apricot"]);

        let s = store(&["xab", "ab", "a_b", "zab"]);
        let list = fuzzy_match(s.as_slice(), "ab", CaseRule::Sensitive);
        assert_eq!(texts(&s, &list), vec!["ab", "xab", "zab", "a_b"]);
    }

    #[test]
    fn insensitive_fuzzy() {
        let s = store(&["Apple", "bAnAnA"]);
        let list = fuzzy_match(s.as_slice(), "aa", CaseRule::Insensitive);
        assert_eq!(texts(&s, &list), vec!["bAnAnA"]);
        let list = fuzzy_match(s.as_slice(), "AP", CaseRule::Insensitive);
        assert_eq!(texts(&s, &list), vec!["Apple"]);
    }

    #[test]
    fn highlights_follow_greedy_binding() {
        assert_eq!(highlight_positions("apricot", "ac", CaseRule::Sensitive), vec![0, 4]);
        assert_eq!(highlight_positions("xyz", "q", CaseRule::Sensitive), Vec::<usize>::new());
        assert_eq!(highlight_positions("héllo", "él", CaseRule::Sensitive), vec![1, 2]);
        assert!(highlight_positions("abc", "", CaseRule::Sensitive).is_empty());
    }
}
