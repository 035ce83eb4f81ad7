//! Display width measurement.
//!
//! The pagination cursor never measures text on its own; it asks a
//! [`WidthOracle`]. The terminal front-end supplies [`CellWidth`], which sums
//! per-grapheme terminal cell widths and adds a fixed horizontal padding, the
//! same way a pixel renderer would add left/right padding around each item.
//!
//! Width precedence for one grapheme cluster (EGC):
//! 1. ASCII fast path (always 1).
//! 2. Pictographic or regional-indicator signal anywhere in the cluster (2).
//! 3. Any East Asian wide/fullwidth codepoint (2).
//! 4. Everything else, including base + combining marks (1).
//!
//! Invariants:
//! - `egc_width("") == 0`.
//! - The classifier over-estimates rather than under-estimates: an extra blank
//!   cell is harmless, a missing one shifts every later item on the strip.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

/// Pure text measurement used by the pagination cursor and initial layout.
///
/// Implementations must be deterministic for a given input; the cursor calls
/// `measure` repeatedly for the same items while walking pages.
pub trait WidthOracle {
    fn measure(&self, text: &str) -> u32;
}

impl<F> WidthOracle for F
where
    F: Fn(&str) -> u32,
{
    fn measure(&self, text: &str) -> u32 {
        self(text)
    }
}

/// Terminal cell oracle: sum of grapheme widths plus `padding` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellWidth {
    pub padding: u32,
}

impl CellWidth {
    pub const fn new(padding: u32) -> Self {
        Self { padding }
    }
}

impl Default for CellWidth {
    fn default() -> Self {
        // One blank cell on each side of an item.
        Self::new(2)
    }
}

impl WidthOracle for CellWidth {
    fn measure(&self, text: &str) -> u32 {
        str_width(text) + self.padding
    }
}

// Regional Indicator range
fn is_regional_indicator(c: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}

// Rough Extended Pictographic heuristic (main emoji blocks + misc symbols/dingbats)
fn is_extended_pictographic(c: char) -> bool {
    ('\u{1F300}'..='\u{1FAFF}').contains(&c) || ('\u{2600}'..='\u{27BF}').contains(&c)
}

/// Display width in terminal cells of a single grapheme cluster.
#[inline]
pub fn egc_width(egc: &str) -> u16 {
    if egc.is_empty() {
        return 0;
    }
    if egc.len() == 1 {
        // Single byte => ASCII; control characters still occupy a cell when drawn as-is.
        return 1;
    }
    let mut any_wide = false;
    for c in egc.chars() {
        if is_extended_pictographic(c) || is_regional_indicator(c) {
            return 2;
        }
        if c.width().unwrap_or(1) == 2 {
            any_wide = true;
        }
    }
    if any_wide { 2 } else { 1 }
}

/// Display width of an arbitrary string (sum over its grapheme clusters).
pub fn str_width(s: &str) -> u32 {
    s.graphemes(true).map(|g| u32::from(egc_width(g))).sum()
}

/// Longest prefix of `s` (on a grapheme boundary) whose width does not exceed `max`.
pub fn truncate_to_width(s: &str, max: u32) -> &str {
    let mut used = 0u32;
    for (idx, g) in s.grapheme_indices(true) {
        let w = u32::from(egc_width(g));
        if used + w > max {
            return &s[..idx];
        }
        used += w;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii() {
        assert_eq!(egc_width("a"), 1);
        assert_eq!(str_width("apple"), 5);
    }

    #[test]
    fn wide_cjk() {
        assert_eq!(egc_width("界"), 2);
        assert_eq!(str_width("世界"), 4);
    }

    #[test]
    fn emoji_and_flags_are_wide() {
        assert_eq!(egc_width("😀"), 2);
        assert_eq!(egc_width("🇺🇸"), 2);
        assert_eq!(egc_width("👨‍👩‍👧‍👦"), 2);
    }

    #[test]
    fn combining_acute_is_narrow() {
        assert_eq!(egc_width("e\u{0301}"), 1);
    }

    #[test]
    fn cell_oracle_adds_padding() {
        let oracle = CellWidth::new(2);
        assert_eq!(oracle.measure(""), 2);
        assert_eq!(oracle.measure("abc"), 5);
        assert_eq!(oracle.measure("界"), 4);
    }

    #[test]
    fn closures_are_oracles() {
        let fixed = |_: &str| 7u32;
        assert_eq!(fixed.measure("anything"), 7);
    }

    #[test]
    fn truncate_respects_grapheme_boundaries() {
        assert_eq!(truncate_to_width("abcdef", 3), "abc");
        assert_eq!(truncate_to_width("a界b", 2), "a");
        assert_eq!(truncate_to_width("a界b", 3), "a界");
        assert_eq!(truncate_to_width("short", 80), "short");
    }
}
