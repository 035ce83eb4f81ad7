//! Text primitives shared by the matching core and the terminal front-end.
//!
//! * [`width`]: display-width oracle ([`WidthOracle`]) and the terminal cell
//!   implementation used by the strip layout.
//! * [`case`]: the case-rule provider ([`CaseRule`]) consulted by every
//!   comparison the matching engines perform.
//! * [`query`]: the editable query line ([`QueryLine`]).
//! * [`grapheme`]: boundary helpers for cursor movement.

pub mod case;
pub mod query;
pub mod width;

pub use case::CaseRule;
pub use query::{DEFAULT_WORD_DELIMITERS, QUERY_CAPACITY, QueryLine};
pub use width::{CellWidth, WidthOracle, egc_width, str_width, truncate_to_width};

/// Grapheme boundary utilities. Pure helpers operating on a single line.
pub mod grapheme {
    use unicode_segmentation::UnicodeSegmentation;

    /// Iterate grapheme clusters in a line.
    pub fn iter(line: &str) -> impl Iterator<Item = &str> {
        line.graphemes(true)
    }

    /// Previous grapheme boundary (returns 0 if already at or below 1st boundary).
    pub fn prev_boundary(line: &str, byte: usize) -> usize {
        if byte == 0 || byte > line.len() {
            return 0;
        }
        let mut last = 0;
        for (idx, _) in line.grapheme_indices(true) {
            if idx >= byte {
                break;
            }
            last = idx;
        }
        last
    }

    /// Next grapheme boundary (returns line.len() if at or beyond end).
    pub fn next_boundary(line: &str, byte: usize) -> usize {
        if byte >= line.len() {
            return line.len();
        }
        for (idx, _) in line.grapheme_indices(true) {
            if idx > byte {
                return idx;
            }
        }
        line.len()
    }

    /// Visual column (terminal cells) up to, not including, `byte`.
    pub fn visual_col(line: &str, byte: usize) -> usize {
        let mut col = 0;
        for (idx, g) in line.grapheme_indices(true) {
            if idx >= byte {
                break;
            }
            col += crate::egc_width(g) as usize;
        }
        col
    }
}
