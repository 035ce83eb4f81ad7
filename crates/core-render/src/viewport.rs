//! Menu geometry derived from the terminal size.
//!
//! Row 0 always holds the prompt, the query input and the counter. In strip
//! mode the page follows the input on the same row between `<` and `>`
//! markers; in grid mode the page occupies `rows` lines below it, indented by
//! the prompt width and split into `columns` equal columns.

use core_state::Layout;
use core_text::str_width;

/// Cells added around every drawn label (one blank on each side).
pub const PADDING: u16 = 2;
/// Width of the `<` and `>` page markers including padding.
pub const ARROW_WIDTH: u16 = 1 + PADDING;

/// Requested grid shape; `lines == 0` selects the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuShape {
    pub lines: u32,
    pub columns: u32,
}

impl MenuShape {
    /// The grid never has more rows than candidates; with none left it
    /// collapses to the strip.
    pub fn fit_candidates(self, candidates: usize) -> Self {
        let lines = self.lines.min(u32::try_from(candidates).unwrap_or(u32::MAX));
        if lines == 0 {
            Self::default()
        } else {
            Self {
                lines,
                columns: self.columns,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    /// Rows used by the menu: 1 for the strip, `rows + 1` for the grid.
    pub height: u16,
    pub prompt_w: u16,
    /// Input field width in strip mode.
    pub input_w: u16,
    pub layout: Layout,
}

impl Viewport {
    /// `max_item_w` is the widest candidate including padding; the strip input
    /// field takes that width capped at a third of the terminal.
    pub fn compute(
        size: (u16, u16),
        prompt: Option<&str>,
        shape: MenuShape,
        max_item_w: u32,
    ) -> Self {
        let (width, term_rows) = size;
        let prompt_w = match prompt {
            Some(p) if !p.is_empty() => label_width(p),
            _ => 0,
        };
        let input_w = u32::from(width / 3).min(max_item_w) as u16;
        if shape.lines > 0 {
            let rows = shape.lines.min(u32::from(term_rows.saturating_sub(1))).max(1);
            let columns = shape.columns.max(1);
            return Self {
                width,
                height: rows as u16 + 1,
                prompt_w,
                input_w,
                layout: Layout::Grid {
                    rows,
                    columns,
                    row_height: 1,
                },
            };
        }
        let reserved = u32::from(prompt_w) + u32::from(input_w) + 2 * u32::from(ARROW_WIDTH);
        let budget = u32::from(width).saturating_sub(reserved).max(1);
        Self {
            width,
            height: 1,
            prompt_w,
            input_w,
            layout: Layout::Strip { budget },
        }
    }

    pub fn is_grid(&self) -> bool {
        self.layout.is_grid()
    }
}

/// Width of a padded label.
pub fn label_width(text: &str) -> u16 {
    (str_width(text).min(u32::from(u16::MAX - PADDING)) as u16) + PADDING
}
