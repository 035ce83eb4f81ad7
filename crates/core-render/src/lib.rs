//! Rendering primitives and menu frame assembly.
//!
//! `Cell` stores the full grapheme cluster for leader cells along with its
//! visual width; continuation cells (width==0) occupy the remaining columns of
//! a multi-column cluster and never print text.
//!
//! Invariants:
//! - Leader: width >= 1, `cluster` non-empty.
//! - Continuation: width == 0, `cluster` empty.
//! - Continuations immediately follow their leader horizontally; no gaps.
//! - A cluster that would straddle a region's right edge is not drawn.
//!
//! Pipeline per frame:
//! 1. `viewport` derives prompt/input/counter widths and the pagination
//!    `Layout` from the terminal size.
//! 2. `render_engine` paints prompt, query, page items, arrows and counter into
//!    a `Frame`, tagging each cell with a `Role`.
//! 3. `writer` turns the frame into crossterm commands, grouping runs of equal
//!    style, and flushes them to the output in one write.

use bitflags::bitflags;
use core_text::{egc_width, grapheme};

pub mod render_engine;
pub mod style;
pub mod viewport;
pub mod writer;

pub use render_engine::RenderEngine;
pub use style::{Palette, Role};
pub use viewport::{MenuShape, Viewport};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CellFlags: u8 {
        const REVERSE = 0b0000_0001; // reverse-video (software cursor)
        const CURSOR  = 0b0000_0010; // marks the query cursor cell
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Full grapheme cluster string (leader cells only). Empty for continuation cells.
    pub cluster: String,
    /// Visual width in terminal columns. `0` designates a continuation cell.
    pub width: u8,
    pub role: Role,
    pub flags: CellFlags,
}

impl Cell {
    #[inline]
    pub fn leader(cluster: &str, width: u16, role: Role) -> Self {
        Self {
            cluster: cluster.to_string(),
            width: width.max(1) as u8,
            role,
            flags: CellFlags::empty(),
        }
    }

    #[inline]
    pub fn continuation(role: Role) -> Self {
        Self {
            cluster: String::new(),
            width: 0,
            role,
            flags: CellFlags::empty(),
        }
    }

    #[inline]
    pub fn blank(role: Role) -> Self {
        Self::leader(" ", 1, role)
    }

    #[inline]
    pub fn is_leader(&self) -> bool {
        self.width > 0
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::blank(Role::Normal)
    }
}

#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    pub cells: Vec<Cell>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); (width as usize) * (height as usize)],
        }
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        let i = self.index(x, y)?;
        Some(&mut self.cells[i])
    }

    /// Paint `w` blank cells starting at `(x, y)`.
    pub fn fill(&mut self, x: u16, y: u16, w: u16, role: Role) {
        for col in x..x.saturating_add(w).min(self.width) {
            if let Some(cell) = self.cell_mut(col, y) {
                *cell = Cell::blank(role);
            }
        }
    }

    /// Write `text` at `(x, y)` clipped to `max_w` columns. Returns the
    /// number of columns written.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, role: Role, max_w: u16) -> u16 {
        self.put_str_with(x, y, text, max_w, |_| role)
    }

    /// Like [`Frame::put_str`] but the role is chosen per grapheme; the
    /// closure receives the char index of the grapheme's first char.
    pub fn put_str_with(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        max_w: u16,
        mut role_at: impl FnMut(usize) -> Role,
    ) -> u16 {
        let limit = x.saturating_add(max_w).min(self.width);
        let mut col = x;
        let mut char_idx = 0usize;
        for g in grapheme::iter(text) {
            let w = egc_width(g).max(1);
            if col.saturating_add(w) > limit {
                break;
            }
            let role = role_at(char_idx);
            char_idx += g.chars().count();
            if let Some(cell) = self.cell_mut(col, y) {
                *cell = Cell::leader(g, w, role);
            }
            for extra in 1..w {
                if let Some(cell) = self.cell_mut(col + extra, y) {
                    *cell = Cell::continuation(role);
                }
            }
            col += w;
        }
        col - x
    }

    /// Printable content of row `y` (leader clusters only).
    pub fn row_text(&self, y: u16) -> String {
        let mut out = String::new();
        for x in 0..self.width {
            if let Some(cell) = self.cell(x, y) {
                if cell.is_leader() {
                    out.push_str(&cell.cluster);
                }
            }
        }
        out
    }

    pub fn cursor_position(&self) -> Option<(u16, u16)> {
        self.cells
            .iter()
            .position(|c| c.flags.contains(CellFlags::CURSOR))
            .map(|i| ((i % self.width as usize) as u16, (i / self.width as usize) as u16))
    }
}
