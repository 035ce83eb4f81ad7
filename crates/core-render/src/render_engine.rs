//! Menu frame composition.
//!
//! Row 0, left to right: prompt (selected colours), query input, then in
//! strip mode the `<` marker, the page items and the `>` marker, and finally
//! the `position/total` counter flush against the right edge. Grid pages are
//! drawn column-major below row 0.
//!
//! Item colour precedence: highlighted, then selected for output, then
//! priority, then normal. Matched characters take the highlight variant of
//! the item's colour.

use crate::viewport::{ARROW_WIDTH, PADDING, label_width};
use crate::writer::Writer;
use crate::{CellFlags, Frame, MenuShape, Palette, Role, Viewport};
use anyhow::Result;
use core_items::Candidate;
use core_state::MenuState;
use core_text::grapheme;
use std::borrow::Cow;
use std::io::Write;
use tracing::trace;

pub struct RenderEngine {
    palette: Palette,
    prompt: Option<String>,
    password: bool,
    frames: u64,
}

impl RenderEngine {
    pub fn new(palette: Palette, prompt: Option<String>, password: bool) -> Self {
        Self {
            palette,
            prompt,
            password,
            frames: 0,
        }
    }

    pub fn viewport(&self, size: (u16, u16), shape: MenuShape, state: &MenuState) -> Viewport {
        Viewport::compute(size, self.prompt.as_deref(), shape, state.max_item_width())
    }

    pub fn build_frame(&self, state: &MenuState, vp: &Viewport) -> Frame {
        let mut frame = Frame::new(vp.width, vp.height);
        let width = vp.width;
        let (pos, total) = state.counter();
        let counter = format!("{pos}/{total}");
        let counter_w = label_width(&counter).min(width);

        let mut x = 0u16;
        if let Some(prompt) = self.prompt.as_deref().filter(|_| vp.prompt_w > 0) {
            let w = vp.prompt_w.min(width);
            frame.fill(0, 0, w, Role::Selected);
            frame.put_str(1, 0, prompt, Role::Selected, w.saturating_sub(PADDING));
            x = w;
        }

        let no_matches = state.matches().is_empty();
        let input_w = if vp.is_grid() || no_matches {
            width.saturating_sub(x).saturating_sub(counter_w)
        } else {
            vp.input_w
        };
        self.draw_input(&mut frame, state, x, input_w);

        let visible = state.visible();
        if vp.is_grid() {
            let rows = vp.layout.rows().max(1);
            let columns = vp.layout.columns().max(1);
            let col_w = width.saturating_sub(x) / columns as u16;
            for (i, item) in visible.iter().enumerate() {
                let i = i as u32;
                let cx = x.saturating_add((i / rows) as u16 * col_w);
                let cy = 1 + (i % rows) as u16;
                draw_item(&mut frame, state, item, cx, cy, col_w);
            }
        } else if !no_matches {
            x = x.saturating_add(vp.input_w);
            let window = state.window();
            if window.curr.and_then(|c| state.matches().left(c)).is_some() {
                frame.put_str(x + 1, 0, "<", Role::Normal, 1);
            }
            x = x.saturating_add(ARROW_WIDTH);
            for item in &visible {
                let limit = width
                    .saturating_sub(x)
                    .saturating_sub(ARROW_WIDTH)
                    .saturating_sub(counter_w);
                let natural = state.oracle().measure(&item.text).min(u32::from(u16::MAX)) as u16;
                let w = natural.min(limit);
                if w == 0 {
                    break;
                }
                draw_item(&mut frame, state, item, x, 0, w);
                x += w;
            }
            if window.next.is_some() {
                let ax = width.saturating_sub(ARROW_WIDTH + counter_w);
                frame.put_str(ax + 1, 0, ">", Role::Normal, 1);
            }
        }

        let cx = width.saturating_sub(counter_w);
        frame.fill(cx, 0, counter_w, Role::Normal);
        frame.put_str(cx + 1, 0, &counter, Role::Normal, counter_w.saturating_sub(PADDING));
        frame
    }

    fn draw_input(&self, frame: &mut Frame, state: &MenuState, x: u16, w: u16) {
        frame.fill(x, 0, w, Role::Normal);
        let query = state.query();
        let shown: Cow<'_, str> = if self.password {
            Cow::Owned(".".repeat(query.as_str().chars().count()))
        } else {
            Cow::Borrowed(query.as_str())
        };
        frame.put_str(x + 1, 0, &shown, Role::Normal, w.saturating_sub(PADDING));

        let col = if self.password {
            query.as_str()[..query.cursor()].chars().count() as u32
        } else {
            grapheme::visual_col(query.as_str(), query.cursor()) as u32
        };
        if 1 + col < u32::from(w) {
            if let Some(cell) = frame.cell_mut(x + 1 + col as u16, 0) {
                cell.flags |= CellFlags::CURSOR | CellFlags::REVERSE;
            }
        }
    }

    pub fn render<W: Write>(
        &mut self,
        out: &mut W,
        state: &MenuState,
        vp: &Viewport,
    ) -> Result<()> {
        let frame = self.build_frame(state, vp);
        let mut writer = Writer::new();
        writer.push_frame(&frame);
        writer.flush_to(out, &self.palette)?;
        self.frames += 1;
        trace!(
            target: "render",
            frame = self.frames,
            width = vp.width,
            height = vp.height,
            visible = state.visible().len(),
            "frame_rendered"
        );
        Ok(())
    }
}

fn draw_item(frame: &mut Frame, state: &MenuState, item: &Candidate, x: u16, y: u16, w: u16) {
    let role = if state.is_highlighted(item.id) {
        Role::Selected
    } else if state.is_selected(item.id) {
        Role::Output
    } else if item.is_priority {
        Role::Priority
    } else {
        Role::Normal
    };
    frame.fill(x, y, w, role);
    let marks = state.highlights(&item.text);
    let marked = role.highlight();
    frame.put_str_with(x + 1, y, &item.text, w.saturating_sub(PADDING), |i| {
        if marks.binary_search(&i).is_ok() {
            marked
        } else {
            role
        }
    });
}
