//! Terminal writer abstraction.
//!
//! Commands are buffered and flushed once per frame. The output sink is
//! generic so tests capture the exact byte stream in a `Vec<u8>`.
//!
//! Design invariants:
//! * Commands preserve ordering; no flushing mid-frame.
//! * All positions are absolute (0,0) origin; caller ensures bounds.
//! * Colours are emitted only when the style of a run changes.

use crate::{CellFlags, Frame, Palette, Role};
use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetColors},
    terminal::{Clear, ClearType},
};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo(u16, u16),
    Style(Role, bool), // (role, reverse)
    Print(String),
    ClearBelow,
    Reset,
}

#[derive(Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }

    pub fn style(&mut self, role: Role, reverse: bool) {
        self.cmds.push(Command::Style(role, reverse));
    }

    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }

    pub fn clear_below(&mut self) {
        self.cmds.push(Command::ClearBelow);
    }

    pub fn reset(&mut self) {
        self.cmds.push(Command::Reset);
    }

    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    /// Translate a whole frame: one `MoveTo` per row, then runs of cells
    /// sharing role and reverse flag.
    pub fn push_frame(&mut self, frame: &Frame) {
        for y in 0..frame.height {
            self.move_to(0, y);
            let mut current: Option<(Role, bool)> = None;
            let mut run = String::new();
            for x in 0..frame.width {
                let Some(cell) = frame.cell(x, y) else {
                    continue;
                };
                if !cell.is_leader() {
                    continue;
                }
                let key = (cell.role, cell.flags.contains(CellFlags::REVERSE));
                if current != Some(key) {
                    self.print(std::mem::take(&mut run));
                    self.style(key.0, key.1);
                    current = Some(key);
                }
                run.push_str(&cell.cluster);
            }
            self.print(run);
        }
        self.reset();
        self.clear_below();
    }

    pub fn flush_to<W: Write>(self, out: &mut W, palette: &Palette) -> Result<()> {
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => queue!(out, MoveTo(x, y))?,
                Command::Style(role, reverse) => {
                    queue!(out, SetAttribute(Attribute::Reset), SetColors(palette.colors(role)))?;
                    if reverse {
                        queue!(out, SetAttribute(Attribute::Reverse))?;
                    }
                }
                Command::Print(s) => queue!(out, Print(s))?,
                Command::ClearBelow => queue!(out, Clear(ClearType::FromCursorDown))?,
                Command::Reset => queue!(out, SetAttribute(Attribute::Reset), ResetColor)?,
            }
        }
        out.flush()?;
        Ok(())
    }
}
