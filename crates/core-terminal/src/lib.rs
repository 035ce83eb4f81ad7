//! Terminal backend abstraction and crossterm implementation.
//!
//! The menu draws on stderr: stdout is reserved for the accepted output, and
//! stdin usually carries the candidate list (crossterm reads keys from the
//! controlling tty in that case).

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    event::{
        DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use std::io::stderr;
use tracing::{debug, warn};

pub mod capabilities;
pub use capabilities::TerminalCapabilities;

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    /// `(columns, rows)`
    fn size(&self) -> Result<(u16, u16)>;
}

pub struct CrosstermBackend {
    entered: bool,
    caps: TerminalCapabilities,
    keyboard_pushed: bool,
}

/// RAII guard ensuring terminal state restoration even if caller early-returns or panics.
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
    active: bool,
}

impl CrosstermBackend {
    pub fn new(caps: TerminalCapabilities) -> Self {
        Self {
            entered: false,
            caps,
            keyboard_pushed: false,
        }
    }

    pub fn capabilities(&self) -> TerminalCapabilities {
        self.caps
    }

    /// Enter and return a guard that will leave on drop.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        self.enter()?;
        Ok(TerminalGuard {
            backend: self,
            active: true,
        })
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if self.entered {
            return Ok(());
        }
        enable_raw_mode().context("failed to enable raw mode")?;
        execute!(stderr(), EnterAlternateScreen, EnableBracketedPaste, Hide)
            .context("failed to enter alternate screen")?;
        if self.caps.keyboard_enhancement {
            let flags = KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES;
            match execute!(stderr(), PushKeyboardEnhancementFlags(flags)) {
                Ok(()) => self.keyboard_pushed = true,
                Err(e) => warn!(target: "runtime", error = %e, "keyboard_enhancement_failed"),
            }
        }
        self.entered = true;
        debug!(
            target: "runtime",
            keyboard_enhancement = self.keyboard_pushed,
            truecolor = self.caps.truecolor,
            "terminal_entered"
        );
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        if self.keyboard_pushed {
            execute!(stderr(), PopKeyboardEnhancementFlags)?;
            self.keyboard_pushed = false;
        }
        execute!(stderr(), DisableBracketedPaste, LeaveAlternateScreen, Show)?;
        disable_raw_mode()?;
        self.entered = false;
        debug!(target: "runtime", "terminal_left");
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        crossterm::terminal::size().context("failed to query terminal size")
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

impl TerminalGuard<'_> {
    pub fn size(&self) -> Result<(u16, u16)> {
        self.backend.size()
    }
}

impl<'a> Drop for TerminalGuard<'a> {
    fn drop(&mut self) {
        if self.active {
            let _ = self.backend.leave();
        }
    }
}
