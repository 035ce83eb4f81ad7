//! Terminal capability probing.
//!
//! Detection runs once at startup. The keyboard probe is a round trip to the
//! terminal, so tests go through [`TerminalCapabilities::from_parts`] instead.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct TerminalCapabilities {
    /// Progressive keyboard enhancement (kitty protocol). Needed to tell
    /// Ctrl-Enter and Shift-Enter apart from plain Enter.
    pub keyboard_enhancement: bool,
    /// 24-bit colour advertised through `COLORTERM`.
    pub truecolor: bool,
}

impl TerminalCapabilities {
    pub fn detect() -> Self {
        let keyboard = crossterm::terminal::supports_keyboard_enhancement().unwrap_or(false);
        let colorterm = std::env::var("COLORTERM").ok();
        Self::from_parts(keyboard, colorterm.as_deref())
    }

    pub fn from_parts(keyboard_enhancement: bool, colorterm: Option<&str>) -> Self {
        let truecolor = colorterm.is_some_and(|v| {
            v.eq_ignore_ascii_case("truecolor") || v.eq_ignore_ascii_case("24bit")
        });
        Self {
            keyboard_enhancement,
            truecolor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truecolor_from_colorterm() {
        assert!(TerminalCapabilities::from_parts(false, Some("truecolor")).truecolor);
        assert!(TerminalCapabilities::from_parts(false, Some("24BIT")).truecolor);
        assert!(!TerminalCapabilities::from_parts(false, Some("256")).truecolor);
        assert!(!TerminalCapabilities::from_parts(true, None).truecolor);
    }

    #[test]
    fn keyboard_flag_passes_through() {
        assert!(TerminalCapabilities::from_parts(true, None).keyboard_enhancement);
    }
}
