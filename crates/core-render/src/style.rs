//! Colour roles and the palette mapping them to terminal colours.
//!
//! Each painted cell carries a `Role`; the writer resolves roles through a
//! `Palette` only at emission time, so frames stay comparable in tests
//! without any escape sequences.

use core_config::{ColorPair, ThemeConfig};
use crossterm::style::{Color, Colors};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Normal,
    /// Highlighted item and the prompt.
    Selected,
    Priority,
    /// Items in the selection overlay.
    Output,
    NormalHighlight,
    SelectedHighlight,
    OutputHighlight,
}

impl Role {
    /// Role used for matched characters drawn over an item of this role.
    pub fn highlight(self) -> Role {
        match self {
            Role::Selected | Role::SelectedHighlight => Role::SelectedHighlight,
            Role::Output | Role::OutputHighlight => Role::OutputHighlight,
            _ => Role::NormalHighlight,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    normal: Colors,
    selected: Colors,
    priority: Colors,
    output: Colors,
    normal_highlight: Colors,
    selected_highlight: Colors,
    output_highlight: Colors,
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_theme(&ThemeConfig::default(), true)
    }
}

impl Palette {
    /// Without truecolor support each `#rrggbb` is mapped onto the nearest
    /// xterm-256 index. Unparseable entries fall back to the terminal default.
    pub fn from_theme(theme: &ThemeConfig, truecolor: bool) -> Self {
        let pair = |p: &ColorPair| Colors {
            foreground: Some(to_color(p.fg_rgb(), truecolor)),
            background: Some(to_color(p.bg_rgb(), truecolor)),
        };
        Self {
            normal: pair(&theme.normal),
            selected: pair(&theme.selected),
            priority: pair(&theme.priority),
            output: pair(&theme.output),
            normal_highlight: pair(&theme.normal_highlight),
            selected_highlight: pair(&theme.selected_highlight),
            output_highlight: pair(&theme.output_highlight),
        }
    }

    pub fn colors(&self, role: Role) -> Colors {
        match role {
            Role::Normal => self.normal,
            Role::Selected => self.selected,
            Role::Priority => self.priority,
            Role::Output => self.output,
            Role::NormalHighlight => self.normal_highlight,
            Role::SelectedHighlight => self.selected_highlight,
            Role::OutputHighlight => self.output_highlight,
        }
    }
}

fn to_color(rgb: Option<(u8, u8, u8)>, truecolor: bool) -> Color {
    match rgb {
        Some((r, g, b)) if truecolor => Color::Rgb { r, g, b },
        Some((r, g, b)) => Color::AnsiValue(rgb_to_ansi256(r, g, b)),
        None => Color::Reset,
    }
}

/// Nearest xterm-256 index: the 24-step grey ramp for neutral colours,
/// otherwise the 6x6x6 cube.
pub fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        if r < 8 {
            return 16;
        }
        if r > 248 {
            return 231;
        }
        return 232 + (((u16::from(r) - 8) * 24) / 247) as u8;
    }
    let level = |c: u8| ((u16::from(c) * 5 + 127) / 255) as u8;
    16 + 36 * level(r) + 6 * level(g) + level(b)
}
