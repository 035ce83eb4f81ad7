//! Configuration loading and parsing.
//!
//! Parses `oxmenu.toml` (or an explicit path provided by the binary). Every
//! section and field is optional; absent values take the defaults below.
//! Unknown fields are ignored. A file that fails to parse is reported under
//! the `config` target and replaced by defaults so a bad edit never stops the
//! menu from opening.
//!
//! ```toml
//! [menu]
//! fuzzy = true
//! case_insensitive = false
//! lines = 10
//! columns = 2
//! prompt = "run:"
//!
//! [history]
//! file = "~/.cache/oxmenu/history"
//! max = 64
//! dedup = true
//!
//! [priority]
//! items = ["firefox", "alacritty"]
//!
//! [input]
//! word_delimiters = " /"
//!
//! [theme]
//! selected = { fg = "#eeeeee", bg = "#005577" }
//! ```

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "oxmenu.toml";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct MenuConfig {
    pub fuzzy: bool,
    pub case_insensitive: bool,
    /// Grid rows; 0 selects the horizontal strip.
    pub lines: u32,
    pub columns: u32,
    pub prompt: Option<String>,
    pub password: bool,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            fuzzy: true,
            case_insensitive: false,
            lines: 0,
            columns: 0,
            prompt: None,
            password: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct HistoryConfig {
    pub file: Option<PathBuf>,
    pub max: usize,
    pub dedup: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            file: None,
            max: 64,
            dedup: true,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PriorityConfig {
    pub items: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct InputConfig {
    pub word_delimiters: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            word_delimiters: " ".to_owned(),
        }
    }
}

/// Foreground/background pair in `#rrggbb` notation.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ColorPair {
    pub fg: String,
    pub bg: String,
}

impl ColorPair {
    fn new(fg: &str, bg: &str) -> Self {
        Self {
            fg: fg.to_owned(),
            bg: bg.to_owned(),
        }
    }

    pub fn fg_rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex(&self.fg)
    }

    pub fn bg_rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex(&self.bg)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ThemeConfig {
    pub normal: ColorPair,
    pub selected: ColorPair,
    pub priority: ColorPair,
    pub output: ColorPair,
    pub normal_highlight: ColorPair,
    pub selected_highlight: ColorPair,
    pub output_highlight: ColorPair,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            normal: ColorPair::new("#bbbbbb", "#222222"),
            selected: ColorPair::new("#eeeeee", "#005577"),
            priority: ColorPair::new("#bbbbbb", "#333333"),
            output: ColorPair::new("#000000", "#00ffff"),
            normal_highlight: ColorPair::new("#ffc978", "#222222"),
            selected_highlight: ColorPair::new("#ffc978", "#005577"),
            output_highlight: ColorPair::new("#ffc978", "#00ffff"),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ConfigFile {
    pub menu: MenuConfig,
    pub history: HistoryConfig,
    pub priority: PriorityConfig,
    pub input: InputConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
    pub source: Option<PathBuf>,
}

/// Parse `#rrggbb` (leading `#` optional).
pub fn parse_hex(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Best-effort config path: `./oxmenu.toml`, else the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("oxmenu").join(CONFIG_FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                raw: Some(content),
                file,
                source: Some(path),
            })
        }
        Err(e) => {
            warn!(
                target: "config",
                path = %path.display(),
                error = %e.message(),
                "config_parse_failed_using_defaults"
            );
            Ok(Config::default())
        }
    }
}
