//! Effective session settings: `oxmenu.toml` values overridden by CLI flags.

use crate::Args;
use core_config::{ColorPair, ConfigFile, ThemeConfig};
use core_items::PrioritySet;
use core_match::{MatchMode, Matcher};
use core_render::MenuShape;
use core_text::CaseRule;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub fuzzy: bool,
    pub case: CaseRule,
    pub password: bool,
    pub shape: MenuShape,
    pub prompt: Option<String>,
    pub json: Option<PathBuf>,
    pub history_file: Option<PathBuf>,
    pub history_max: usize,
    pub history_dedup: bool,
    pub priority: PrioritySet,
    pub word_delimiters: String,
    pub theme: ThemeConfig,
}

impl Settings {
    pub fn resolve(args: &Args, file: &ConfigFile) -> Self {
        let menu = &file.menu;

        let mut lines = args.lines.unwrap_or(menu.lines);
        let mut columns = args.columns.unwrap_or(menu.columns);
        if args.columns.is_some() && lines == 0 {
            lines = 1;
        }
        if lines > 0 && columns == 0 {
            columns = 1;
        }

        let mut priority = PrioritySet::new(file.priority.items.iter().cloned());
        if let Some(hp) = args.priority.as_deref() {
            priority.extend(hp.split(',').filter(|s| !s.is_empty()));
        }

        let case = if args.case_insensitive || menu.case_insensitive {
            CaseRule::Insensitive
        } else {
            CaseRule::Sensitive
        };

        Self {
            fuzzy: menu.fuzzy && !args.no_fuzzy,
            case,
            password: args.password || menu.password,
            shape: MenuShape { lines, columns },
            prompt: args.prompt.clone().or_else(|| menu.prompt.clone()),
            json: args.json.clone(),
            history_file: args.history.clone().or_else(|| file.history.file.clone()),
            history_max: file.history.max,
            history_dedup: file.history.dedup,
            priority,
            word_delimiters: file.input.word_delimiters.clone(),
            theme: theme_with_overrides(&file.theme, args),
        }
    }

    /// JSON sources compare token substrings case-insensitively whatever `-i` says.
    pub fn matcher(&self) -> Matcher {
        let mode = if self.fuzzy {
            MatchMode::Fuzzy
        } else {
            MatchMode::Token
        };
        let matcher = Matcher::new(mode, self.case);
        if self.json.is_some() {
            matcher.with_substring_case(CaseRule::Insensitive)
        } else {
            matcher
        }
    }

    /// Shape handed to the runtime, which clamps it to the candidate count.
    /// Password mode always uses the strip.
    pub fn requested_shape(&self) -> MenuShape {
        if self.password {
            MenuShape::default()
        } else {
            self.shape
        }
    }
}

fn theme_with_overrides(base: &ThemeConfig, args: &Args) -> ThemeConfig {
    fn set(pair: &mut ColorPair, fg: &Option<String>, bg: &Option<String>) {
        if let Some(fg) = fg {
            pair.fg = fg.clone();
        }
        if let Some(bg) = bg {
            pair.bg = bg.clone();
        }
    }
    let mut theme = base.clone();
    set(&mut theme.normal, &args.nf, &args.nb);
    set(&mut theme.selected, &args.sf, &args.sb);
    set(&mut theme.priority, &args.hf, &args.hb);
    set(&mut theme.normal_highlight, &args.nhf, &args.nhb);
    set(&mut theme.selected_highlight, &args.shf, &args.shb);
    theme
}
