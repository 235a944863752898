//! Named styles for terminal output.
//!
//! Templates only ever refer to the semantic names in [`names`]; what a name
//! looks like is decided here. A name with no style renders with the
//! `(!?)` marker so a typo in a template is visible instead of silently plain.

use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const MISSING_STYLE_INDICATOR: &str = "(!?)";

pub mod names {
    pub const INDEX: &str = "index";
    pub const TITLE: &str = "title";
    pub const LABEL: &str = "label";
    pub const MUTED: &str = "muted";
    pub const SELECTED: &str = "selected";

    pub const INFO: &str = "info";
    pub const SUCCESS: &str = "success";
    pub const WARNING: &str = "warning";
    pub const ERROR: &str = "error";
}

#[derive(Clone, Default)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => style.apply_to(text).force_styling(true).to_string(),
            Some(_) => text.to_string(),
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    }
}

pub static THEME: Lazy<Theme> = Lazy::new(|| {
    Theme::new()
        .add(names::INDEX, Style::new().yellow())
        .add(names::TITLE, Style::new().bold())
        .add(names::LABEL, Style::new().cyan())
        .add(names::MUTED, Style::new().color256(246))
        .add(names::SELECTED, Style::new().black().on_yellow())
        .add(names::INFO, Style::new().color256(246))
        .add(names::SUCCESS, Style::new().green())
        .add(names::WARNING, Style::new().yellow())
        .add(names::ERROR, Style::new().red())
});
