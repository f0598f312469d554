use std::{fs, path::Path};

use serde::Deserialize;
use tracing::warn;
use ui::theme::{parse_color, Theme};

/// `config.toml`; only the `[theme]` table is read.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub theme: ThemeConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Preset: tokyonight, gruvbox or dracula.
    pub name: Option<String>,
    pub header_bg: Option<String>,
    pub header_fg: Option<String>,
    pub footer_bg: Option<String>,
    pub footer_fg: Option<String>,
    pub footer_pad_bg: Option<String>,
    pub word_fg: Option<String>,
    pub pivot_fg: Option<String>,
    pub backdrop: Option<String>,
}

impl ThemeConfig {
    /// Start from the preset (or the default theme) and apply every colour
    /// override that parses.
    pub fn build(&self) -> Theme {
        let mut theme = match self.name.as_deref() {
            Some(name) => Theme::preset(name).unwrap_or_else(|| {
                warn!(name, "unknown theme preset");
                Theme::default()
            }),
            None => Theme::default(),
        };
        let overrides = [
            (&self.header_bg, &mut theme.header_bg),
            (&self.header_fg, &mut theme.header_fg),
            (&self.footer_bg, &mut theme.footer_bg),
            (&self.footer_fg, &mut theme.footer_fg),
            (&self.footer_pad_bg, &mut theme.footer_pad_bg),
            (&self.word_fg, &mut theme.word_fg),
            (&self.pivot_fg, &mut theme.pivot_fg),
            (&self.backdrop, &mut theme.backdrop),
        ];
        for (value, slot) in overrides {
            let Some(value) = value else { continue };
            match parse_color(value) {
                Some(color) => *slot = color,
                None => warn!(value = %value, "ignoring unknown colour"),
            }
        }
        theme
    }
}

pub fn parse_config(text: &str) -> Result<FileConfig, toml::de::Error> {
    toml::from_str(text)
}

/// Theme from `path`; a missing or broken file gives the default theme.
pub fn load_theme(path: Option<&Path>) -> Theme {
    let Some(path) = path else {
        return Theme::default();
    };
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(_) => return Theme::default(),
    };
    match parse_config(&text) {
        Ok(config) => config.theme.build(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            Theme::default()
        }
    }
}
