//! Theme files mapping token categories to styles.
//!
//! ```toml
//! [styles.keyword]
//! foreground = "#c586c0"
//! bold = true
//!
//! [styles.comment]
//! foreground = "#75715e"
//! italic = true
//! ```

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use srcview_syntax::{Color, StyleTable, TextStyle, TokenCategory};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct StyleEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ThemeFile {
    #[serde(default)]
    pub styles: BTreeMap<String, StyleEntry>,
}

impl ThemeFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref())?;
        let theme = Self::from_toml(&contents)?;
        tracing::debug!(
            "Loaded theme with {} styles from {}",
            theme.styles.len(),
            path.as_ref().display()
        );
        Ok(theme)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Resolves every entry to a typed style.
    pub fn overrides(&self) -> Result<Vec<(TokenCategory, TextStyle)>, ConfigError> {
        self.styles
            .iter()
            .map(|(name, entry)| {
                let category = name
                    .parse::<TokenCategory>()
                    .map_err(ConfigError::UnknownCategory)?;
                Ok((category, entry.to_style(name)?))
            })
            .collect()
    }

    /// Layers this theme over `base`.
    pub fn apply(&self, base: &StyleTable) -> Result<StyleTable, ConfigError> {
        Ok(base.with_overrides(self.overrides()?))
    }
}

impl StyleEntry {
    fn to_style(&self, category: &str) -> Result<TextStyle, ConfigError> {
        Ok(TextStyle {
            foreground: parse_color(category, self.foreground.as_deref())?,
            background: parse_color(category, self.background.as_deref())?,
            bold: self.bold,
            italic: self.italic,
        })
    }
}

fn parse_color(category: &str, value: Option<&str>) -> Result<Option<Color>, ConfigError> {
    match value {
        None => Ok(None),
        Some(value) => Color::from_hex(value)
            .map(Some)
            .ok_or_else(|| ConfigError::InvalidColor {
                category: category.to_string(),
                value: value.to_string(),
            }),
    }
}
