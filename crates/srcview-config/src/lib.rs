use serde::{Deserialize, Serialize};
use srcview_syntax::StyleTable;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod theme;

pub use theme::{StyleEntry, ThemeFile};

const CONFIG_DIR: &str = ".srcview";
const CONFIG_FILE: &str = "viewer.toml";

const DEFAULT_FONT_SIZE: u32 = 12;
const DEFAULT_TAB_SIZE: u32 = 4;
const DEFAULT_GLYPH_WIDTH: u32 = 8;
const DEFAULT_LINE_HEIGHT: u32 = 16;
/// Room reserved in the gutter for the breakpoint marker.
const DEFAULT_MARKER_PADDING: u32 = 14;
const DEFAULT_MARKER_SIZE: u32 = 8;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GutterConfig {
    pub marker_padding: u32,
    pub marker_size: u32,
}

impl Default for GutterConfig {
    fn default() -> Self {
        Self {
            marker_padding: DEFAULT_MARKER_PADDING,
            marker_size: DEFAULT_MARKER_SIZE,
        }
    }
}

/// Editor-facing settings of the source viewer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ViewerConfig {
    pub font_size: u32,
    pub tab_size: u32,
    pub glyph_width: u32,
    pub line_height: u32,
    /// Theme file; relative paths resolve against the config root.
    pub theme: Option<PathBuf>,
    pub gutter: GutterConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            tab_size: DEFAULT_TAB_SIZE,
            glyph_width: DEFAULT_GLYPH_WIDTH,
            line_height: DEFAULT_LINE_HEIGHT,
            theme: None,
            gutter: GutterConfig::default(),
        }
    }
}

impl ViewerConfig {
    pub fn load(root: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = config_path(root);
        let contents = fs::read_to_string(&path)?;
        let mut config: Self = toml::from_str(&contents)?;
        config.normalize();
        tracing::debug!("Loaded viewer configuration from {}", path.display());
        Ok(config)
    }

    pub fn load_or_default(root: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match Self::load(root) {
            Ok(config) => Ok(config),
            Err(ConfigError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            Err(err) => Err(err),
        }
    }

    pub fn save(&self, root: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = config_path(&root);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Resolves the configured theme over the default style table.
    pub fn style_table(&self, root: impl AsRef<Path>) -> Result<StyleTable, ConfigError> {
        let base = StyleTable::default();
        let Some(theme) = &self.theme else {
            return Ok(base);
        };

        let path = if theme.is_absolute() {
            theme.clone()
        } else {
            root.as_ref().join(theme)
        };
        ThemeFile::load(&path)?.apply(&base)
    }

    /// Advance of one monospace glyph at `font_size`, two thirds of an em.
    pub fn derived_glyph_width(&self) -> u32 {
        self.font_size.saturating_mul(2).div_ceil(3).max(1)
    }

    /// Row height at `font_size`, four thirds of an em.
    pub fn derived_line_height(&self) -> u32 {
        self.font_size.saturating_mul(4).div_ceil(3).max(1)
    }

    fn normalize(&mut self) {
        let defaults = Self::default();
        if self.font_size == 0 {
            self.font_size = defaults.font_size;
        }
        if self.tab_size == 0 {
            self.tab_size = defaults.tab_size;
        }
        if self.glyph_width == 0 {
            self.glyph_width = self.derived_glyph_width();
        }
        if self.line_height == 0 {
            self.line_height = self.derived_line_height();
        }
        if self.gutter.marker_size == 0 {
            self.gutter.marker_size = defaults.gutter.marker_size;
        }
        if self
            .theme
            .as_ref()
            .is_some_and(|theme| theme.as_os_str().is_empty())
        {
            self.theme = None;
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Unknown token category in theme: {0}")]
    UnknownCategory(String),
    #[error("Invalid color {value:?} for {category}")]
    InvalidColor { category: String, value: String },
}

fn config_path(root: impl AsRef<Path>) -> PathBuf {
    root.as_ref().join(CONFIG_DIR).join(CONFIG_FILE)
}

impl fmt::Display for ViewerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ViewerConfig(font_size={}, theme={:?})",
            self.font_size, self.theme
        )
    }
}
