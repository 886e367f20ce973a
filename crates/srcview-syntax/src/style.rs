use crate::category::TokenCategory;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` or `rrggbb`.
    pub fn from_hex(value: &str) -> Option<Self> {
        let hex = value.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Visual attributes for one token category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub bold: bool,
    pub italic: bool,
}

impl TextStyle {
    pub const fn foreground(color: Color) -> Self {
        Self {
            foreground: Some(color),
            background: None,
            bold: false,
            italic: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

/// Category -> style mapping, read-only once handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleTable {
    styles: HashMap<TokenCategory, TextStyle>,
}

impl Default for StyleTable {
    fn default() -> Self {
        use TokenCategory::*;

        let entries = [
            (Comment, TextStyle::foreground(Color::from_rgb8(117, 113, 94)).italic()),
            (Keyword, TextStyle::foreground(Color::from_rgb8(197, 134, 192)).bold()),
            (PhpTag, TextStyle::foreground(Color::from_rgb8(220, 120, 170)).bold()),
            (Function, TextStyle::foreground(Color::from_rgb8(130, 170, 255))),
            (Type, TextStyle::foreground(Color::from_rgb8(224, 109, 117))),
            (String, TextStyle::foreground(Color::from_rgb8(152, 195, 121))),
            (Escape, TextStyle::foreground(Color::from_rgb8(97, 175, 239))),
            (Number, TextStyle::foreground(Color::from_rgb8(209, 154, 102))),
            (Operator, TextStyle::foreground(Color::from_rgb8(86, 182, 194))),
            (Property, TextStyle::foreground(Color::from_rgb8(224, 175, 104))),
            (Variable, TextStyle::foreground(Color::from_rgb8(190, 214, 255))),
            (Constant, TextStyle::foreground(Color::from_rgb8(198, 120, 221))),
            (Attribute, TextStyle::foreground(Color::from_rgb8(190, 214, 255))),
            (Embedded, TextStyle::foreground(Color::from_rgb8(97, 175, 239))),
            (
                Error,
                TextStyle {
                    foreground: Some(Color::from_rgb8(255, 255, 255)),
                    background: Some(Color::from_rgb8(160, 40, 40)),
                    bold: false,
                    italic: false,
                },
            ),
        ];

        Self {
            styles: entries.into_iter().collect(),
        }
    }
}

impl StyleTable {
    /// A table with no styles; every category renders as default text.
    pub fn empty() -> Self {
        Self {
            styles: HashMap::new(),
        }
    }

    /// Style for `category`, falling back to the `Text` style.
    pub fn style(&self, category: TokenCategory) -> TextStyle {
        self.styles
            .get(&category)
            .or_else(|| self.styles.get(&TokenCategory::Text))
            .copied()
            .unwrap_or_default()
    }

    pub fn get(&self, category: TokenCategory) -> Option<&TextStyle> {
        self.styles.get(&category)
    }

    pub fn set(&mut self, category: TokenCategory, style: TextStyle) {
        self.styles.insert(category, style);
    }

    /// Returns a copy of `self` with `overrides` replacing matching entries.
    pub fn with_overrides(
        &self,
        overrides: impl IntoIterator<Item = (TokenCategory, TextStyle)>,
    ) -> Self {
        let mut table = self.clone();
        table.styles.extend(overrides);
        table
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
