use std::fmt;
use std::str::FromStr;

/// Highlight category attached to every token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenCategory {
    Text,
    Whitespace,
    Keyword,
    PhpTag,
    Variable,
    Function,
    Type,
    Constant,
    Property,
    String,
    Escape,
    Number,
    Comment,
    Operator,
    Punctuation,
    Attribute,
    Embedded,
    Error,
}

impl TokenCategory {
    pub const ALL: [TokenCategory; 18] = [
        Self::Text,
        Self::Whitespace,
        Self::Keyword,
        Self::PhpTag,
        Self::Variable,
        Self::Function,
        Self::Type,
        Self::Constant,
        Self::Property,
        Self::String,
        Self::Escape,
        Self::Number,
        Self::Comment,
        Self::Operator,
        Self::Punctuation,
        Self::Attribute,
        Self::Embedded,
        Self::Error,
    ];

    /// Name used in theme files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Whitespace => "whitespace",
            Self::Keyword => "keyword",
            Self::PhpTag => "php_tag",
            Self::Variable => "variable",
            Self::Function => "function",
            Self::Type => "type",
            Self::Constant => "constant",
            Self::Property => "property",
            Self::String => "string",
            Self::Escape => "escape",
            Self::Number => "number",
            Self::Comment => "comment",
            Self::Operator => "operator",
            Self::Punctuation => "punctuation",
            Self::Attribute => "attribute",
            Self::Embedded => "embedded",
            Self::Error => "error",
        }
    }

    /// Maps a tree-sitter capture name such as `keyword.control` to a category.
    pub fn from_highlight_name(name: &str) -> Self {
        match name {
            "variable.member" | "variable.other" => return Self::Property,
            "variable.builtin" | "variable.this" => return Self::Keyword,
            "function.macro" => return Self::Constant,
            // `<?php` and `?>` are captured as tags by the PHP grammar
            "tag" | "tag.php" | "punctuation.special" => return Self::PhpTag,
            _ => {}
        }

        let base = name.split('.').next().unwrap_or(name);
        match base {
            "comment" => Self::Comment,
            "keyword" | "storageclass" | "conditional" | "repeat" | "include" => Self::Keyword,
            "function" | "method" | "constructor" => Self::Function,
            "type" | "namespace" | "module" => Self::Type,
            "string" | "character" => Self::String,
            "escape" => Self::Escape,
            "number" | "float" => Self::Number,
            "boolean" | "constant" | "symbol" => Self::Constant,
            "operator" => Self::Operator,
            "punctuation" | "delimiter" => Self::Punctuation,
            "property" | "field" | "member" => Self::Property,
            "attribute" => Self::Attribute,
            "variable" | "parameter" => Self::Variable,
            "embedded" | "label" => Self::Embedded,
            "error" => Self::Error,
            _ => Self::Text,
        }
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TokenCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.name() == wanted)
            .ok_or_else(|| s.to_string())
    }
}

/// Capture names the tree-sitter highlighter is configured with.
pub(crate) const HIGHLIGHT_NAMES: &[&str] = &[
    "attribute",
    "boolean",
    "comment",
    "constant",
    "constant.builtin",
    "constructor",
    "embedded",
    "escape",
    "function",
    "function.builtin",
    "function.method",
    "keyword",
    "keyword.control",
    "keyword.operator",
    "keyword.return",
    "keyword.function",
    "label",
    "method",
    "module",
    "namespace",
    "number",
    "operator",
    "parameter",
    "property",
    "punctuation",
    "punctuation.bracket",
    "punctuation.delimiter",
    "punctuation.special",
    "string",
    "string.special",
    "tag",
    "type",
    "type.builtin",
    "variable",
    "variable.builtin",
    "variable.member",
    "variable.parameter",
];
