use crate::category::TokenCategory;
use crate::php::PhpTokenizer;
use std::path::Path;

/// A categorized span of source text, in byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub offset: usize,
    pub length: usize,
    pub category: TokenCategory,
}

impl Token {
    pub fn new(offset: usize, length: usize, category: TokenCategory) -> Self {
        Self {
            offset,
            length,
            category,
        }
    }

    /// Exclusive end offset, saturating on overflow.
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.length)
    }
}

/// Source of the token stream for a document.
///
/// Implementations should return tokens in increasing offset order that
/// together cover the whole text without gaps or overlaps. Consumers
/// tolerate violations but may under-style the affected region.
pub trait Tokenizer {
    fn tokenize(&mut self, text: &str) -> Vec<Token>;
}

/// Treats the whole document as unstyled text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTokenizer;

impl Tokenizer for PlainTokenizer {
    fn tokenize(&mut self, text: &str) -> Vec<Token> {
        plain_tokens(text)
    }
}

pub(crate) fn plain_tokens(text: &str) -> Vec<Token> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![Token::new(0, text.len(), TokenCategory::Text)]
    }
}

/// Replays a fixed token list, for callers that lex outside the engine.
#[derive(Debug, Clone, Default)]
pub struct VecTokenizer {
    tokens: Vec<Token>,
}

impl VecTokenizer {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn set_tokens(&mut self, tokens: Vec<Token>) {
        self.tokens = tokens;
    }
}

impl Tokenizer for VecTokenizer {
    fn tokenize(&mut self, _text: &str) -> Vec<Token> {
        self.tokens.clone()
    }
}

impl<T: Tokenizer + ?Sized> Tokenizer for Box<T> {
    fn tokenize(&mut self, text: &str) -> Vec<Token> {
        (**self).tokenize(text)
    }
}

const PHP_EXTENSIONS: [&str; 5] = ["php", "phtml", "inc", "php5", "phpt"];

/// Picks a tokenizer from the file extension of `path`.
pub fn tokenizer_for_path(path: Option<&str>) -> Box<dyn Tokenizer> {
    let is_php = path
        .and_then(|path| Path::new(path).extension())
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| PHP_EXTENSIONS.contains(&ext.as_str()));

    if !is_php {
        return Box::new(PlainTokenizer);
    }

    match PhpTokenizer::new() {
        Ok(tokenizer) => Box::new(tokenizer),
        Err(err) => {
            tracing::warn!("PHP highlighting unavailable, using plain text: {}", err);
            Box::new(PlainTokenizer)
        }
    }
}
