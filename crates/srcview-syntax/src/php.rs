use crate::SyntaxError;
use crate::category::{HIGHLIGHT_NAMES, TokenCategory};
use crate::token::{Token, Tokenizer, plain_tokens};
use std::fmt;
use tree_sitter_highlight::{HighlightConfiguration, HighlightEvent, Highlighter};

/// Tokenizes PHP sources with the tree-sitter PHP grammar.
///
/// Inline HTML outside `<?php ... ?>` comes out as `Text`.
pub struct PhpTokenizer {
    highlighter: Highlighter,
    configuration: HighlightConfiguration,
    categories: Vec<TokenCategory>,
}

impl fmt::Debug for PhpTokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhpTokenizer").finish()
    }
}

impl PhpTokenizer {
    pub fn new() -> Result<Self, SyntaxError> {
        let mut configuration = HighlightConfiguration::new(
            tree_sitter_php::LANGUAGE_PHP.into(),
            "srcview::php",
            tree_sitter_php::HIGHLIGHTS_QUERY,
            tree_sitter_php::INJECTIONS_QUERY,
            "",
        )?;
        configuration.configure(HIGHLIGHT_NAMES);

        let categories = HIGHLIGHT_NAMES
            .iter()
            .map(|name| TokenCategory::from_highlight_name(name))
            .collect();

        Ok(Self {
            highlighter: Highlighter::new(),
            configuration,
            categories,
        })
    }

    fn highlight(&mut self, text: &str) -> Result<Vec<Token>, tree_sitter_highlight::Error> {
        let mut tokens: Vec<Token> = Vec::new();
        let mut stack: Vec<TokenCategory> = Vec::new();
        let mut covered = 0usize;

        let events =
            self.highlighter
                .highlight(&self.configuration, text.as_bytes(), None, |_| None)?;

        for event in events {
            match event? {
                HighlightEvent::HighlightStart(id) => {
                    let category = self
                        .categories
                        .get(id.0)
                        .copied()
                        .unwrap_or(TokenCategory::Text);
                    stack.push(category);
                }
                HighlightEvent::HighlightEnd => {
                    stack.pop();
                }
                HighlightEvent::Source { start, end } => {
                    if start >= end || end > text.len() {
                        continue;
                    }
                    if start > covered {
                        push_token(&mut tokens, covered, start, TokenCategory::Text);
                    }
                    let start = start.max(covered);
                    if start < end {
                        let category = stack.last().copied().unwrap_or(TokenCategory::Text);
                        push_token(&mut tokens, start, end, category);
                        covered = end;
                    }
                }
            }
        }

        if covered < text.len() {
            push_token(&mut tokens, covered, text.len(), TokenCategory::Text);
        }

        Ok(tokens)
    }
}

impl Tokenizer for PhpTokenizer {
    fn tokenize(&mut self, text: &str) -> Vec<Token> {
        match self.highlight(text) {
            Ok(tokens) => tokens,
            Err(err) => {
                tracing::warn!("PHP highlighting failed, falling back to plain text: {:?}", err);
                plain_tokens(text)
            }
        }
    }
}

/// Appends `[start, end)`, merging with the previous token when contiguous
/// and of the same category.
fn push_token(tokens: &mut Vec<Token>, start: usize, end: usize, category: TokenCategory) {
    if let Some(last) = tokens.last_mut() {
        if last.category == category && last.end() == start {
            last.length += end - start;
            return;
        }
    }
    tokens.push(Token::new(start, end - start, category));
}
