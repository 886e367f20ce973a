//! Syntax highlighting for srcview
//!
//! Turns a flat token stream covering a document into per-line style runs
//! and resolves token categories to visual styles.

pub mod category;
pub mod mapper;
pub mod php;
pub mod style;
pub mod token;

use thiserror::Error;

pub use category::TokenCategory;
pub use mapper::{LineFormatRun, LineHighlight, RunTable, TokenMapper};
pub use php::PhpTokenizer;
pub use style::{Color, StyleTable, TextStyle};
pub use token::{PlainTokenizer, Token, Tokenizer, VecTokenizer, tokenizer_for_path};

#[derive(Debug, Error)]
pub enum SyntaxError {
    #[error("Failed to compile highlight query: {0}")]
    Query(#[from] tree_sitter::QueryError),
}
