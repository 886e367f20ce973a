//! Document handling for srcview
//!
//! This crate provides the read-only document layer of the viewer:
//! - Immutable source text loaded per document
//! - Line indexing (offset <-> line)
//! - Viewport bounds for the visible line range
//! - Forward text search with wrap-around

pub mod document;
pub mod line_index;
pub mod search;
pub mod viewport;

// Re-export main types for convenience
pub use document::SourceText;
pub use line_index::LineIndex;
pub use search::{find_from, find_line};
pub use viewport::Viewport;
