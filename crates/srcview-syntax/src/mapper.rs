//! Splits a document-wide token stream into per-line style runs.
//!
//! Runs are terminator-inclusive: the runs of a line cover its full span,
//! newline included, so that offsets stay consistent with the token stream.
//! [`RunTable::styled_runs`] gives the renderer-facing view with the
//! terminator clipped off.

use crate::category::TokenCategory;
use crate::token::Token;
use srcview_document::LineIndex;
use std::ops::Range;

/// The part of one token that falls on one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineFormatRun {
    pub line: usize,
    /// Byte offset of the run within its line
    pub column: usize,
    pub length: usize,
    pub category: TokenCategory,
}

/// A run positioned within its line, ready for styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineHighlight {
    /// Byte range relative to the start of the line
    pub range: Range<usize>,
    pub category: TokenCategory,
}

/// Per-line ordered runs for a whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunTable {
    lines: Vec<Vec<LineFormatRun>>,
    content_lengths: Vec<usize>,
}

impl RunTable {
    /// Number of lines the table was built for.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Runs for `line` in left-to-right order; empty for unknown lines.
    pub fn runs(&self, line: usize) -> &[LineFormatRun] {
        self.lines.get(line).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True when no line has any run.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(Vec::is_empty)
    }

    /// Sum of run lengths on `line`.
    pub fn line_total(&self, line: usize) -> usize {
        self.runs(line).iter().map(|run| run.length).sum()
    }

    /// Sum of all run lengths in the document.
    pub fn total_len(&self) -> usize {
        self.lines.iter().flatten().map(|run| run.length).sum()
    }

    /// Runs of `line` clipped to its content.
    ///
    /// The terminator is not styled, so runs covering it are shortened and
    /// runs lying entirely on it are dropped.
    pub fn styled_runs(&self, line: usize) -> Vec<LineHighlight> {
        let content_len = self.content_lengths.get(line).copied().unwrap_or(0);

        self.runs(line)
            .iter()
            .filter(|run| run.column < content_len)
            .map(|run| LineHighlight {
                range: run.column..run.column.saturating_add(run.length).min(content_len),
                category: run.category,
            })
            .collect()
    }
}

/// Builds a [`RunTable`] from a token stream.
#[derive(Debug, Default)]
pub struct TokenMapper {
    dropped: usize,
    clamped: usize,
}

impl TokenMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `tokens` onto the lines of `index`.
    ///
    /// Zero-length tokens are dropped and tokens reaching past the end of the
    /// text are clamped to it; neither is an error.
    pub fn map(&mut self, tokens: &[Token], index: &LineIndex) -> RunTable {
        self.dropped = 0;
        self.clamped = 0;

        let line_count = index.line_count();
        let mut lines: Vec<Vec<LineFormatRun>> = vec![Vec::new(); line_count];
        let content_lengths = (0..line_count).map(|line| index.line_length(line)).collect();
        let text_len = index.text_len();

        for token in tokens {
            if token.length == 0 {
                self.dropped += 1;
                continue;
            }

            let start = token.offset.min(text_len);
            let end = token.end().min(text_len);
            if end <= start {
                self.dropped += 1;
                continue;
            }
            if end - start != token.length {
                self.clamped += 1;
            }

            distribute_token(&mut lines, index, start, end, token.category);
        }

        if self.dropped > 0 || self.clamped > 0 {
            tracing::warn!(
                "Tokenizer produced malformed tokens: {} dropped, {} clamped",
                self.dropped,
                self.clamped
            );
        }

        RunTable {
            lines,
            content_lengths,
        }
    }

    /// Tokens dropped by the last [`map`](Self::map) call.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Tokens shortened by the last [`map`](Self::map) call.
    pub fn clamped(&self) -> usize {
        self.clamped
    }
}

fn distribute_token(
    lines: &mut [Vec<LineFormatRun>],
    index: &LineIndex,
    start: usize,
    end: usize,
    category: TokenCategory,
) {
    let start_line = index.line_of(start);
    let end_line = index.line_of(end - 1);

    if start_line == end_line {
        let line_start = index.line_span(start_line).start;
        lines[start_line].push(LineFormatRun {
            line: start_line,
            column: start - line_start,
            length: end - start,
            category,
        });
        return;
    }

    let mut cursor = start;
    for line in start_line..=end_line {
        let span = index.line_span(line);
        let segment_end = end.min(span.end);
        if segment_end > cursor {
            lines[line].push(LineFormatRun {
                line,
                column: cursor - span.start,
                length: segment_end - cursor,
                category,
            });
        }
        cursor = segment_end;
    }
}
