use std::ops::Range;

/// Line index for fast byte offset -> line number mapping.
///
/// Lines are 0-based and terminated by `\n`. A text ending in a newline has a
/// trailing empty line, and an empty text has exactly one empty line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset where each line begins. `line_starts[0] == 0`, strictly increasing.
    line_starts: Vec<usize>,
    text_len: usize,
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new("")
    }
}

impl LineIndex {
    /// Builds the index in a single pass over `text`.
    pub fn new(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut line_starts = Vec::with_capacity(bytes.len() / 32 + 1);
        line_starts.push(0);
        line_starts.extend(memchr::memchr_iter(b'\n', bytes).map(|pos| pos + 1));

        Self {
            line_starts,
            text_len: bytes.len(),
        }
    }

    /// Length in bytes of the indexed text.
    pub fn text_len(&self) -> usize {
        self.text_len
    }

    /// Number of lines, always at least one.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn last_line(&self) -> usize {
        self.line_starts.len() - 1
    }

    /// Offset where `line` begins, or `None` past the last line.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Returns the line containing `offset`.
    ///
    /// Offsets past the end of the text clamp to the last line.
    pub fn line_of(&self, offset: usize) -> usize {
        let offset = offset.min(self.text_len);
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(insert_pos) => insert_pos.saturating_sub(1),
        }
    }

    /// Full byte range of `line`, terminator included.
    ///
    /// Lines past the end clamp to the last line.
    pub fn line_span(&self, line: usize) -> Range<usize> {
        let line = line.min(self.last_line());
        let start = self.line_starts[line];
        let end = self
            .line_starts
            .get(line + 1)
            .copied()
            .unwrap_or(self.text_len);
        start..end
    }

    /// Byte range of the content of `line`, terminator excluded.
    pub fn line_content(&self, line: usize) -> Range<usize> {
        let span = self.line_span(line);
        let end = if line < self.last_line() {
            span.end - 1
        } else {
            span.end
        };
        span.start..end
    }

    /// Length of `line` excluding its terminator; zero for lines that do not exist.
    pub fn line_length(&self, line: usize) -> usize {
        if line >= self.line_count() {
            return 0;
        }
        self.line_content(line).len()
    }

    /// Byte range covering lines `start_line..end_line`.
    pub fn line_range(&self, start_line: usize, end_line: usize) -> Range<usize> {
        if start_line >= end_line || start_line >= self.line_count() {
            return self.text_len..self.text_len;
        }
        let start = self.line_starts[start_line];
        let end = self
            .line_starts
            .get(end_line)
            .copied()
            .unwrap_or(self.text_len);
        start..end
    }

    /// Content of `line` in `text`, terminator excluded.
    ///
    /// `text` must be the text this index was built from.
    pub fn line_text<'a>(&self, text: &'a str, line: usize) -> &'a str {
        if line >= self.line_count() {
            return "";
        }
        text.get(self.line_content(line)).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "<?php\necho 1;\n";

    #[test]
    fn empty_text_has_one_line() {
        let index = LineIndex::new("");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.line_length(0), 0);
        assert_eq!(index.line_span(0), 0..0);
        assert_eq!(index.line_of(0), 0);
    }

    #[test]
    fn trailing_newline_adds_empty_line() {
        let index = LineIndex::new(SAMPLE);
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_start(0), Some(0));
        assert_eq!(index.line_start(1), Some(6));
        assert_eq!(index.line_start(2), Some(14));
        assert_eq!(index.line_start(3), None);
    }

    #[test]
    fn line_lengths_exclude_terminator() {
        let index = LineIndex::new(SAMPLE);
        assert_eq!(index.line_length(0), 5);
        assert_eq!(index.line_length(1), 7);
        assert_eq!(index.line_length(2), 0);
        assert_eq!(index.line_length(9), 0);
        assert_eq!(index.line_span(0), 0..6);
        assert_eq!(index.line_span(1), 6..14);
    }

    #[test]
    fn line_of_uses_line_starts() {
        let index = LineIndex::new(SAMPLE);
        assert_eq!(index.line_of(0), 0);
        assert_eq!(index.line_of(5), 0);
        assert_eq!(index.line_of(6), 1);
        assert_eq!(index.line_of(13), 1);
        assert_eq!(index.line_of(14), 2);
    }

    #[test]
    fn line_of_clamps_out_of_range_offsets() {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(index.line_of(5), 1);
        assert_eq!(index.line_of(500), 1);
        assert_eq!(index.line_of(usize::MAX), 1);
    }

    #[test]
    fn last_line_without_terminator() {
        let index = LineIndex::new("one\ntwo");
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.line_length(1), 3);
        assert_eq!(index.line_span(1), 4..7);
    }

    #[test]
    fn line_text_strips_terminator() {
        let index = LineIndex::new(SAMPLE);
        assert_eq!(index.line_text(SAMPLE, 0), "<?php");
        assert_eq!(index.line_text(SAMPLE, 1), "echo 1;");
        assert_eq!(index.line_text(SAMPLE, 2), "");
        assert_eq!(index.line_text(SAMPLE, 3), "");
    }

    #[test]
    fn line_range_spans_whole_lines() {
        let index = LineIndex::new("a\nbb\nccc\n");
        assert_eq!(index.line_range(1, 3), 2..9);
        assert_eq!(index.line_range(0, 10), 0..9);
        assert_eq!(index.line_range(2, 2), 9..9);
    }

    #[test]
    fn crlf_keeps_carriage_return_in_content() {
        let text = "a\r\nb";
        let index = LineIndex::new(text);
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.line_text(text, 0), "a\r");
    }
}
