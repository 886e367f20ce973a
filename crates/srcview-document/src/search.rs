//! Forward text search used by the viewer's find command

use crate::line_index::LineIndex;
use memchr::memmem;

/// Finds the first occurrence of `pattern` at or after byte offset `from`,
/// wrapping around to the start of `text` if nothing follows.
pub fn find_from(text: &str, pattern: &str, from: usize) -> Option<usize> {
    if pattern.is_empty() || pattern.len() > text.len() {
        return None;
    }

    let haystack = text.as_bytes();
    let finder = memmem::Finder::new(pattern.as_bytes());
    let from = from.min(haystack.len());

    if let Some(pos) = finder.find(&haystack[from..]) {
        return Some(pos + from);
    }

    // A match may straddle `from`, so the wrapped search overlaps it.
    let wrap_end = from.saturating_add(pattern.len() - 1).min(haystack.len());
    finder.find(&haystack[..wrap_end])
}

/// Line (0-based) of the next match of `pattern`, searching from the start of `from_line`.
pub fn find_line(text: &str, index: &LineIndex, pattern: &str, from_line: usize) -> Option<usize> {
    let from = index.line_start(from_line).unwrap_or(index.text_len());
    find_from(text, pattern, from).map(|offset| index.line_of(offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_search() {
        let text = "hello world hello universe";
        assert_eq!(find_from(text, "hello", 0), Some(0));
        assert_eq!(find_from(text, "hello", 1), Some(12));
    }

    #[test]
    fn test_wraps_to_start() {
        let text = "hello world hello universe";
        assert_eq!(find_from(text, "world", 10), Some(6));
    }

    #[test]
    fn test_wrap_finds_match_straddling_start_offset() {
        let text = "abcdef";
        assert_eq!(find_from(text, "cde", 3), Some(2));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(find_from("hello world", "xyz", 0), None);
    }

    #[test]
    fn test_empty_pattern() {
        assert_eq!(find_from("hello world", "", 0), None);
    }

    #[test]
    fn test_pattern_longer_than_text() {
        assert_eq!(find_from("hello", "hello world", 0), None);
    }

    #[test]
    fn test_offset_past_end() {
        assert_eq!(find_from("abc", "b", 99), Some(1));
    }

    #[test]
    fn test_find_line() {
        let text = "<?php\n$a = 1;\necho $a;\n";
        let index = LineIndex::new(text);
        assert_eq!(find_line(text, &index, "$a", 0), Some(1));
        assert_eq!(find_line(text, &index, "$a", 2), Some(2));
        assert_eq!(find_line(text, &index, "<?php", 1), Some(0));
        assert_eq!(find_line(text, &index, "missing", 0), None);
    }
}
