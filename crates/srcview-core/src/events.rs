/// Notification recorded by the engine for the GUI layer to poll.
///
/// Line numbers are 1-based, matching the engine's public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// A new text was loaded; all line-based caches are stale.
    ContentReplaced { line_count: usize },
    /// Styling changed without a content change (new tokenizer or theme).
    HighlightChanged,
    /// Gutter rows or width must be redrawn.
    GutterInvalidated,
    BreakpointToggled { line: usize, enabled: bool },
    CurrentLineChanged { line: Option<usize> },
}
