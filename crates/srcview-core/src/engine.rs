use crate::events::EngineEvent;
use crate::gutter::{FontMetrics, GutterLine, GutterModel, GutterWidth};
use crate::line_state::LineStateStore;
use srcview_config::GutterConfig;
use srcview_document::{LineIndex, SourceText, Viewport, find_line};
use srcview_syntax::{
    LineFormatRun, LineHighlight, PlainTokenizer, RunTable, StyleTable, TextStyle, TokenCategory,
    TokenMapper, Tokenizer,
};
use std::collections::VecDeque;
use std::fmt;

/// Line index and run table of one loaded text, always replaced together.
#[derive(Debug, Default)]
struct Layout {
    index: LineIndex,
    runs: RunTable,
}

impl Layout {
    fn build<T: Tokenizer + ?Sized>(text: &str, tokenizer: &mut T) -> Self {
        let index = LineIndex::new(text);
        let tokens = tokenizer.tokenize(text);
        let runs = TokenMapper::new().map(&tokens, &index);
        Self { index, runs }
    }
}

/// A piece of one line's text with its resolved style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSegment<'a> {
    pub text: &'a str,
    pub category: TokenCategory,
    pub style: TextStyle,
}

/// Highlighting and line-state engine behind one source view.
///
/// Navigation and breakpoint calls take 1-based line numbers. Rendering
/// queries (`line_runs`, `styled_line`, `gutter`) take 0-based line indices
/// as produced by [`Viewport::range`].
pub struct DocumentEngine {
    source: SourceText,
    layout: Layout,
    line_state: LineStateStore,
    tokenizer: Box<dyn Tokenizer>,
    styles: StyleTable,
    gutter_config: GutterConfig,
    gutter_width: GutterWidth,
    viewport: Viewport,
    events: VecDeque<EngineEvent>,
}

impl fmt::Debug for DocumentEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentEngine")
            .field("source", &self.source.display_name())
            .field("line_count", &self.line_count())
            .field("line_state", &self.line_state)
            .field("viewport", &self.viewport)
            .field("pending_events", &self.events.len())
            .finish()
    }
}

impl Default for DocumentEngine {
    fn default() -> Self {
        Self::new(Box::new(PlainTokenizer), StyleTable::default())
    }
}

impl DocumentEngine {
    /// Creates an engine holding an empty document.
    pub fn new(tokenizer: Box<dyn Tokenizer>, styles: StyleTable) -> Self {
        Self {
            source: SourceText::empty(),
            layout: Layout::default(),
            line_state: LineStateStore::new(),
            tokenizer,
            styles,
            gutter_config: GutterConfig::default(),
            gutter_width: GutterWidth::default(),
            viewport: Viewport::default(),
            events: VecDeque::new(),
        }
    }

    pub fn with_gutter_config(mut self, config: GutterConfig) -> Self {
        self.gutter_config = config;
        self
    }

    /// Replaces the document text.
    ///
    /// The current line is always reset. Breakpoints survive only when
    /// `source` comes from the same file as the previous text.
    pub fn load(&mut self, source: SourceText) {
        let layout = Layout::build(source.as_str(), &mut *self.tokenizer);
        let line_count = layout.index.line_count();
        let same_file = self.source.same_file(&source);

        tracing::debug!(
            "Loaded {} ({} bytes, {} lines, same file: {})",
            source.display_name(),
            source.len(),
            line_count,
            same_file
        );

        self.layout = layout;
        self.source = source;

        if same_file {
            let (first, _) = self.viewport.range(line_count);
            self.viewport.first_line = first;
        } else {
            self.line_state.clear_breakpoints();
            self.viewport.first_line = 0;
        }

        if self.line_state.clear_current().is_some() {
            self.events
                .push_back(EngineEvent::CurrentLineChanged { line: None });
        }
        self.events
            .push_back(EngineEvent::ContentReplaced { line_count });
        self.events.push_back(EngineEvent::GutterInvalidated);
    }

    /// Swaps the tokenizer and re-highlights the current text.
    pub fn set_tokenizer(&mut self, tokenizer: Box<dyn Tokenizer>) {
        self.tokenizer = tokenizer;
        self.layout = Layout::build(self.source.as_str(), &mut *self.tokenizer);
        self.events.push_back(EngineEvent::HighlightChanged);
    }

    pub fn set_style_table(&mut self, styles: StyleTable) {
        self.styles = styles;
        self.events.push_back(EngineEvent::HighlightChanged);
    }

    pub fn set_gutter_config(&mut self, config: GutterConfig) {
        self.gutter_config = config;
        self.gutter_width = GutterWidth::default();
        self.events.push_back(EngineEvent::GutterInvalidated);
    }

    /// Clamps `line_number` into `[1, line_count]`, scrolls it into view and
    /// optionally makes it the current line. Returns the line actually used.
    pub fn move_to(&mut self, line_number: usize, mark_current: bool) -> usize {
        let line_count = self.line_count();
        let line = line_number.clamp(1, line_count);
        if line != line_number {
            tracing::debug!("Clamped line {} to {}", line_number, line);
        }

        self.viewport.ensure_visible(line - 1, line_count);
        if mark_current {
            self.set_current_index(Some(line - 1));
        }
        line
    }

    pub fn clear_current(&mut self) {
        self.set_current_index(None);
    }

    /// Current execution line, 1-based.
    pub fn current_line(&self) -> Option<usize> {
        self.line_state.current().map(|line| line + 1)
    }

    fn set_current_index(&mut self, line: Option<usize>) {
        let previous = self.line_state.set_current(line);
        if previous != line {
            self.events.push_back(EngineEvent::CurrentLineChanged {
                line: line.map(|line| line + 1),
            });
            self.events.push_back(EngineEvent::GutterInvalidated);
        }
    }

    /// Flips the breakpoint on a 1-based line.
    ///
    /// Returns the new state, or `None` when the line is outside the document.
    /// Blank lines accept breakpoints.
    pub fn toggle_breakpoint_at(&mut self, line_number: usize) -> Option<bool> {
        if line_number == 0 || line_number > self.line_count() {
            tracing::debug!(
                "Ignoring breakpoint toggle on line {} of {}",
                line_number,
                self.line_count()
            );
            return None;
        }

        let enabled = self.line_state.toggle_breakpoint(line_number - 1);
        tracing::debug!(
            "Breakpoint on line {} {}",
            line_number,
            if enabled { "set" } else { "removed" }
        );
        self.events.push_back(EngineEvent::BreakpointToggled {
            line: line_number,
            enabled,
        });
        self.events.push_back(EngineEvent::GutterInvalidated);
        Some(enabled)
    }

    pub fn has_breakpoint_at(&self, line_number: usize) -> bool {
        line_number > 0 && self.line_state.has_breakpoint(line_number - 1)
    }

    /// Breakpoint lines, 1-based and ascending, for an external store.
    pub fn breakpoints(&self) -> Vec<usize> {
        self.line_state.breakpoints().map(|line| line + 1).collect()
    }

    /// Replaces all breakpoints with the given 1-based lines.
    ///
    /// Lines past the end of the document are kept; line 0 is ignored.
    pub fn set_breakpoints(&mut self, lines: impl IntoIterator<Item = usize>) {
        let previous = self.line_state.clone();
        self.line_state.clear_breakpoints();
        for line in lines.into_iter().filter(|&line| line > 0) {
            self.line_state.set_breakpoint(line - 1, true);
        }
        if self.line_state != previous {
            self.events.push_back(EngineEvent::GutterInvalidated);
        }
    }

    pub fn clear_breakpoints(&mut self) {
        if self.line_state.breakpoint_count() > 0 {
            self.line_state.clear_breakpoints();
            self.events.push_back(EngineEvent::GutterInvalidated);
        }
    }

    /// 1-based line of the next occurrence of `needle`, searching from the
    /// start of line `from` and wrapping around the end of the document.
    pub fn find(&self, needle: &str, from: usize) -> Option<usize> {
        let from = from.clamp(1, self.line_count()) - 1;
        find_line(self.source.as_str(), &self.layout.index, needle, from).map(|line| line + 1)
    }

    pub fn line_count(&self) -> usize {
        self.layout.index.line_count()
    }

    pub fn source(&self) -> &SourceText {
        &self.source
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.layout.index
    }

    pub fn run_table(&self) -> &RunTable {
        &self.layout.runs
    }

    pub fn line_state(&self) -> &LineStateStore {
        &self.line_state
    }

    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    /// Content of a 0-based line, terminator excluded.
    pub fn line_text(&self, line: usize) -> &str {
        self.layout.index.line_text(self.source.as_str(), line)
    }

    /// Raw runs of a 0-based line, terminator included.
    pub fn line_runs(&self, line: usize) -> &[LineFormatRun] {
        self.layout.runs.runs(line)
    }

    /// Text of a 0-based line split into styled segments covering its content.
    ///
    /// Regions no run covers are styled as plain text.
    pub fn styled_line(&self, line: usize) -> Vec<StyledSegment<'_>> {
        let text = self.line_text(line);
        let runs = self.layout.runs.styled_runs(line);

        segment_line(text, &runs, &self.styles).unwrap_or_else(|| {
            tracing::debug!("Runs of line {} split a character, styling as text", line);
            if text.is_empty() {
                Vec::new()
            } else {
                vec![StyledSegment {
                    text,
                    category: TokenCategory::Text,
                    style: self.styles.style(TokenCategory::Text),
                }]
            }
        })
    }

    /// Gutter rows for the inclusive 0-based range `first..=last`.
    pub fn gutter(&self, first: usize, last: usize) -> Vec<GutterLine> {
        self.gutter_model().visible_lines(first, last)
    }

    /// Gutter rows for the current viewport.
    pub fn visible_gutter(&self) -> Vec<GutterLine> {
        let (first, last) = self.visible_range();
        self.gutter(first, last)
    }

    pub fn gutter_model(&self) -> GutterModel<'_> {
        GutterModel::new(&self.layout.index, &self.line_state, self.gutter_config)
    }

    /// Gutter width in pixels; records a [`EngineEvent::GutterInvalidated`]
    /// when it differs from the last query.
    pub fn gutter_width(&mut self, metrics: FontMetrics) -> u32 {
        let line_count = self.line_count();
        if self
            .gutter_width
            .update(line_count, metrics, self.gutter_config)
            .is_some()
        {
            self.events.push_back(EngineEvent::GutterInvalidated);
        }
        self.gutter_width.width()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Inclusive 0-based range of visible lines.
    pub fn visible_range(&self) -> (usize, usize) {
        self.viewport.range(self.line_count())
    }

    /// Takes all pending events in the order they were recorded.
    pub fn drain_events(&mut self) -> impl Iterator<Item = EngineEvent> + '_ {
        self.events.drain(..)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }
}

fn segment_line<'a>(
    text: &'a str,
    runs: &[LineHighlight],
    styles: &StyleTable,
) -> Option<Vec<StyledSegment<'a>>> {
    let mut segments = Vec::with_capacity(runs.len() + 1);
    let mut column = 0;

    let mut push = |start: usize, end: usize, category: TokenCategory| -> Option<()> {
        segments.push(StyledSegment {
            text: text.get(start..end)?,
            category,
            style: styles.style(category),
        });
        Some(())
    };

    for run in runs {
        let start = run.range.start.max(column);
        let end = run.range.end.min(text.len());
        if start >= end {
            continue;
        }
        if start > column {
            push(column, start, TokenCategory::Text)?;
        }
        push(start, end, run.category)?;
        column = end;
    }
    if column < text.len() {
        push(column, text.len(), TokenCategory::Text)?;
    }

    Some(segments)
}
