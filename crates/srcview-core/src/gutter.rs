//! Line-number margin: labels, breakpoint markers and width.

use crate::line_state::{LineState, LineStateStore};
use srcview_config::{GutterConfig, ViewerConfig};
use srcview_document::LineIndex;

/// Marker drawn next to a line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Marker {
    #[default]
    None,
    Breakpoint,
    /// A breakpoint on the line execution stopped at.
    BreakpointCurrent,
}

impl Marker {
    pub fn for_state(state: LineState) -> Self {
        match (state.has_breakpoint, state.is_current) {
            (true, true) => Self::BreakpointCurrent,
            (true, false) => Self::Breakpoint,
            _ => Self::None,
        }
    }
}

/// Draw instruction for one gutter row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GutterLine {
    /// 0-based line index
    pub line: usize,
    /// 1-based line number, right-aligned to the widest label
    pub label: String,
    pub marker: Marker,
    /// Current execution line, highlighted by the text area even without a breakpoint
    pub is_current: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    pub glyph_width: u32,
    pub line_height: u32,
}

impl From<&ViewerConfig> for FontMetrics {
    fn from(config: &ViewerConfig) -> Self {
        Self {
            glyph_width: config.glyph_width,
            line_height: config.line_height,
        }
    }
}

/// Square marker position within the gutter, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerRect {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

/// Read-only view combining the line index and line state for the gutter.
#[derive(Debug, Clone, Copy)]
pub struct GutterModel<'a> {
    index: &'a LineIndex,
    state: &'a LineStateStore,
    config: GutterConfig,
}

impl<'a> GutterModel<'a> {
    pub fn new(index: &'a LineIndex, state: &'a LineStateStore, config: GutterConfig) -> Self {
        Self {
            index,
            state,
            config,
        }
    }

    /// Rows for the inclusive 0-based range `first..=last`, clamped to the document.
    pub fn visible_lines(&self, first: usize, last: usize) -> Vec<GutterLine> {
        let line_count = self.index.line_count();
        if first > last || first >= line_count {
            return Vec::new();
        }
        let last = last.min(line_count - 1);
        let width = digit_count(line_count) as usize;

        (first..=last)
            .map(|line| {
                let state = self.state.state(line);
                GutterLine {
                    line,
                    label: format!("{:>width$}", line + 1),
                    marker: Marker::for_state(state),
                    is_current: state.is_current,
                }
            })
            .collect()
    }

    pub fn required_width(&self, metrics: FontMetrics) -> u32 {
        required_width(self.index.line_count(), metrics, self.config)
    }

    /// Marker square for the `row`-th visible row, vertically centred.
    pub fn marker_rect(&self, row: usize, metrics: FontMetrics) -> MarkerRect {
        let size = self.config.marker_size.min(metrics.line_height);
        let top = u32::try_from(row)
            .unwrap_or(u32::MAX)
            .saturating_mul(metrics.line_height);
        MarkerRect {
            x: 0,
            y: top.saturating_add((metrics.line_height - size) / 2),
            size,
        }
    }
}

/// Decimal digits needed for `line_count`, at least one.
pub fn digit_count(line_count: usize) -> u32 {
    line_count.max(1).ilog10() + 1
}

pub fn required_width(line_count: usize, metrics: FontMetrics, config: GutterConfig) -> u32 {
    digit_count(line_count)
        .saturating_mul(metrics.glyph_width)
        .saturating_add(config.marker_padding)
}

/// Cached gutter width that only changes when the digit count or metrics do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GutterWidth {
    digits: u32,
    metrics: Option<FontMetrics>,
    width: u32,
}

impl GutterWidth {
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the new width if it changed since the last update.
    pub fn update(
        &mut self,
        line_count: usize,
        metrics: FontMetrics,
        config: GutterConfig,
    ) -> Option<u32> {
        let digits = digit_count(line_count);
        if digits == self.digits && self.metrics == Some(metrics) {
            return None;
        }

        let width = required_width(line_count, metrics, config);
        self.digits = digits;
        self.metrics = Some(metrics);
        if width == self.width {
            return None;
        }
        tracing::debug!("Gutter width {} -> {} ({} digits)", self.width, width, digits);
        self.width = width;
        Some(width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const METRICS: FontMetrics = FontMetrics {
        glyph_width: 8,
        line_height: 16,
    };

    fn numbered_text(lines: usize) -> String {
        (1..=lines).map(|n| format!("line {n}")).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn digit_count_handles_boundaries() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(1), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(99), 2);
        assert_eq!(digit_count(100), 3);
    }

    #[test]
    fn marker_reflects_line_state() {
        let index = LineIndex::new(&numbered_text(5));
        let mut state = LineStateStore::new();
        state.set_breakpoint(1, true);
        state.set_breakpoint(2, true);
        state.set_current(Some(2));
        let model = GutterModel::new(&index, &state, GutterConfig::default());

        let rows = model.visible_lines(0, 4);
        let markers: Vec<Marker> = rows.iter().map(|row| row.marker).collect();
        assert_eq!(
            markers,
            vec![
                Marker::None,
                Marker::Breakpoint,
                Marker::BreakpointCurrent,
                Marker::None,
                Marker::None,
            ]
        );
        assert!(rows[2].is_current);
    }

    #[test]
    fn current_line_without_breakpoint_has_no_marker() {
        let index = LineIndex::new(&numbered_text(3));
        let mut state = LineStateStore::new();
        state.set_current(Some(0));
        let model = GutterModel::new(&index, &state, GutterConfig::default());

        let rows = model.visible_lines(0, 0);
        assert_eq!(rows[0].marker, Marker::None);
        assert!(rows[0].is_current);
    }

    #[test]
    fn labels_are_one_based_and_right_aligned() {
        let index = LineIndex::new(&numbered_text(12));
        let state = LineStateStore::new();
        let model = GutterModel::new(&index, &state, GutterConfig::default());

        let rows = model.visible_lines(7, 10);
        let labels: Vec<&str> = rows.iter().map(|row| row.label.as_str()).collect();
        assert_eq!(labels, vec![" 8", " 9", "10", "11"]);
        assert_eq!(rows[0].line, 7);
    }

    #[test]
    fn visible_range_is_clamped() {
        let index = LineIndex::new(&numbered_text(3));
        let mut state = LineStateStore::new();
        state.set_breakpoint(50, true);
        let model = GutterModel::new(&index, &state, GutterConfig::default());

        assert_eq!(model.visible_lines(1, 100).len(), 2);
        assert!(model.visible_lines(3, 5).is_empty());
        assert!(model.visible_lines(2, 1).is_empty());
    }

    #[test]
    fn empty_document_has_single_row() {
        let index = LineIndex::new("");
        let state = LineStateStore::new();
        let model = GutterModel::new(&index, &state, GutterConfig::default());

        let rows = model.visible_lines(0, 10);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "1");
        assert_eq!(model.required_width(METRICS), 8 + 14);
    }

    #[test]
    fn width_grows_only_at_power_of_ten() {
        let config = GutterConfig::default();
        let nine = required_width(9, METRICS, config);
        let ten = required_width(10, METRICS, config);
        let eleven = required_width(11, METRICS, config);
        assert!(ten > nine);
        assert_eq!(ten, eleven);
        assert_eq!(ten, 2 * 8 + 14);
    }

    #[test]
    fn cached_width_reports_only_changes() {
        let config = GutterConfig::default();
        let mut width = GutterWidth::default();

        assert_eq!(width.update(9, METRICS, config), Some(22));
        assert_eq!(width.update(9, METRICS, config), None);
        assert_eq!(width.update(10, METRICS, config), Some(30));
        assert_eq!(width.update(11, METRICS, config), None);
        assert_eq!(width.update(99, METRICS, config), None);
        assert_eq!(width.update(100, METRICS, config), Some(38));
        assert_eq!(width.width(), 38);

        let wider = FontMetrics {
            glyph_width: 10,
            line_height: 16,
        };
        assert_eq!(width.update(100, wider, config), Some(44));
    }

    #[test]
    fn marker_rect_is_centred_in_row() {
        let index = LineIndex::new("a\nb");
        let state = LineStateStore::new();
        let model = GutterModel::new(&index, &state, GutterConfig::default());

        assert_eq!(model.marker_rect(0, METRICS), MarkerRect { x: 0, y: 4, size: 8 });
        assert_eq!(model.marker_rect(2, METRICS), MarkerRect { x: 0, y: 36, size: 8 });
    }

    #[test]
    fn marker_rect_saturates_on_huge_rows() {
        let index = LineIndex::new("a");
        let state = LineStateStore::new();
        let model = GutterModel::new(&index, &state, GutterConfig::default());

        let far = u32::MAX as usize / 16 + 1;
        assert_eq!(model.marker_rect(far, METRICS).y, u32::MAX);
        assert_eq!(model.marker_rect(usize::MAX, METRICS).y, u32::MAX);
    }
}
