/// Window of lines currently visible in the text area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// First visible line, 0-based
    pub first_line: usize,
    /// Number of rows that fit in the view, including a partially visible last row
    pub visible_lines: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            first_line: 0,
            visible_lines: 100,
        }
    }
}

impl Viewport {
    pub fn new(first_line: usize, visible_lines: usize) -> Self {
        Self {
            first_line,
            visible_lines: visible_lines.max(1),
        }
    }

    /// Derives the viewport from a pixel scroll position and view height.
    pub fn from_scroll(scroll_y: f32, height: f32, line_height: f32) -> Self {
        if line_height.is_nan() || line_height <= 0.0 {
            return Self::new(0, 1);
        }
        let first_line = (scroll_y.max(0.0) / line_height).floor() as usize;
        let visible_lines = (height.max(0.0) / line_height).ceil() as usize + 1;
        Self::new(first_line, visible_lines)
    }

    /// Inclusive `(first, last)` line range clamped to a document of `line_count` lines.
    pub fn range(&self, line_count: usize) -> (usize, usize) {
        let last_index = line_count.saturating_sub(1);
        let first = self.first_line.min(last_index);
        let last = first
            .saturating_add(self.visible_lines.max(1) - 1)
            .min(last_index);
        (first, last)
    }

    /// Scrolls the minimum amount needed for `line` to be visible.
    ///
    /// Returns true if the viewport moved.
    pub fn ensure_visible(&mut self, line: usize, line_count: usize) -> bool {
        let line = line.min(line_count.saturating_sub(1));
        let visible = self.visible_lines.max(1);
        let previous = self.first_line;

        if line < self.first_line {
            self.first_line = line;
        } else if line - self.first_line >= visible {
            self.first_line = line.saturating_sub(visible - 1);
        }

        previous != self.first_line
    }
}
