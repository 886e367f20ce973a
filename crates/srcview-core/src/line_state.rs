use std::collections::BTreeSet;

/// Flags of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineState {
    pub has_breakpoint: bool,
    pub is_current: bool,
}

/// Sparse per-line breakpoint and current-line flags, keyed by 0-based line.
///
/// Lines are not checked against any document: a breakpoint past the end of
/// a shorter reloaded file is kept and simply never drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineStateStore {
    breakpoints: BTreeSet<usize>,
    current: Option<usize>,
}

impl LineStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the breakpoint on `line` and returns whether it is now set.
    pub fn toggle_breakpoint(&mut self, line: usize) -> bool {
        if self.breakpoints.remove(&line) {
            false
        } else {
            self.breakpoints.insert(line);
            true
        }
    }

    pub fn set_breakpoint(&mut self, line: usize, enabled: bool) {
        if enabled {
            self.breakpoints.insert(line);
        } else {
            self.breakpoints.remove(&line);
        }
    }

    pub fn has_breakpoint(&self, line: usize) -> bool {
        self.breakpoints.contains(&line)
    }

    /// Breakpoint lines in ascending order.
    pub fn breakpoints(&self) -> impl Iterator<Item = usize> + '_ {
        self.breakpoints.iter().copied()
    }

    pub fn breakpoint_count(&self) -> usize {
        self.breakpoints.len()
    }

    pub fn clear_breakpoints(&mut self) {
        self.breakpoints.clear();
    }

    /// Makes `line` the only current line, or clears it with `None`.
    ///
    /// Returns the previous current line.
    pub fn set_current(&mut self, line: Option<usize>) -> Option<usize> {
        std::mem::replace(&mut self.current, line)
    }

    pub fn clear_current(&mut self) -> Option<usize> {
        self.set_current(None)
    }

    pub fn is_current(&self, line: usize) -> bool {
        self.current == Some(line)
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn state(&self, line: usize) -> LineState {
        LineState {
            has_breakpoint: self.has_breakpoint(line),
            is_current: self.is_current(line),
        }
    }
}
