//! Vertical line windowing for previews.
//!
//! A window is a half-open `[start, end)` range of 0-based line indices. The
//! same computation sizes the range the backend tokenizes and the range a
//! surface paints; only the desired length differs.

use serde::{Deserialize, Serialize};
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PreviewWindow {
    pub start: usize,
    pub end: usize,
}

impl PreviewWindow {
    pub const EMPTY: PreviewWindow = PreviewWindow { start: 0, end: 0 };

    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, line: usize) -> bool {
        (self.start..self.end).contains(&line)
    }

    pub fn lines(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Compute a window of `desired` lines centered on `target` inside a file of
/// `total` lines.
///
/// The window is clamped to the file and reflowed toward the start when it
/// would run past the end, so its length is always `min(total, desired)`.
/// `target` past the end of the file is treated as the last line.
pub fn compute_window(target: usize, total: usize, desired: usize) -> PreviewWindow {
    if total == 0 {
        return PreviewWindow::EMPTY;
    }

    let target = target.min(total - 1);
    let mut start = target.saturating_sub(desired / 2);
    let end = start.saturating_add(desired).min(total);
    if end - start < desired {
        start = end.saturating_sub(desired);
    }

    PreviewWindow { start, end }
}

#[cfg(test)]
#[path = "../../tests/unit/core/window.rs"]
mod tests;
