//! Sparse token tables for windowed previews.
//!
//! A table is as long as the file it describes, but only the lines inside its
//! window carry tokens. Everything else is an empty line that renders blank.

use crate::core::PreviewWindow;
use memchr::memchr_iter;
use serde::{Deserialize, Serialize};
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSpan {
    pub content: String,
    pub color: String,
}

impl TokenSpan {
    pub fn new(content: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            color: color.into(),
        }
    }
}

pub type TokenLine = Vec<TokenSpan>;

pub fn line_text(line: &[TokenSpan]) -> String {
    line.iter().map(|span| span.content.as_str()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTable {
    pub token_lines: Vec<TokenLine>,
    pub window: PreviewWindow,
}

impl TokenTable {
    /// Place `window_lines` at their absolute positions in a table of `total`
    /// lines. Extra lines beyond the window are ignored; missing ones stay
    /// empty.
    pub fn stitch(total: usize, window: PreviewWindow, window_lines: Vec<TokenLine>) -> Self {
        let window = PreviewWindow::new(window.start.min(total), window.end.min(total));
        let mut token_lines = vec![TokenLine::new(); total];
        for (slot, line) in token_lines[window.lines()].iter_mut().zip(window_lines) {
            *slot = line;
        }
        Self {
            token_lines,
            window,
        }
    }

    /// A one-line table, used for previews that stand in for unreadable files.
    pub fn single_line(span: TokenSpan) -> Self {
        Self {
            token_lines: vec![vec![span]],
            window: PreviewWindow::new(0, 1),
        }
    }

    pub fn len(&self) -> usize {
        self.token_lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.token_lines.is_empty()
    }

    pub fn line(&self, idx: usize) -> &[TokenSpan] {
        self.token_lines
            .get(idx)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Byte offsets of line starts in a text buffer.
///
/// A text with `n` newlines has `n + 1` lines; a trailing newline produces a
/// final empty line, matching how editors number lines.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut starts = Vec::with_capacity(text.len() / 32 + 1);
        starts.push(0);
        starts.extend(memchr_iter(b'\n', text.as_bytes()).map(|pos| pos + 1));
        Self {
            starts,
            len: text.len(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Byte range covering the lines of `window`, without the newline that
    /// terminates its last line.
    pub fn byte_range(&self, window: PreviewWindow) -> Range<usize> {
        if window.is_empty() || window.start >= self.starts.len() {
            return self.len..self.len;
        }
        let start = self.starts[window.start];
        let end = match self.starts.get(window.end) {
            Some(next) => next - 1,
            None => self.len,
        };
        start..end.max(start)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/preview.rs"]
mod tests;
