//! Toolkit-independent preview painting.

use crate::core::PreviewWindow;
use crate::kernel::preview::TokenTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintSpan {
    pub content: String,
    pub color: String,
    pub emphasized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintRow {
    /// 1-based, as shown in the gutter.
    pub line_number: usize,
    pub spans: Vec<PaintSpan>,
    pub is_target: bool,
}

/// Lowercased words of a search term, split on anything that is not
/// alphanumeric or `_`.
pub fn search_words(term: &str) -> Vec<String> {
    term.split(|ch: char| !(ch.is_alphanumeric() || ch == '_'))
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn is_emphasized(content: &str, words: &[String]) -> bool {
    if words.is_empty() {
        return false;
    }
    let content = content.to_lowercase();
    words.iter().any(|word| content.contains(word.as_str()))
}

/// Paint the rows of `window` from `table`. Rows outside the computed part of
/// the table come out with no spans.
pub fn paint(
    table: &TokenTable,
    window: PreviewWindow,
    words: &[String],
    target: usize,
) -> Vec<PaintRow> {
    let end = window.end.min(table.len());
    let start = window.start.min(end);

    (start..end)
        .map(|idx| PaintRow {
            line_number: idx + 1,
            spans: table
                .line(idx)
                .iter()
                .map(|span| PaintSpan {
                    content: span.content.clone(),
                    color: span.color.clone(),
                    emphasized: is_emphasized(&span.content, words),
                })
                .collect(),
            is_target: idx == target,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/paint.rs"]
mod tests;
