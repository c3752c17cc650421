//! Result list selection and preview state for an interactive surface.
//!
//! The controller is synchronous and knows nothing about timers or transport:
//! every user action returns the intent the surface should forward to the
//! request scheduler, and every backend response is folded in through
//! [`SearchController::apply_response`].

use crate::core::compute_window;
use crate::kernel::paint::{paint, search_words, PaintRow};
use crate::kernel::protocol::{PreviewContent, PreviewRequest, Request, Response};
use crate::kernel::services::ports::SearchMatch;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Search(String),
    Preview(PreviewRequest),
    OpenFile { file_path: PathBuf, line: usize },
    ToggleTheme,
}

impl Intent {
    /// Intents that bypass debouncing map straight onto a request.
    pub fn into_immediate_request(self) -> Option<Request> {
        match self {
            Intent::OpenFile { file_path, line } => Some(Request::OpenFile {
                file_path,
                line: line.into(),
            }),
            Intent::ToggleTheme => Some(Request::ToggleTheme),
            Intent::Search(_) | Intent::Preview(_) => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct SearchController {
    query: String,
    results: Vec<SearchMatch>,
    selected: Option<usize>,
    list_scroll: usize,
    list_height: usize,
    preview: Option<PreviewContent>,
    preview_rows: usize,
    error: Option<String>,
    notice: Option<String>,
    searching: bool,
}

impl SearchController {
    pub fn new() -> Self {
        Self {
            list_height: 1,
            preview_rows: 1,
            ..Self::default()
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchMatch] {
        &self.results
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_match(&self) -> Option<&SearchMatch> {
        self.selected.and_then(|idx| self.results.get(idx))
    }

    pub fn list_scroll(&self) -> usize {
        self.list_scroll
    }

    pub fn preview(&self) -> Option<&PreviewContent> {
        self.preview.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// Rows available to the result list and to the preview pane.
    pub fn set_viewport(&mut self, list_height: usize, preview_rows: usize) {
        self.list_height = list_height.max(1);
        self.preview_rows = preview_rows.max(1);
        if let Some(idx) = self.selected {
            self.keep_row_visible(idx);
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) -> Intent {
        self.query = query.into();
        self.searching = true;
        self.notice = None;
        Intent::Search(self.query.clone())
    }

    pub fn append_char(&mut self, ch: char) -> Intent {
        let mut query = std::mem::take(&mut self.query);
        query.push(ch);
        self.set_query(query)
    }

    pub fn backspace(&mut self) -> Option<Intent> {
        if self.query.is_empty() {
            return None;
        }
        let mut query = std::mem::take(&mut self.query);
        query.pop();
        Some(self.set_query(query))
    }

    /// Move the selection by `delta`, clamped to the list bounds.
    pub fn move_selection(&mut self, delta: isize) -> Option<Intent> {
        let current = self.selected?;
        let last = self.results.len().checked_sub(1)?;
        let next = if delta < 0 {
            current.saturating_sub(delta.unsigned_abs())
        } else {
            current.saturating_add(delta as usize).min(last)
        };
        if next == current {
            return None;
        }
        self.select(next)
    }

    /// A click on the selected row opens it; a click elsewhere selects.
    pub fn click(&mut self, index: usize) -> Option<Intent> {
        if index >= self.results.len() {
            return None;
        }
        if self.selected == Some(index) {
            return self.activate();
        }
        self.select(index)
    }

    pub fn activate(&self) -> Option<Intent> {
        let item = self.selected_match()?;
        Some(Intent::OpenFile {
            file_path: item.file_path.clone(),
            line: item.line,
        })
    }

    pub fn toggle_theme(&self) -> Intent {
        Intent::ToggleTheme
    }

    pub fn apply_response(&mut self, response: Response) -> Option<Intent> {
        match response {
            Response::Results { data } => {
                self.searching = false;
                self.error = None;
                self.results = data;
                self.preview = None;
                self.list_scroll = 0;
                if self.results.is_empty() {
                    self.selected = None;
                    return None;
                }
                self.select(0)
            }
            Response::Error { data } => {
                self.searching = false;
                self.results.clear();
                self.selected = None;
                self.preview = None;
                self.list_scroll = 0;
                self.error = Some(data);
                None
            }
            Response::PreviewContent { data } => {
                let current = self
                    .selected_match()
                    .is_some_and(|item| data.answers(&item.file_path, item.line));
                if current {
                    self.preview = Some(data);
                } else {
                    tracing::debug!(
                        file = %data.file_path.display(),
                        line = data.line,
                        "dropping stale preview"
                    );
                }
                None
            }
            Response::ThemeChanged => self.preview_intent().map(Intent::Preview),
            Response::Notification { data } => {
                self.notice = Some(data);
                None
            }
        }
    }

    /// Paint the preview around its target line, sized to the preview pane.
    pub fn paint_preview(&self) -> Vec<PaintRow> {
        let Some(preview) = self.preview.as_ref() else {
            return Vec::new();
        };
        let total = preview.table.len();
        // The file may have shrunk since the search; keep the marker on a real row.
        let target = preview.line.saturating_sub(1).min(total.saturating_sub(1));
        let window = compute_window(target, total, self.preview_rows);
        paint(
            &preview.table,
            window,
            &search_words(&preview.search_term),
            target,
        )
    }

    fn select(&mut self, index: usize) -> Option<Intent> {
        self.selected = Some(index);
        self.keep_row_visible(index);
        self.preview_intent().map(Intent::Preview)
    }

    fn preview_intent(&self) -> Option<PreviewRequest> {
        let item = self.selected_match()?;
        Some(PreviewRequest {
            file_path: item.file_path.clone(),
            line: item.line,
            search_term: self.query.clone(),
            window_hint: Some(self.preview_rows),
        })
    }

    fn keep_row_visible(&mut self, row: usize) {
        let view_height = self.list_height.max(1);
        if row < self.list_scroll {
            self.list_scroll = row;
        } else if row >= self.list_scroll + view_height {
            self.list_scroll = row + 1 - view_height;
        }
        let max_scroll = self.results.len().saturating_sub(view_height);
        self.list_scroll = self.list_scroll.min(max_scroll);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/controller.rs"]
mod tests;
