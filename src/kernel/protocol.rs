//! Messages exchanged between a surface and the backend.
//!
//! Every message is a JSON object tagged by `type`. On the stdio bridge each
//! message occupies one line.

use crate::kernel::preview::TokenTable;
use crate::kernel::services::ports::SearchMatch;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Request {
    Search {
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    OpenFile {
        file_path: PathBuf,
        line: LineNumber,
    },
    GetPreview {
        data: PreviewRequest,
    },
    SetTheme {
        name: String,
    },
    ToggleTheme,
}

impl Request {
    pub fn kind(&self) -> &'static str {
        match self {
            Request::Search { .. } => "search",
            Request::OpenFile { .. } => "openFile",
            Request::GetPreview { .. } => "getPreview",
            Request::SetTheme { .. } => "setTheme",
            Request::ToggleTheme => "toggleTheme",
        }
    }
}

/// A 1-based line number that hosts may send either as a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineNumber {
    Number(usize),
    Text(String),
}

impl LineNumber {
    pub fn get(&self) -> Option<usize> {
        match self {
            LineNumber::Number(n) => Some(*n),
            LineNumber::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl From<usize> for LineNumber {
    fn from(value: usize) -> Self {
        LineNumber::Number(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    pub file_path: PathBuf,
    /// 1-based.
    pub line: usize,
    pub search_term: String,
    /// Lines the requesting surface intends to paint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_hint: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Response {
    Results { data: Vec<SearchMatch> },
    Error { data: String },
    PreviewContent { data: PreviewContent },
    ThemeChanged,
    Notification { data: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewContent {
    #[serde(flatten)]
    pub table: TokenTable,
    /// 1-based, echoed from the request.
    pub line: usize,
    pub search_term: String,
    pub file_path: PathBuf,
}

impl PreviewContent {
    pub fn answers(&self, file_path: &std::path::Path, line: usize) -> bool {
        self.line == line && self.file_path == file_path
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/protocol.rs"]
mod tests;
