use serde::{Deserialize, Serialize};

use super::search::SearchLimits;

pub const DEFAULT_THEME: &str = "dark-plus";
pub const DEFAULT_OPEN_COMMAND: &str = "code --goto {path}:{line}:{column}";

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

fn default_search_tool() -> String {
    "rg".to_string()
}

fn default_min_query_len() -> usize {
    3
}

fn default_max_results() -> usize {
    500
}

fn default_max_results_per_file() -> usize {
    100
}

fn default_preview_window_lines() -> usize {
    100
}

fn default_search_debounce_ms() -> u64 {
    150
}

fn default_preview_debounce_ms() -> u64 {
    50
}

fn default_open_command() -> String {
    DEFAULT_OPEN_COMMAND.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_search_tool")]
    pub search_tool: String,
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_max_results_per_file")]
    pub max_results_per_file: usize,
    #[serde(default = "default_preview_window_lines")]
    pub preview_window_lines: usize,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    #[serde(default = "default_preview_debounce_ms")]
    pub preview_debounce_ms: u64,
    #[serde(default = "default_open_command")]
    pub open_command: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            search_tool: default_search_tool(),
            min_query_len: default_min_query_len(),
            max_results: default_max_results(),
            max_results_per_file: default_max_results_per_file(),
            preview_window_lines: default_preview_window_lines(),
            search_debounce_ms: default_search_debounce_ms(),
            preview_debounce_ms: default_preview_debounce_ms(),
            open_command: default_open_command(),
        }
    }
}

impl Settings {
    pub fn search_limits(&self) -> SearchLimits {
        SearchLimits {
            min_query_len: self.min_query_len,
            max_results: self.max_results,
            max_results_per_file: self.max_results_per_file,
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
