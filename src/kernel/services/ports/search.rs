use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

pub type Result<T> = std::result::Result<T, SearchError>;

/// One matched line reported by the search tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatch {
    /// `<relative path>:<line>`
    pub label: String,
    /// Matched line text, trimmed.
    pub description: String,
    pub file_path: PathBuf,
    /// 1-based.
    pub line: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("`{command}` exited with {status}: {stderr}")]
    Exit {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("error reading output of `{command}`: {source}")]
    Io {
        command: String,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub min_query_len: usize,
    pub max_results: usize,
    pub max_results_per_file: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            min_query_len: 3,
            max_results: 500,
            max_results_per_file: 100,
        }
    }
}
