use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("open command is empty")]
    NoCommand,
    #[error("failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },
}

/// Reveals a file location in the host editor.
pub trait EditorHost: Send + Sync {
    /// `line` is 1-based; the caret lands on the first column.
    fn open(&self, path: &Path, line: usize) -> Result<(), OpenError>;
}
