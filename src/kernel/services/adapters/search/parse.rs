use crate::kernel::services::ports::{SearchLimits, SearchMatch};
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

/// Parse one `path:line:column:text` line of `--vimgrep` output.
///
/// Returns `None` for lines with fewer than four fields or a non-numeric line
/// number. Colons inside the text survive.
pub fn parse_vimgrep_line(line: &str, root: &Path) -> Option<SearchMatch> {
    let line = line.trim_end_matches(['\n', '\r']);
    let mut fields = line.splitn(4, ':');
    let rel = fields.next()?;
    let line_no: usize = fields.next()?.parse().ok()?;
    let _column = fields.next()?;
    let text = fields.next()?;

    if rel.is_empty() {
        return None;
    }

    let rel = rel.strip_prefix("./").unwrap_or(rel);
    Some(SearchMatch {
        label: format!("{rel}:{line_no}"),
        description: text.trim().to_string(),
        file_path: root.join(rel),
        line: line_no,
    })
}

/// Collects matches in discovery order while enforcing the global and
/// per-file caps.
#[derive(Debug)]
pub struct ResultShaper {
    root: PathBuf,
    limits: SearchLimits,
    per_file: FxHashMap<PathBuf, usize>,
    matches: Vec<SearchMatch>,
    skipped: usize,
}

impl ResultShaper {
    pub fn new(root: impl Into<PathBuf>, limits: SearchLimits) -> Self {
        Self {
            root: root.into(),
            limits,
            per_file: FxHashMap::default(),
            matches: Vec::new(),
            skipped: 0,
        }
    }

    /// Feed one output line. Returns `false` once the global cap is reached
    /// and no further input can change the result.
    pub fn push_line(&mut self, line: &str) -> bool {
        if self.is_full() {
            return false;
        }

        let Some(item) = parse_vimgrep_line(line, &self.root) else {
            if !line.trim().is_empty() {
                self.skipped += 1;
                tracing::debug!(line = %line.trim_end(), "skipping unparsable search output");
            }
            return true;
        };

        let count = self.per_file.entry(item.file_path.clone()).or_insert(0);
        if *count < self.limits.max_results_per_file {
            *count += 1;
            self.matches.push(item);
        }

        !self.is_full()
    }

    pub fn is_full(&self) -> bool {
        self.matches.len() >= self.limits.max_results
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn finish(self) -> Vec<SearchMatch> {
        self.matches
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/search/parse.rs"]
mod tests;
