//! ripgrep 进程调用
//!
//! 每次搜索启动一个新进程：stdout 逐行流式解析，stderr 在独立任务中读取
//! (有上限)。达到全局结果上限后直接结束进程。

use super::parse::ResultShaper;
use crate::kernel::services::ports::search::Result;
use crate::kernel::services::ports::{SearchError, SearchLimits, SearchMatch, Settings};
use std::io;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::{ChildStderr, Command};

const SEARCH_ARGS: [&str; 3] = ["-F", "--vimgrep", "--ignore-case"];
/// Passing the term through `-e` keeps a leading `-` from being read as a flag.
const PATTERN_FLAG: &str = "-e";
const STDERR_CAPTURE_LIMIT: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub struct SearchExecutor {
    tool: String,
    limits: SearchLimits,
}

impl SearchExecutor {
    pub fn new(tool: impl Into<String>, limits: SearchLimits) -> Self {
        Self {
            tool: tool.into(),
            limits,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.search_tool.clone(), settings.search_limits())
    }

    pub fn command_line(&self, term: &str) -> String {
        format!(
            "{} {} {PATTERN_FLAG} {term} .",
            self.tool,
            SEARCH_ARGS.join(" ")
        )
    }

    /// Run the search tool for `term` in `root` and collect shaped matches.
    ///
    /// Terms shorter than the configured minimum return no matches without
    /// starting a process. Exit status 1 means "nothing found".
    pub async fn search(&self, term: &str, root: &Path) -> Result<Vec<SearchMatch>> {
        if term.chars().count() < self.limits.min_query_len {
            return Ok(Vec::new());
        }

        let command = self.command_line(term);
        let mut child = Command::new(&self.tool)
            .args(SEARCH_ARGS)
            .arg(PATTERN_FLAG)
            .arg(term)
            .arg(".")
            .current_dir(root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| SearchError::Spawn {
                command: command.clone(),
                source,
            })?;

        tracing::debug!(command = %command, root = %root.display(), "search started");

        let stderr_task = child.stderr.take().map(|stderr| tokio::spawn(drain(stderr)));
        let stdout = child.stdout.take().ok_or_else(|| SearchError::Io {
            command: command.clone(),
            source: io::Error::new(io::ErrorKind::BrokenPipe, "stdout not captured"),
        })?;

        let mut shaper = ResultShaper::new(root, self.limits);
        let mut reader = BufReader::new(stdout);
        let mut buf = Vec::with_capacity(256);
        let mut capped = false;
        loop {
            buf.clear();
            let n = reader
                .read_until(b'\n', &mut buf)
                .await
                .map_err(|source| SearchError::Io {
                    command: command.clone(),
                    source,
                })?;
            if n == 0 {
                break;
            }
            if !shaper.push_line(&String::from_utf8_lossy(&buf)) {
                capped = true;
                break;
            }
        }

        if capped {
            let _ = child.start_kill();
            let _ = child.wait().await;
            tracing::info!(
                command = %command,
                matches = shaper.len(),
                "search stopped at result cap"
            );
            return Ok(shaper.finish());
        }

        let status = child.wait().await.map_err(|source| SearchError::Io {
            command: command.clone(),
            source,
        })?;
        let stderr = match stderr_task {
            Some(task) => task.await.unwrap_or_default(),
            None => String::new(),
        };

        match status.code() {
            Some(0) | Some(1) => {
                tracing::debug!(
                    command = %command,
                    matches = shaper.len(),
                    skipped = shaper.skipped(),
                    "search finished"
                );
                Ok(shaper.finish())
            }
            _ => {
                tracing::warn!(command = %command, status = %status, "search failed");
                Err(SearchError::Exit {
                    command,
                    status,
                    stderr: stderr.trim().to_string(),
                })
            }
        }
    }
}

async fn drain(mut stderr: ChildStderr) -> String {
    let mut captured = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        match stderr.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                let room = STDERR_CAPTURE_LIMIT.saturating_sub(captured.len());
                captured.extend_from_slice(&chunk[..n.min(room)]);
            }
        }
    }
    String::from_utf8_lossy(&captured).into_owned()
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/search/executor.rs"]
mod tests;
