//! Request handling for every surface.
//!
//! Each request runs in its own task and every failure is turned into a
//! response, so a slow search never holds up a preview and a failing request
//! leaves nothing behind for the next one.

use super::editor::CommandEditorHost;
use super::highlight::{next_theme, HighlightService};
use super::search::SearchExecutor;
use super::settings::SettingsStore;
use crate::core::compute_window;
use crate::kernel::language::classify;
use crate::kernel::preview::{LineIndex, TokenSpan, TokenTable};
use crate::kernel::protocol::{LineNumber, PreviewContent, PreviewRequest, Request, Response};
use crate::kernel::services::ports::{EditorHost, HighlightError, Settings};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

const BINARY_SNIFF_LEN: usize = 8 * 1024;
const ERROR_COLOR: &str = "#f44747";

#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} looks like a binary file", .0.display())]
    Binary(PathBuf),
    #[error("{} is not valid UTF-8", .0.display())]
    InvalidUtf8(PathBuf),
    #[error(transparent)]
    Highlight(#[from] HighlightError),
    #[error("preview task failed: {0}")]
    Task(String),
}

pub fn build_runtime() -> io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .or_else(|e| {
            tracing::error!(
                error = %e,
                "Failed to create multi-thread tokio runtime, falling back to current-thread"
            );
            tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
        })
}

pub struct Backend {
    root: PathBuf,
    window_lines: usize,
    executor: SearchExecutor,
    highlight: Arc<Mutex<HighlightService>>,
    editor: Arc<dyn EditorHost>,
    store: Option<SettingsStore>,
}

impl Backend {
    pub fn new(
        root: impl Into<PathBuf>,
        settings: &Settings,
        highlight: HighlightService,
        editor: Arc<dyn EditorHost>,
    ) -> Self {
        Self {
            root: root.into(),
            window_lines: settings.preview_window_lines.max(1),
            executor: SearchExecutor::from_settings(settings),
            highlight: Arc::new(Mutex::new(highlight)),
            editor,
            store: None,
        }
    }

    /// Backend with the tree-sitter highlighter and the configured open command.
    pub fn from_settings(root: impl Into<PathBuf>, settings: &Settings) -> Self {
        Self::new(
            root,
            settings,
            HighlightService::tree_sitter(settings.theme.clone()),
            Arc::new(CommandEditorHost::new(settings.open_command.clone())),
        )
    }

    /// Persist theme changes to `store`.
    pub fn with_store(mut self, store: SettingsStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn theme(&self) -> String {
        lock(&self.highlight).theme().to_string()
    }

    pub async fn handle(&self, request: Request) -> Vec<Response> {
        tracing::debug!(kind = request.kind(), "request");
        match request {
            Request::Search { text } => vec![self.search(&text).await],
            Request::GetPreview { data } => self.preview(data).await.into_iter().collect(),
            Request::OpenFile { file_path, line } => {
                self.open_file(&file_path, &line).into_iter().collect()
            }
            Request::SetTheme { name } => vec![self.set_theme(&name).await],
            Request::ToggleTheme => vec![self.toggle_theme().await],
        }
    }

    pub async fn search(&self, term: &str) -> Response {
        match self.executor.search(term, &self.root).await {
            Ok(matches) => {
                tracing::info!(term, matches = matches.len(), "search complete");
                Response::Results { data: matches }
            }
            Err(e) => {
                tracing::error!(term, error = %e, "search failed");
                Response::Error {
                    data: e.to_string(),
                }
            }
        }
    }

    /// Tokenize the window around the requested line.
    ///
    /// Unreadable files produce a one-line preview describing the problem.
    /// Returns `None` while the highlighter is unavailable.
    pub async fn preview(&self, request: PreviewRequest) -> Option<Response> {
        let PreviewRequest {
            file_path,
            line,
            search_term,
            window_hint,
        } = request;
        let desired = window_hint.map_or(self.window_lines, |hint| hint.max(self.window_lines));

        let table = match read_source(&file_path).await {
            Ok(text) => match self.tokenize_window(text, &file_path, line, desired).await {
                Ok(table) => table,
                Err(PreviewError::Highlight(e)) => {
                    tracing::warn!(file = %file_path.display(), error = %e, "preview skipped");
                    return None;
                }
                Err(e) => {
                    tracing::error!(file = %file_path.display(), error = %e, "preview failed");
                    error_table(&e)
                }
            },
            Err(e) => {
                tracing::debug!(error = %e, "preview of unreadable file");
                error_table(&e)
            }
        };

        Some(Response::PreviewContent {
            data: PreviewContent {
                table,
                line,
                search_term,
                file_path,
            },
        })
    }

    async fn tokenize_window(
        &self,
        text: String,
        path: &Path,
        line: usize,
        desired: usize,
    ) -> Result<TokenTable, PreviewError> {
        let language = classify(path);
        let highlight = self.highlight.clone();
        tokio::task::spawn_blocking(move || {
            let index = LineIndex::new(&text);
            let total = index.line_count();
            let window = compute_window(line.saturating_sub(1), total, desired);
            let lines = lock(&highlight).tokenize(&text[index.byte_range(window)], language)?;
            Ok::<_, PreviewError>(TokenTable::stitch(total, window, lines))
        })
        .await
        .map_err(|e| PreviewError::Task(e.to_string()))?
    }

    pub fn open_file(&self, path: &Path, line: &LineNumber) -> Option<Response> {
        let Some(line) = line.get() else {
            return Some(Response::Notification {
                data: format!("Invalid line number {line:?} for {}", path.display()),
            });
        };
        match self.editor.open(path, line) {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(file = %path.display(), line, error = %e, "open failed");
                Some(Response::Notification {
                    data: e.to_string(),
                })
            }
        }
    }

    pub async fn set_theme(&self, name: &str) -> Response {
        let highlight = self.highlight.clone();
        let store = self.store.clone();
        let owned = name.to_string();
        let result = tokio::task::spawn_blocking(move || {
            lock(&highlight).set_theme(&owned)?;
            if let Some(store) = store {
                if let Err(e) = store.save_theme(&owned) {
                    tracing::warn!(error = %e, "theme preference not saved");
                }
            }
            Ok::<(), HighlightError>(())
        })
        .await;

        match result {
            Ok(Ok(())) => Response::ThemeChanged,
            Ok(Err(e)) => Response::Notification {
                data: format!("Failed to load theme {name}: {e}"),
            },
            Err(e) => Response::Notification {
                data: format!("Failed to load theme {name}: {e}"),
            },
        }
    }

    pub async fn toggle_theme(&self) -> Response {
        let next = next_theme(&self.theme());
        self.set_theme(next).await
    }

    /// Serve requests from `requests` until the channel closes, one task per
    /// request.
    pub fn spawn(
        self: Arc<Self>,
        handle: &tokio::runtime::Handle,
        mut requests: UnboundedReceiver<Request>,
        responses: UnboundedSender<Response>,
    ) -> JoinHandle<()> {
        handle.spawn(async move {
            while let Some(request) = requests.recv().await {
                let backend = self.clone();
                let responses = responses.clone();
                tokio::spawn(async move {
                    for response in backend.handle(request).await {
                        if responses.send(response).is_err() {
                            break;
                        }
                    }
                });
            }
        })
    }
}

fn lock(service: &Mutex<HighlightService>) -> MutexGuard<'_, HighlightService> {
    service.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("highlighter lock poisoned, recovering");
        poisoned.into_inner()
    })
}

async fn read_source(path: &Path) -> Result<String, PreviewError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| PreviewError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let head = &bytes[..bytes.len().min(BINARY_SNIFF_LEN)];
    if memchr::memchr(0, head).is_some() {
        return Err(PreviewError::Binary(path.to_path_buf()));
    }
    String::from_utf8(bytes).map_err(|_| PreviewError::InvalidUtf8(path.to_path_buf()))
}

fn error_table(error: &PreviewError) -> TokenTable {
    TokenTable::single_line(TokenSpan::new(error.to_string(), ERROR_COLOR))
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/backend.rs"]
mod tests;
