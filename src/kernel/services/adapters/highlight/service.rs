//! 高亮服务
//!
//! 持有引擎实例及已加载的语言/主题。引擎延迟创建，创建失败时每次调用都会重试。

use super::engine::TreeSitterEngine;
use crate::kernel::language::PLAIN_TEXT;
use crate::kernel::preview::TokenLine;
use crate::kernel::services::ports::settings::DEFAULT_THEME;
use crate::kernel::services::ports::{EngineFactory, HighlightEngine, HighlightError};
use rustc_hash::FxHashSet;

/// Languages loaded eagerly when the engine comes up.
const PRELOADED_LANGUAGES: [&str; 6] = [
    PLAIN_TEXT,
    "rust",
    "typescript",
    "javascript",
    "python",
    "json",
];

fn tree_sitter_engine() -> Result<Box<dyn HighlightEngine>, HighlightError> {
    Ok(Box::new(TreeSitterEngine::new()))
}

pub struct HighlightService {
    factory: EngineFactory,
    engine: Option<Box<dyn HighlightEngine>>,
    theme: String,
    languages: FxHashSet<String>,
    themes: FxHashSet<String>,
}

impl std::fmt::Debug for HighlightService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighlightService")
            .field("ready", &self.engine.is_some())
            .field("theme", &self.theme)
            .field("languages", &self.languages)
            .field("themes", &self.themes)
            .finish()
    }
}

impl HighlightService {
    pub fn new(factory: EngineFactory, theme: impl Into<String>) -> Self {
        Self {
            factory,
            engine: None,
            theme: theme.into(),
            languages: FxHashSet::default(),
            themes: FxHashSet::default(),
        }
    }

    pub fn tree_sitter(theme: impl Into<String>) -> Self {
        Self::new(Box::new(tree_sitter_engine), theme)
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn is_ready(&self) -> bool {
        self.engine.is_some()
    }

    pub fn is_language_loaded(&self, id: &str) -> bool {
        self.languages.contains(id)
    }

    /// Create the engine and seed themes and common languages. No-op once
    /// the engine exists.
    pub fn init(&mut self) -> Result<(), HighlightError> {
        if self.engine.is_some() {
            return Ok(());
        }

        let mut engine = (self.factory)().map_err(|e| {
            tracing::warn!(error = %e, "highlighter init failed");
            match e {
                HighlightError::Unavailable(_) => e,
                other => HighlightError::Unavailable(other.to_string()),
            }
        })?;

        self.languages.clear();
        self.themes.clear();

        if let Err(e) = engine.load_theme(DEFAULT_THEME) {
            tracing::warn!(error = %e, "default theme failed to load");
        } else {
            self.themes.insert(DEFAULT_THEME.to_string());
        }
        if !self.themes.contains(&self.theme) {
            match engine.load_theme(&self.theme) {
                Ok(()) => {
                    self.themes.insert(self.theme.clone());
                }
                Err(e) => {
                    tracing::warn!(
                        theme = %self.theme,
                        error = %e,
                        "theme failed to load, falling back to default"
                    );
                    self.theme = DEFAULT_THEME.to_string();
                }
            }
        }
        if !self.themes.contains(&self.theme) {
            return Err(HighlightError::Unavailable(format!(
                "no usable theme ({})",
                self.theme
            )));
        }

        for id in PRELOADED_LANGUAGES {
            match engine.load_language(id) {
                Ok(()) => {
                    self.languages.insert(id.to_string());
                }
                Err(e) => tracing::debug!(language = id, error = %e, "language not preloaded"),
            }
        }

        tracing::info!(
            theme = %self.theme,
            languages = self.languages.len(),
            "highlighter initialized"
        );
        self.engine = Some(engine);
        Ok(())
    }

    /// Make `id` usable, returning the language id to tokenize with. Unknown
    /// languages fall back to plain text.
    pub fn ensure_language(&mut self, id: &str) -> Result<String, HighlightError> {
        self.init()?;
        if self.languages.contains(id) {
            return Ok(id.to_string());
        }

        let Some(engine) = self.engine.as_mut() else {
            return Err(HighlightError::Unavailable("engine missing".to_string()));
        };
        match engine.load_language(id) {
            Ok(()) => {
                tracing::debug!(language = id, "language loaded");
                self.languages.insert(id.to_string());
                Ok(id.to_string())
            }
            Err(e) => {
                tracing::debug!(language = id, error = %e, "falling back to plain text");
                if !self.languages.contains(PLAIN_TEXT) {
                    engine.load_language(PLAIN_TEXT)?;
                    self.languages.insert(PLAIN_TEXT.to_string());
                }
                Ok(PLAIN_TEXT.to_string())
            }
        }
    }

    /// Switch the active theme. On failure the previous theme stays active.
    pub fn set_theme(&mut self, name: &str) -> Result<(), HighlightError> {
        self.init()?;
        if !self.themes.contains(name) {
            let Some(engine) = self.engine.as_mut() else {
                return Err(HighlightError::Unavailable("engine missing".to_string()));
            };
            if let Err(e) = engine.load_theme(name) {
                tracing::warn!(theme = name, error = %e, "theme change rejected");
                return Err(e);
            }
            self.themes.insert(name.to_string());
        }
        tracing::info!(from = %self.theme, to = name, "theme changed");
        self.theme = name.to_string();
        Ok(())
    }

    /// Tokenize `text` as `language` with the active theme. One output line
    /// per `\n`-separated input line.
    pub fn tokenize(&mut self, text: &str, language: &str) -> Result<Vec<TokenLine>, HighlightError> {
        let language = self.ensure_language(language)?;
        let Some(engine) = self.engine.as_ref() else {
            return Err(HighlightError::Unavailable("engine missing".to_string()));
        };

        match engine.code_to_tokens(text, &language, &self.theme) {
            Ok(lines) => Ok(lines),
            Err(e) if language != PLAIN_TEXT => {
                tracing::warn!(language = %language, error = %e, "tokenize failed, retrying as text");
                self.ensure_language(PLAIN_TEXT)?;
                let Some(engine) = self.engine.as_ref() else {
                    return Err(HighlightError::Unavailable("engine missing".to_string()));
                };
                engine.code_to_tokens(text, PLAIN_TEXT, &self.theme)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/highlight/service.rs"]
mod tests;
