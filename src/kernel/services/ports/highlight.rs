use crate::kernel::preview::TokenLine;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HighlightError {
    #[error("highlighter unavailable: {0}")]
    Unavailable(String),
    #[error("unknown language `{0}`")]
    UnknownLanguage(String),
    #[error("unknown theme `{0}`")]
    UnknownTheme(String),
    #[error("language `{0}` is not loaded")]
    LanguageNotLoaded(String),
    #[error("theme `{0}` is not loaded")]
    ThemeNotLoaded(String),
}

/// Tokenizing engine behind the highlight service.
///
/// Languages and themes have to be loaded before `code_to_tokens` may use
/// them. Output has one line per `\n`-separated source line, and the span
/// contents of each line concatenate back to that line (without any trailing
/// `\r`).
pub trait HighlightEngine: Send {
    fn load_language(&mut self, id: &str) -> Result<(), HighlightError>;
    fn load_theme(&mut self, name: &str) -> Result<(), HighlightError>;
    fn code_to_tokens(
        &self,
        text: &str,
        language: &str,
        theme: &str,
    ) -> Result<Vec<TokenLine>, HighlightError>;
}

pub type EngineFactory =
    Box<dyn Fn() -> Result<Box<dyn HighlightEngine>, HighlightError> + Send + Sync>;
