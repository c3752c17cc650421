use super::classify::{classify_node, HighlightKind};
use super::theme::{self, Palette};
use crate::kernel::language::PLAIN_TEXT;
use crate::kernel::preview::{TokenLine, TokenSpan};
use crate::kernel::services::ports::{HighlightEngine, HighlightError};
use rustc_hash::FxHashMap;
use tree_sitter::{Language, Parser, Tree};

fn grammar(id: &str) -> Option<Language> {
    let language = match id {
        "rust" => tree_sitter_rust::language(),
        "go" => tree_sitter_go::language(),
        "python" => tree_sitter_python::language(),
        "c" => tree_sitter_c::language(),
        "cpp" => tree_sitter_cpp::language(),
        "java" => tree_sitter_java::language(),
        "javascript" => tree_sitter_javascript::language(),
        "typescript" => tree_sitter_typescript::language_typescript(),
        "tsx" => tree_sitter_typescript::language_tsx(),
        "json" => tree_sitter_json::language(),
        "html" => tree_sitter_html::language(),
        "css" => tree_sitter_css::language(),
        "toml" => tree_sitter_toml::language(),
        "bash" => tree_sitter_bash::language(),
        _ => return None,
    };
    Some(language)
}

/// In-process highlighter backed by tree-sitter grammars and the built-in
/// palettes.
#[derive(Default)]
pub struct TreeSitterEngine {
    languages: FxHashMap<String, Option<Language>>,
    themes: FxHashMap<String, Palette>,
}

impl TreeSitterEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HighlightEngine for TreeSitterEngine {
    fn load_language(&mut self, id: &str) -> Result<(), HighlightError> {
        if self.languages.contains_key(id) {
            return Ok(());
        }
        let language = if id == PLAIN_TEXT {
            None
        } else {
            Some(grammar(id).ok_or_else(|| HighlightError::UnknownLanguage(id.to_string()))?)
        };
        self.languages.insert(id.to_string(), language);
        Ok(())
    }

    fn load_theme(&mut self, name: &str) -> Result<(), HighlightError> {
        if self.themes.contains_key(name) {
            return Ok(());
        }
        let palette =
            theme::builtin(name).ok_or_else(|| HighlightError::UnknownTheme(name.to_string()))?;
        self.themes.insert(name.to_string(), palette);
        Ok(())
    }

    fn code_to_tokens(
        &self,
        text: &str,
        language: &str,
        theme: &str,
    ) -> Result<Vec<TokenLine>, HighlightError> {
        let palette = self
            .themes
            .get(theme)
            .ok_or_else(|| HighlightError::ThemeNotLoaded(theme.to_string()))?;
        let grammar = self
            .languages
            .get(language)
            .ok_or_else(|| HighlightError::LanguageNotLoaded(language.to_string()))?;

        let Some(grammar) = grammar else {
            return Ok(plain_lines(text, palette));
        };

        let mut parser = Parser::new();
        parser
            .set_language(*grammar)
            .map_err(|e| HighlightError::Unavailable(e.to_string()))?;
        let Some(tree) = parser.parse(text, None) else {
            tracing::debug!(language, "parse produced no tree");
            return Ok(plain_lines(text, palette));
        };

        let kinds = classify_bytes(&tree, text.as_bytes());
        Ok(colored_lines(text, &kinds, palette))
    }
}

fn plain_lines(text: &str, palette: &Palette) -> Vec<TokenLine> {
    let foreground = palette.foreground_hex();
    text.split('\n')
        .map(|line| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.is_empty() {
                Vec::new()
            } else {
                vec![TokenSpan::new(line, foreground.clone())]
            }
        })
        .collect()
}

/// Highlight kind of every source byte. Nodes are visited parent-first, so
/// the innermost classified node wins.
fn classify_bytes(tree: &Tree, source: &[u8]) -> Vec<Option<HighlightKind>> {
    let mut kinds = vec![None; source.len()];
    let mut stack = vec![tree.root_node()];

    while let Some(node) = stack.pop() {
        let start = node.start_byte().min(source.len());
        let end = node.end_byte().min(source.len());
        if start >= end {
            continue;
        }

        if let Some(kind) = classify_node(node, source) {
            kinds[start..end].fill(Some(kind));
            if kind.is_leaf() {
                continue;
            }
        }

        for i in (0..node.child_count()).rev() {
            if let Some(child) = node.child(i) {
                stack.push(child);
            }
        }
    }

    kinds
}

fn colored_lines(text: &str, kinds: &[Option<HighlightKind>], palette: &Palette) -> Vec<TokenLine> {
    let mut lines = Vec::new();
    let mut offset = 0;
    for raw in text.split('\n') {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        lines.push(line_spans(line, offset, kinds, palette));
        offset += raw.len() + 1;
    }
    lines
}

fn line_spans(
    line: &str,
    offset: usize,
    kinds: &[Option<HighlightKind>],
    palette: &Palette,
) -> TokenLine {
    let color_at = |idx: usize| {
        let rgb = kinds
            .get(offset + idx)
            .copied()
            .flatten()
            .map(|kind| palette.color(kind.color_group()))
            .unwrap_or(palette.foreground);
        if line[idx..].starts_with(char::is_whitespace) {
            None
        } else {
            Some(rgb)
        }
    };

    let mut spans: TokenLine = Vec::new();
    let mut run_start = 0;
    let mut run_color: Option<u32> = None;
    for (idx, _) in line.char_indices() {
        let color = color_at(idx);
        // Whitespace joins whatever run it sits in.
        let Some(color) = color else {
            continue;
        };
        match run_color {
            Some(current) if current == color => {}
            Some(current) => {
                spans.push(TokenSpan::new(&line[run_start..idx], theme::hex(current)));
                run_start = idx;
                run_color = Some(color);
            }
            None => run_color = Some(color),
        }
    }
    if run_start < line.len() {
        let color = run_color.unwrap_or(palette.foreground);
        spans.push(TokenSpan::new(&line[run_start..], theme::hex(color)));
    }
    spans
}
