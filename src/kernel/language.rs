use std::path::Path;

/// Language id used when nothing better is known. Always loadable.
pub const PLAIN_TEXT: &str = "text";

/// File extension → highlighting language id.
///
/// Matching is case-sensitive: `a.PY` is plain text.
static EXTENSIONS: &[(&str, &str)] = &[
    ("rs", "rust"),
    ("go", "go"),
    ("py", "python"),
    ("pyi", "python"),
    ("js", "javascript"),
    ("mjs", "javascript"),
    ("cjs", "javascript"),
    ("jsx", "javascript"),
    ("ts", "typescript"),
    ("mts", "typescript"),
    ("cts", "typescript"),
    ("tsx", "tsx"),
    ("c", "c"),
    ("h", "c"),
    ("cc", "cpp"),
    ("cpp", "cpp"),
    ("cxx", "cpp"),
    ("hpp", "cpp"),
    ("hh", "cpp"),
    ("hxx", "cpp"),
    ("java", "java"),
    ("json", "json"),
    ("html", "html"),
    ("htm", "html"),
    ("css", "css"),
    ("toml", "toml"),
    ("sh", "bash"),
    ("bash", "bash"),
    ("zsh", "bash"),
    ("yaml", "yaml"),
    ("yml", "yaml"),
    ("md", "markdown"),
    ("rb", "ruby"),
    ("php", "php"),
    ("cs", "csharp"),
    ("kt", "kotlin"),
    ("swift", "swift"),
    ("lua", "lua"),
    ("sql", "sql"),
    ("xml", "xml"),
];

pub fn classify(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| {
            EXTENSIONS
                .iter()
                .find(|(candidate, _)| *candidate == ext)
                .map(|(_, id)| *id)
        })
        .unwrap_or(PLAIN_TEXT)
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/language.rs"]
mod tests;
