use super::*;
use crate::core::compute_window;
use crate::kernel::preview::{TokenSpan, TokenTable};

fn table_of(lines: &[&[(&str, &str)]]) -> TokenTable {
    let token_lines = lines
        .iter()
        .map(|spans| {
            spans
                .iter()
                .map(|(content, color)| TokenSpan::new(*content, *color))
                .collect::<Vec<TokenSpan>>()
        })
        .collect::<Vec<_>>();
    let total = token_lines.len();
    TokenTable::stitch(total, PreviewWindow::new(0, total), token_lines)
}

#[test]
fn search_words_splits_on_non_word_characters() {
    assert_eq!(search_words("foo.bar_baz(Qux)"), vec!["foo", "bar_baz", "qux"]);
    assert_eq!(search_words("  "), Vec::<String>::new());
    assert_eq!(search_words("::"), Vec::<String>::new());
}

#[test]
fn paint_marks_target_and_numbers_rows() {
    let table = table_of(&[
        &[("a", "#111111")],
        &[("b", "#222222")],
        &[("c", "#333333")],
    ]);
    let rows = paint(&table, PreviewWindow::new(0, 3), &[], 1);

    assert_eq!(rows.len(), 3);
    assert_eq!(
        rows.iter().map(|row| row.line_number).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(
        rows.iter().map(|row| row.is_target).collect::<Vec<_>>(),
        vec![false, true, false]
    );
    assert_eq!(rows[2].spans[0].color, "#333333");
}

#[test]
fn paint_emphasizes_spans_containing_search_words() {
    let table = table_of(&[&[
        ("const", "#569cd6"),
        (" ", "#d4d4d4"),
        ("FooBar", "#9cdcfe"),
        (" = ", "#d4d4d4"),
        ("1", "#b5cea8"),
    ]]);
    let words = search_words("foo");
    let rows = paint(&table, PreviewWindow::new(0, 1), &words, 0);

    let emphasized: Vec<&str> = rows[0]
        .spans
        .iter()
        .filter(|span| span.emphasized)
        .map(|span| span.content.as_str())
        .collect();
    assert_eq!(emphasized, vec!["FooBar"]);
}

#[test]
fn paint_renders_uncomputed_lines_blank() {
    let token_lines = vec![vec![TokenSpan::new("mid", "#ffffff")]];
    let table = TokenTable::stitch(10, PreviewWindow::new(5, 6), token_lines);
    let rows = paint(&table, compute_window(5, 10, 4), &[], 5);

    assert_eq!(rows.len(), 4);
    for row in &rows {
        if row.line_number == 6 {
            assert!(row.is_target);
            assert_eq!(row.spans.len(), 1);
        } else {
            assert!(row.spans.is_empty());
        }
    }
}

#[test]
fn paint_clamps_window_to_table() {
    let table = table_of(&[&[("x", "#000000")]]);
    let rows = paint(&table, PreviewWindow::new(0, 50), &[], 0);
    assert_eq!(rows.len(), 1);
}
