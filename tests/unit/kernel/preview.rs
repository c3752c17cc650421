use super::*;
use crate::core::compute_window;

fn plain(text: &str) -> TokenLine {
    vec![TokenSpan::new(text, "#d4d4d4")]
}

#[test]
fn stitch_places_lines_at_absolute_indices() {
    let window = PreviewWindow::new(3, 5);
    let table = TokenTable::stitch(8, window, vec![plain("three"), plain("four")]);

    assert_eq!(table.len(), 8);
    assert_eq!(table.window, window);
    for idx in 0..8 {
        let line = table.line(idx);
        if window.contains(idx) {
            assert!(!line.is_empty());
        } else {
            assert!(line.is_empty(), "line {idx} should not be computed");
        }
    }
    assert_eq!(line_text(table.line(3)), "three");
    assert_eq!(line_text(table.line(4)), "four");
}

#[test]
fn stitch_ignores_surplus_lines_and_clamps_window() {
    let table = TokenTable::stitch(
        2,
        PreviewWindow::new(1, 9),
        vec![plain("a"), plain("b"), plain("c")],
    );
    assert_eq!(table.len(), 2);
    assert_eq!(table.window, PreviewWindow::new(1, 2));
    assert_eq!(line_text(table.line(1)), "a");
    assert!(table.line(5).is_empty());
}

#[test]
fn table_serializes_with_camel_case_fields() {
    let table = TokenTable::single_line(TokenSpan::new("oops", "#ff0000"));
    let value = serde_json::to_value(&table).unwrap();
    assert_eq!(value["tokenLines"][0][0]["content"], "oops");
    assert_eq!(value["window"]["start"], 0);
    assert_eq!(value["window"]["end"], 1);
}

#[test]
fn line_index_counts_lines_like_an_editor() {
    assert_eq!(LineIndex::new("").line_count(), 1);
    assert_eq!(LineIndex::new("a").line_count(), 1);
    assert_eq!(LineIndex::new("a\n").line_count(), 2);
    assert_eq!(LineIndex::new("a\nb\nc").line_count(), 3);
}

#[test]
fn line_index_byte_range_covers_window_lines() {
    let text = "zero\none\ntwo\nthree\nfour";
    let index = LineIndex::new(text);

    assert_eq!(&text[index.byte_range(PreviewWindow::new(1, 3))], "one\ntwo");
    assert_eq!(&text[index.byte_range(PreviewWindow::new(3, 5))], "three\nfour");
    assert_eq!(&text[index.byte_range(PreviewWindow::new(0, 1))], "zero");
    assert_eq!(&text[index.byte_range(PreviewWindow::EMPTY)], "");
}

#[test]
fn window_slice_has_one_line_per_window_row() {
    let text: String = (0..1000).map(|n| format!("line {n}\n")).collect();
    let index = LineIndex::new(&text);
    let window = compute_window(500, index.line_count(), 100);
    let slice = &text[index.byte_range(window)];

    assert_eq!(slice.split('\n').count(), window.len());
    assert!(slice.starts_with("line 450\n"));
}
