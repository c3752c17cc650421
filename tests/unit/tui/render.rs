use super::*;
use crate::core::PreviewWindow;
use crate::kernel::preview::{TokenSpan, TokenTable};
use crate::kernel::services::adapters::highlight::builtin_theme;
use crate::kernel::services::ports::SearchMatch;
use crate::kernel::{PaintSpan, PreviewContent, Response};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;

fn rows_of(buffer: &Buffer) -> Vec<String> {
    let width = buffer.area.width as usize;
    buffer
        .content
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect())
        .collect()
}

fn hit(line: usize) -> SearchMatch {
    SearchMatch {
        label: format!("src/lib.rs:{line}"),
        description: format!("needle {line}"),
        file_path: "/w/src/lib.rs".into(),
        line,
    }
}

fn loaded_controller() -> SearchController {
    let mut controller = SearchController::new();
    controller.set_viewport(5, 5);
    let _ = controller.set_query("needle");
    let _ = controller.apply_response(Response::Results {
        data: (1..=3).map(|n| hit(n * 10)).collect(),
    });
    let lines = (0..30)
        .map(|n| vec![TokenSpan::new(format!("needle {}", n + 1), "#d4d4d4")])
        .collect();
    let _ = controller.apply_response(Response::PreviewContent {
        data: PreviewContent {
            table: TokenTable::stitch(30, PreviewWindow::new(0, 30), lines),
            line: 10,
            search_term: "needle".into(),
            file_path: "/w/src/lib.rs".into(),
        },
    });
    controller
}

#[test]
fn layout_splits_query_body_and_status() {
    let areas = layout(Rect::new(0, 0, 100, 30));
    assert_eq!(areas.query, Rect::new(0, 0, 100, 3));
    assert_eq!(areas.status, Rect::new(0, 29, 100, 1));
    assert_eq!(areas.list.y, 3);
    assert_eq!(areas.list.height, 26);
    assert_eq!(areas.list.width + areas.preview.width, 100);
    assert_eq!(areas.preview.x, areas.list.width);
}

#[test]
fn inner_saturates_on_tiny_areas() {
    assert_eq!(inner(Rect::new(0, 0, 1, 1)), Rect::new(1, 1, 0, 0));
    assert_eq!(inner(Rect::new(2, 3, 10, 6)), Rect::new(3, 4, 8, 4));
}

#[test]
fn clicks_map_to_scrolled_list_rows() {
    let areas = layout(Rect::new(0, 0, 100, 30));
    let list = inner(areas.list);
    assert_eq!(list_index_at(&areas, 0, list.x, list.y), Some(0));
    assert_eq!(list_index_at(&areas, 4, list.x + 2, list.y + 3), Some(7));
    assert_eq!(list_index_at(&areas, 0, areas.list.x, areas.list.y), None);
    assert_eq!(list_index_at(&areas, 0, areas.preview.x + 2, list.y), None);
}

#[test]
fn preview_gutter_is_right_aligned_and_target_is_bold() {
    let rows = vec![
        PaintRow {
            line_number: 9,
            spans: vec![PaintSpan {
                content: "a".into(),
                color: "#ff0000".into(),
                emphasized: false,
            }],
            is_target: false,
        },
        PaintRow {
            line_number: 10,
            spans: vec![PaintSpan {
                content: "needle".into(),
                color: "#00ff00".into(),
                emphasized: true,
            }],
            is_target: true,
        },
    ];

    let lines = preview_lines(&rows, None);
    assert_eq!(lines[0].spans[0].content, " 9 ");
    assert_eq!(lines[1].spans[0].content, "10 ");
    assert_eq!(lines[0].spans[1].style.fg, Some(Color::Rgb(255, 0, 0)));
    assert!(lines[1].spans[1]
        .style
        .add_modifier
        .contains(Modifier::BOLD | Modifier::UNDERLINED));
    assert!(lines[1].style.add_modifier.contains(Modifier::BOLD));
    assert!(!lines[0].style.add_modifier.contains(Modifier::BOLD));
}

#[test]
fn target_row_is_tinted_with_a_palette() {
    let palette = builtin_theme("dark-plus").unwrap();
    let rows = vec![PaintRow {
        line_number: 1,
        spans: Vec::new(),
        is_target: true,
    }];
    let lines = preview_lines(&rows, Some(&palette));
    let expected = rgb(tint(palette.background, palette.foreground));
    assert_eq!(lines[0].style.bg, Some(expected));
}

#[test]
fn full_frame_shows_query_results_and_preview() {
    let controller = loaded_controller();
    let mut terminal = Terminal::new(TestBackend::new(100, 12)).unwrap();
    terminal
        .draw(|frame| {
            let areas = layout(frame.area());
            draw(frame, &areas, &controller, None);
        })
        .unwrap();

    let rows = rows_of(terminal.backend().buffer());
    assert!(rows[1].contains("> needle"));
    assert!(rows[3].contains("Results (3)"));
    assert!(rows[3].contains("src/lib.rs:10"));
    assert!(rows[4].contains("src/lib.rs:10  needle 10"));
    assert!(rows[5].contains("src/lib.rs:20"));
    assert!(rows.iter().any(|row| row.contains("10 needle 10")));
    assert!(rows[11].contains("3 results"));
}

#[test]
fn status_prefers_error_over_notice() {
    let mut controller = SearchController::new();
    let _ = controller.apply_response(Response::Notification {
        data: "file not found".into(),
    });
    let status: String = status_line(&controller, None)
        .spans
        .iter()
        .map(|span| span.content.as_ref())
        .collect();
    assert!(status.starts_with("file not found"));

    let _ = controller.apply_response(Response::Error {
        data: "rg exited with status 2".into(),
    });
    let status: String = status_line(&controller, None)
        .spans
        .iter()
        .map(|span| span.content.as_ref())
        .collect();
    assert!(status.starts_with("rg exited with status 2"));
}
