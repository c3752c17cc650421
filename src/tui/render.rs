//! Frame layout and drawing. Everything here is a pure function of the
//! controller state so it can be exercised against ratatui's `TestBackend`.

use crate::kernel::services::adapters::highlight::theme::parse_hex;
use crate::kernel::services::adapters::highlight::Palette;
use crate::kernel::{PaintRow, SearchController};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Areas {
    pub query: Rect,
    pub list: Rect,
    pub preview: Rect,
    pub status: Rect,
}

pub fn layout(area: Rect) -> Areas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);
    Areas {
        query: rows[0],
        list: body[0],
        preview: body[1],
        status: rows[2],
    }
}

/// Content area of a fully bordered block.
pub fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// Result index under a click at (`column`, `row`), before bounds checking
/// against the result count.
pub fn list_index_at(areas: &Areas, scroll: usize, column: u16, row: u16) -> Option<usize> {
    let list = inner(areas.list);
    let inside = column >= list.x
        && column < list.x + list.width
        && row >= list.y
        && row < list.y + list.height;
    inside.then(|| scroll + (row - list.y) as usize)
}

pub fn draw(
    frame: &mut Frame<'_>,
    areas: &Areas,
    controller: &SearchController,
    palette: Option<&Palette>,
) {
    let base = base_style(palette);

    let query = Paragraph::new(Line::from(vec![
        Span::styled("> ", base.add_modifier(Modifier::BOLD)),
        Span::styled(controller.query().to_string(), base),
    ]))
    .block(Block::default().borders(Borders::ALL).title(" Search "))
    .style(base);
    frame.render_widget(query, areas.query);
    let cursor_x = areas.query.x + 3 + controller.query().width() as u16;
    if cursor_x < areas.query.x + areas.query.width.saturating_sub(1) {
        frame.set_cursor_position((cursor_x, areas.query.y + 1));
    }

    let list_height = inner(areas.list).height as usize;
    let title = format!(" Results ({}) ", controller.results().len());
    let list = Paragraph::new(result_lines(controller, list_height, palette))
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(base);
    frame.render_widget(list, areas.list);

    let preview_title = controller
        .selected_match()
        .map(|hit| format!(" {} ", hit.label))
        .unwrap_or_else(|| " Preview ".to_string());
    let preview = Paragraph::new(preview_lines(&controller.paint_preview(), palette))
        .block(Block::default().borders(Borders::ALL).title(preview_title))
        .style(base);
    frame.render_widget(preview, areas.preview);

    frame.render_widget(
        Paragraph::new(status_line(controller, palette)),
        areas.status,
    );
}

pub fn result_lines(
    controller: &SearchController,
    height: usize,
    palette: Option<&Palette>,
) -> Vec<Line<'static>> {
    let base = base_style(palette);
    let dim = palette
        .map(|p| Style::default().fg(rgb(p.gutter)))
        .unwrap_or_else(|| Style::default().add_modifier(Modifier::DIM));
    controller
        .results()
        .iter()
        .enumerate()
        .skip(controller.list_scroll())
        .take(height)
        .map(|(idx, hit)| {
            let mut line = Line::from(vec![
                Span::styled(hit.label.clone(), base),
                Span::raw("  "),
                Span::styled(hit.description.clone(), dim),
            ]);
            if controller.selected() == Some(idx) {
                line = line.style(Style::default().add_modifier(Modifier::REVERSED));
            }
            line
        })
        .collect()
}

pub fn preview_lines(rows: &[PaintRow], palette: Option<&Palette>) -> Vec<Line<'static>> {
    let digits = rows
        .last()
        .map(|row| row.line_number.to_string().len())
        .unwrap_or(1);
    let gutter = palette
        .map(|p| Style::default().fg(rgb(p.gutter)))
        .unwrap_or_default();
    let target_bg = palette.map(|p| rgb(tint(p.background, p.foreground)));

    rows.iter()
        .map(|row| {
            let mut spans = Vec::with_capacity(row.spans.len() + 1);
            let number = format!("{:>digits$} ", row.line_number);
            spans.push(if row.is_target {
                Span::styled(number, gutter.add_modifier(Modifier::BOLD))
            } else {
                Span::styled(number, gutter)
            });
            for span in &row.spans {
                let mut style = Style::default();
                if let Some((r, g, b)) = parse_hex(&span.color) {
                    style = style.fg(Color::Rgb(r, g, b));
                }
                if span.emphasized {
                    style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                }
                spans.push(Span::styled(span.content.clone(), style));
            }
            let line = Line::from(spans);
            match (row.is_target, target_bg) {
                (true, Some(bg)) => line.style(Style::default().bg(bg)),
                (true, None) => line.style(Style::default().add_modifier(Modifier::BOLD)),
                _ => line,
            }
        })
        .collect()
}

pub fn status_line(controller: &SearchController, palette: Option<&Palette>) -> Line<'static> {
    let theme = palette.map(|p| p.name).unwrap_or("-");
    let (text, style) = if let Some(error) = controller.error() {
        (error.to_string(), Style::default().fg(Color::Red))
    } else if let Some(notice) = controller.notice() {
        (notice.to_string(), Style::default().fg(Color::Yellow))
    } else if controller.is_searching() {
        ("searching...".to_string(), Style::default())
    } else {
        (
            format!("{} results", controller.results().len()),
            Style::default(),
        )
    };
    Line::from(vec![
        Span::styled(text, style),
        Span::raw(format!(
            "  [{theme}]  enter: open  ctrl-t: theme  esc: quit"
        )),
    ])
}

fn base_style(palette: Option<&Palette>) -> Style {
    palette
        .map(|p| Style::default().fg(rgb(p.foreground)).bg(rgb(p.background)))
        .unwrap_or_default()
}

fn rgb(color: u32) -> Color {
    Color::Rgb((color >> 16) as u8, (color >> 8) as u8, color as u8)
}

/// `background` nudged an eighth of the way towards `foreground`.
fn tint(background: u32, foreground: u32) -> u32 {
    let channel = |shift: u32| {
        let bg = (background >> shift) & 0xFF;
        let fg = (foreground >> shift) & 0xFF;
        let mixed = (bg * 7 + fg) / 8;
        mixed << shift
    };
    channel(16) | channel(8) | channel(0)
}

#[cfg(test)]
#[path = "../../tests/unit/tui/render.rs"]
mod tests;
