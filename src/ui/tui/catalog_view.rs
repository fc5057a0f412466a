use crate::app::{App, UiFocus};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    prelude::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::styles::{control_style, disabled_style, focus_style, highlight_style};

pub(super) fn draw_catalog(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let title_width = app
        .available_songs
        .iter()
        .map(|s| s.display_title().width())
        .max()
        .unwrap_or(0);
    let items: Vec<ListItem> = app
        .available_songs
        .iter()
        .map(|s| {
            let title = s.display_title();
            let pad = title_width.saturating_sub(title.width());
            ListItem::new(Line::from(vec![
                Span::raw(title.to_owned()),
                Span::raw(" ".repeat(pad + 2)),
                Span::styled("[Agregar]", control_style(Color::Cyan)),
            ]))
        })
        .collect();

    let focused = app.ui_focus == UiFocus::Catalog;
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Agregar canciones a la lista de reproducción (a agregar, ←/→ página)")
                .border_style(focus_style(focused)),
        )
        .highlight_style(highlight_style());

    let mut st = ListState::default();
    if focused && !app.available_songs.is_empty() {
        st.select(Some(app.catalog_selected));
    }
    f.render_stateful_widget(list, chunks[0], &mut st);

    f.render_widget(Paragraph::new(pagination_line(app)), chunks[1]);
}

/// 游标为空的一侧渲染为禁用态
pub(super) fn pagination_line(app: &App) -> Line<'static> {
    let enabled = Style::default().fg(Color::Cyan);
    let prev_style = if app.previous_page.is_some() {
        enabled
    } else {
        disabled_style()
    };
    let next_style = if app.next_page.is_some() {
        enabled
    } else {
        disabled_style()
    };
    Line::from(vec![
        Span::styled("◀ Página Anterior", prev_style),
        Span::raw(format!("   Página {}   ", app.current_page)),
        Span::styled("Página Siguiente ▶", next_style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_disables_missing_cursors() {
        let mut app = App::new(1);
        app.next_page = Some(2);

        let line = pagination_line(&app);
        assert_eq!(line.spans[0].style, disabled_style());
        assert_eq!(line.spans[2].style.fg, Some(Color::Cyan));
        assert!(line.spans[1].content.contains("Página 1"));
    }
}
