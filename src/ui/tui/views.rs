use crate::app::{App, UiFocus};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    prelude::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::catalog_view::draw_catalog;
use super::entries_view::draw_entries;
use super::notice::draw_notice;
use super::styles::focus_style;

pub(super) fn draw_ui(f: &mut Frame, app: &App, toast: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_search(f, chunks[0], app);
    draw_body(f, chunks[1], app);
    draw_status(f, chunks[2], app, toast);

    if let Some(message) = app.active_notice() {
        draw_notice(f, f.area(), message);
    }
}

fn draw_search(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.ui_focus == UiFocus::Search;
    let cursor = if focused { "_" } else { "" };
    let search = Paragraph::new(format!("{}{cursor}", app.search_query)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Buscar · lista de reproducción {}", app.playlist_id))
            .border_style(focus_style(focused)),
    );
    f.render_widget(search, area);
}

/// 加载中或出错时整块替换列表
fn draw_body(f: &mut Frame, area: Rect, app: &App) {
    if app.loading {
        f.render_widget(Paragraph::new("Cargando canciones..."), area);
        return;
    }
    if let Some(err) = &app.error {
        let lines = vec![
            Line::styled(format!("Error: {err}"), Style::default().fg(Color::Red)),
            Line::from("r: reintentar"),
        ];
        f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);
    let toggle = if app.show_songs { "Ocultar" } else { "Mostrar" };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("[s] ", Style::default().fg(Color::Yellow)),
            Span::raw(format!("{toggle} Canciones en la lista de reproducción")),
        ])),
        chunks[0],
    );

    if app.show_songs {
        let lists = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);
        draw_entries(f, lists[0], app);
        draw_catalog(f, lists[1], app);
    } else {
        draw_catalog(f, chunks[1], app);
    }
}

fn draw_status(f: &mut Frame, area: Rect, app: &App, toast: Option<&str>) {
    let line = match (toast, &app.now_playing) {
        (Some(t), _) => Line::styled(t.to_owned(), Style::default().fg(Color::Green)),
        (None, Some(title)) => Line::from(format!("♪ {title}  (x: detener)")),
        (None, None) => Line::from(app.status.clone()),
    };
    let status = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Estado"));
    f.render_widget(status, area);
}
