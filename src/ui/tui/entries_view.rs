use crate::app::{App, UiFocus};
use ratatui::{
    Frame,
    prelude::Rect,
    style::Color,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use unicode_width::UnicodeWidthStr;

use super::styles::{control_style, focus_style, highlight_style};

const EMPTY_PLAYLIST: &str = "No hay canciones disponibles.";

pub(super) fn draw_entries(f: &mut Frame, area: Rect, app: &App) {
    let visible = app.visible_entries();
    let title_width = visible
        .iter()
        .filter_map(|e| e.title.as_deref())
        .map(UnicodeWidthStr::width)
        .max()
        .unwrap_or(0);

    let items: Vec<ListItem> = if visible.is_empty() {
        vec![ListItem::new(Line::from(placeholder(app)))]
    } else {
        visible
            .iter()
            .map(|e| {
                let title = e.title.as_deref().unwrap_or_default();
                let mark = if app.playing_entry_id == Some(e.id) {
                    "▶ "
                } else {
                    "  "
                };
                let pad = title_width.saturating_sub(title.width());
                ListItem::new(Line::from(vec![
                    Span::raw(mark),
                    Span::raw(title.to_owned()),
                    Span::raw(" ".repeat(pad + 2)),
                    Span::styled("[Reproducir]", control_style(Color::Green)),
                    Span::raw(" "),
                    Span::styled("[Eliminar]", control_style(Color::Red)),
                ]))
            })
            .collect()
    };

    let focused = app.ui_focus == UiFocus::Entries;
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Canciones en la lista de reproducción (p reproducir, d eliminar)")
                .border_style(focus_style(focused)),
        )
        .highlight_style(highlight_style());

    let mut st = ListState::default();
    if focused && !visible.is_empty() {
        st.select(Some(app.entries_selected));
    }
    f.render_stateful_widget(list, area, &mut st);
}

fn placeholder(app: &App) -> String {
    if app.songs.is_empty() && app.search_query.is_empty() {
        EMPTY_PLAYLIST.to_owned()
    } else {
        format!(
            "No se encontraron canciones con el término de búsqueda \"{}\".",
            app.search_query
        )
    }
}
