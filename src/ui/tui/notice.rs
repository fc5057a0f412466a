use ratatui::{
    Frame,
    layout::Alignment,
    prelude::Rect,
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// 模态提示框，确认前挡住其余输入
pub(super) fn draw_notice(f: &mut Frame, area: Rect, message: &str) {
    let width = area.width.saturating_sub(4).min(70);
    let height = area.height.saturating_sub(2).min(7);
    let popup = centered_rect(area, width, height);

    f.render_widget(Clear, popup);

    let lines = vec![
        Line::from(message.to_owned()),
        Line::from(""),
        Line::from("[Enter] Aceptar").alignment(Alignment::Right),
    ];
    let notice = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Aviso")
                .style(Style::default().fg(Color::Yellow)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(notice, popup);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}
