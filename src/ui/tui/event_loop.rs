use crate::app::App;
use crate::messages::app::{AppCommand, AppEvent};
use crossterm::event::{self, Event};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use super::guard::TuiGuard;
use super::keyboard::handle_key;
use super::views::draw_ui;

const TOAST_TTL: Duration = Duration::from_secs(3);

/// 短暂提示，只存在于界面侧
struct Toast {
    message: String,
    shown_at: Instant,
}

impl Toast {
    fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= TOAST_TTL
    }
}

pub(super) async fn run_tui_internal(
    mut app: App,
    tx: mpsc::Sender<AppCommand>,
    mut rx: mpsc::Receiver<AppEvent>,
) -> io::Result<()> {
    let _guard = TuiGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let _ = tx.send(AppCommand::Bootstrap).await;

    let tick_rate = Duration::from_millis(200);
    let mut toast: Option<Toast> = None;

    loop {
        while let Ok(evt) = rx.try_recv() {
            match evt {
                AppEvent::State(s) => app = *s,
                AppEvent::Toast(message) => {
                    toast = Some(Toast {
                        message,
                        shown_at: Instant::now(),
                    })
                }
            }
        }
        if toast.as_ref().is_some_and(Toast::is_expired) {
            toast = None;
        }

        terminal.draw(|f| draw_ui(f, &app, toast.as_ref().map(|t| t.message.as_str())))?;

        if event::poll(tick_rate)?
            && let Event::Key(key) = event::read()?
            && handle_key(&app, key, &tx).await
        {
            break;
        }
    }

    tracing::info!("TUI 退出");
    Ok(())
}
