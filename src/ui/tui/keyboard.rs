use crate::app::{App, UiFocus};
use crate::messages::app::AppCommand;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

/// 返回 true 表示退出界面
pub(super) async fn handle_key(app: &App, key: KeyEvent, tx: &mpsc::Sender<AppCommand>) -> bool {
    // 部分终端会同时上报按下和松开，只处理按下/重复
    if matches!(key.kind, KeyEventKind::Release) {
        return false;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        let _ = tx.send(AppCommand::Quit).await;
        return true;
    }

    // 提示框是模态的：只能确认
    if app.active_notice().is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            let _ = tx.send(AppCommand::DismissNotice).await;
        }
        return false;
    }

    // 列表被加载/错误界面替换时只保留全局键
    if app.lists_hidden() {
        let cmd = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                let _ = tx.send(AppCommand::Quit).await;
                return true;
            }
            KeyCode::Char('r') => Some(AppCommand::Reload),
            KeyCode::Char('x') => Some(AppCommand::PlaybackStop),
            _ => None,
        };
        if let Some(cmd) = cmd {
            let _ = tx.send(cmd).await;
        }
        return false;
    }

    match key.code {
        KeyCode::Tab => {
            let _ = tx.send(AppCommand::UiFocusNext).await;
            return false;
        }
        KeyCode::BackTab => {
            let _ = tx.send(AppCommand::UiFocusPrev).await;
            return false;
        }
        _ => {}
    }

    if app.ui_focus == UiFocus::Search {
        let cmd = match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(AppCommand::SearchInputChar { c })
            }
            KeyCode::Backspace => Some(AppCommand::SearchInputBackspace),
            KeyCode::Esc => Some(AppCommand::SearchClear),
            KeyCode::Enter | KeyCode::Down => Some(AppCommand::UiFocusNext),
            _ => None,
        };
        if let Some(cmd) = cmd {
            let _ = tx.send(cmd).await;
        }
        return false;
    }

    let global = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            let _ = tx.send(AppCommand::Quit).await;
            return true;
        }
        KeyCode::Char('s') => Some(AppCommand::ToggleShowSongs),
        KeyCode::Char('r') => Some(AppCommand::Reload),
        KeyCode::Char('x') => Some(AppCommand::PlaybackStop),
        _ => None,
    };
    if let Some(cmd) = global {
        let _ = tx.send(cmd).await;
        return false;
    }

    let cmd = match app.ui_focus {
        UiFocus::Entries => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(AppCommand::EntriesMoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(AppCommand::EntriesMoveDown),
            KeyCode::Enter | KeyCode::Char('p') => Some(AppCommand::EntriesPlaySelected),
            KeyCode::Delete | KeyCode::Char('d') => Some(AppCommand::EntriesDeleteSelected),
            _ => None,
        },
        UiFocus::Catalog => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(AppCommand::CatalogMoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(AppCommand::CatalogMoveDown),
            KeyCode::Enter | KeyCode::Char('a') => Some(AppCommand::CatalogAddSelected),
            KeyCode::Right | KeyCode::PageDown | KeyCode::Char('n') => {
                Some(AppCommand::CatalogNextPage)
            }
            KeyCode::Left | KeyCode::PageUp | KeyCode::Char('b') => {
                Some(AppCommand::CatalogPrevPage)
            }
            _ => None,
        },
        UiFocus::Search => None,
    };
    if let Some(cmd) = cmd {
        let _ = tx.send(cmd).await;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_app() -> App {
        let mut app = App::new(1);
        app.loading = false;
        app
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn send_keys(app: &App, keys: &[KeyCode]) -> (Vec<AppCommand>, bool) {
        let (tx, mut rx) = mpsc::channel(16);
        let mut quit = false;
        for code in keys {
            quit |= handle_key(app, press(*code), &tx).await;
        }
        drop(tx);
        let mut cmds = Vec::new();
        while let Some(cmd) = rx.recv().await {
            cmds.push(cmd);
        }
        (cmds, quit)
    }

    #[tokio::test]
    async fn search_focus_captures_letters() {
        let mut app = ready_app();
        app.ui_focus = UiFocus::Search;
        let (cmds, quit) = send_keys(&app, &[KeyCode::Char('q'), KeyCode::Backspace]).await;
        assert!(!quit);
        assert_eq!(
            cmds,
            vec![
                AppCommand::SearchInputChar { c: 'q' },
                AppCommand::SearchInputBackspace
            ]
        );
    }

    #[tokio::test]
    async fn notice_blocks_other_keys() {
        let mut app = ready_app();
        app.push_notice("aviso");
        let (cmds, quit) = send_keys(&app, &[KeyCode::Char('q'), KeyCode::Enter]).await;
        assert!(!quit);
        assert_eq!(cmds, vec![AppCommand::DismissNotice]);
    }

    #[tokio::test]
    async fn catalog_keys_map_to_commands() {
        let app = ready_app();
        let (cmds, _) = send_keys(&app, &[KeyCode::Char('a'), KeyCode::Right, KeyCode::Left]).await;
        assert_eq!(
            cmds,
            vec![
                AppCommand::CatalogAddSelected,
                AppCommand::CatalogNextPage,
                AppCommand::CatalogPrevPage
            ]
        );
    }

    #[tokio::test]
    async fn entries_keys_map_to_commands() {
        let mut app = ready_app();
        app.show_songs = true;
        app.ui_focus = UiFocus::Entries;
        let (cmds, _) = send_keys(&app, &[KeyCode::Char('p'), KeyCode::Char('d')]).await;
        assert_eq!(
            cmds,
            vec![
                AppCommand::EntriesPlaySelected,
                AppCommand::EntriesDeleteSelected
            ]
        );
    }

    #[tokio::test]
    async fn q_quits_outside_search() {
        let app = ready_app();
        let (cmds, quit) = send_keys(&app, &[KeyCode::Char('q')]).await;
        assert!(quit);
        assert_eq!(cmds, vec![AppCommand::Quit]);
    }

    #[tokio::test]
    async fn error_screen_only_accepts_global_keys() {
        let mut app = ready_app();
        app.show_songs = true;
        app.ui_focus = UiFocus::Entries;
        app.error = Some(crate::error::MessageError::new(
            crate::error::ErrorKind::Network,
            "Error de red: 500 Internal Server Error",
        ));
        let (cmds, quit) = send_keys(
            &app,
            &[KeyCode::Char('d'), KeyCode::Char('p'), KeyCode::Tab, KeyCode::Char('r')],
        )
        .await;
        assert!(!quit);
        assert_eq!(cmds, vec![AppCommand::Reload]);
    }

    #[tokio::test]
    async fn loading_screen_ignores_catalog_keys() {
        let app = App::new(1);
        let (cmds, quit) = send_keys(
            &app,
            &[KeyCode::Char('a'), KeyCode::Right, KeyCode::Char('x'), KeyCode::Char('q')],
        )
        .await;
        assert!(quit);
        assert_eq!(cmds, vec![AppCommand::PlaybackStop, AppCommand::Quit]);
    }
}
