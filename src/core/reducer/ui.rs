use super::{CoreState, UiAction, catalog, entries};
use crate::app::UiFocus;
use crate::core::effects::CoreEffects;
use crate::messages::app::AppCommand;

pub async fn handle_ui(
    cmd: &AppCommand,
    state: &mut CoreState,
    effects: &mut CoreEffects,
) -> UiAction {
    match cmd {
        AppCommand::Bootstrap | AppCommand::Reload => {
            if matches!(cmd, AppCommand::Reload) {
                tracing::info!(playlist_id = state.app.playlist_id, "重新加载歌单");
            }
            entries::request_entries(state, effects);
            catalog::request_catalog(state, effects);
            effects.emit_state(&state.app);
            UiAction::Handled
        }
        AppCommand::UiFocusNext => {
            state.app.ui_focus = step_focus(state.app.focus_order(), state.app.ui_focus, 1);
            effects.emit_state(&state.app);
            UiAction::Handled
        }
        AppCommand::UiFocusPrev => {
            let order = state.app.focus_order();
            state.app.ui_focus = step_focus(order, state.app.ui_focus, order.len() - 1);
            effects.emit_state(&state.app);
            UiAction::Handled
        }
        AppCommand::ToggleShowSongs => {
            state.app.show_songs = !state.app.show_songs;
            if !state.app.show_songs && state.app.ui_focus == UiFocus::Entries {
                state.app.ui_focus = UiFocus::Catalog;
            }
            effects.emit_state(&state.app);
            UiAction::Handled
        }
        AppCommand::DismissNotice => {
            state.app.notices.pop_front();
            effects.emit_state(&state.app);
            UiAction::Handled
        }
        AppCommand::Quit => UiAction::Quit,
        _ => UiAction::NotHandled,
    }
}

fn step_focus(order: &[UiFocus], current: UiFocus, step: usize) -> UiFocus {
    let idx = order.iter().position(|f| *f == current).unwrap_or(0);
    order[(idx + step) % order.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::effects::CoreEffect;
    use crate::harmony::actor::HarmonyCommand;

    #[tokio::test]
    async fn bootstrap_fetches_entries_and_first_page() {
        let mut state = CoreState::for_playlist(7);
        let mut effects = CoreEffects::default();

        let outcome = handle_ui(&AppCommand::Bootstrap, &mut state, &mut effects).await;

        assert!(matches!(outcome, UiAction::Handled));
        assert!(state.app.loading);
        assert!(effects.actions.iter().any(|a| matches!(
            a,
            CoreEffect::SendHarmony {
                cmd: HarmonyCommand::PlaylistEntries { playlist_id: 7, .. },
                ..
            }
        )));
        assert!(effects.actions.iter().any(|a| matches!(
            a,
            CoreEffect::SendHarmony {
                cmd: HarmonyCommand::SongsPage { page: 1, .. },
                ..
            }
        )));
    }

    #[tokio::test]
    async fn focus_cycle_skips_hidden_entries() {
        let mut state = CoreState::for_playlist(1);
        let mut effects = CoreEffects::default();
        state.app.ui_focus = UiFocus::Search;

        handle_ui(&AppCommand::UiFocusNext, &mut state, &mut effects).await;
        assert_eq!(state.app.ui_focus, UiFocus::Catalog);
        handle_ui(&AppCommand::UiFocusNext, &mut state, &mut effects).await;
        assert_eq!(state.app.ui_focus, UiFocus::Search);

        state.app.show_songs = true;
        handle_ui(&AppCommand::UiFocusPrev, &mut state, &mut effects).await;
        assert_eq!(state.app.ui_focus, UiFocus::Catalog);
        handle_ui(&AppCommand::UiFocusPrev, &mut state, &mut effects).await;
        assert_eq!(state.app.ui_focus, UiFocus::Entries);
    }

    #[tokio::test]
    async fn hiding_entries_moves_focus_away() {
        let mut state = CoreState::for_playlist(1);
        let mut effects = CoreEffects::default();
        state.app.show_songs = true;
        state.app.ui_focus = UiFocus::Entries;

        handle_ui(&AppCommand::ToggleShowSongs, &mut state, &mut effects).await;

        assert!(!state.app.show_songs);
        assert_eq!(state.app.ui_focus, UiFocus::Catalog);
    }

    #[tokio::test]
    async fn dismiss_pops_oldest_notice() {
        let mut state = CoreState::for_playlist(1);
        let mut effects = CoreEffects::default();
        state.app.push_notice("uno");
        state.app.push_notice("dos");

        handle_ui(&AppCommand::DismissNotice, &mut state, &mut effects).await;

        assert_eq!(state.app.active_notice(), Some("dos"));
    }
}
