use super::{CoreState, UiAction};
use crate::core::effects::CoreEffects;
use crate::core::infra::RequestKey;
use crate::core::utils::next_id;
use crate::harmony::actor::{HarmonyCommand, HarmonyEvent, HarmonyOp};
use crate::messages::app::AppCommand;

/// 拉取歌单条目：置 loading、清空 error
pub(super) fn request_entries(state: &mut CoreState, effects: &mut CoreEffects) {
    state.app.loading = true;
    state.app.error = None;
    let req_id = state
        .request_tracker
        .issue(RequestKey::Entries, || next_id(&mut state.req_id));
    tracing::debug!(req_id, playlist_id = state.app.playlist_id, "请求歌单条目");
    effects.send_harmony_warn(
        HarmonyCommand::PlaylistEntries {
            req_id,
            playlist_id: state.app.playlist_id,
        },
        "HarmonyActor 已退出（PlaylistEntries）",
    );
}

pub async fn handle_ui(
    cmd: &AppCommand,
    state: &mut CoreState,
    effects: &mut CoreEffects,
) -> UiAction {
    let list_cmd = matches!(
        cmd,
        AppCommand::EntriesMoveUp | AppCommand::EntriesMoveDown | AppCommand::EntriesDeleteSelected
    );
    if list_cmd && state.app.lists_hidden() {
        tracing::debug!(?cmd, "条目列表不可见，忽略");
        return UiAction::Handled;
    }
    match cmd {
        AppCommand::EntriesMoveUp => {
            state.app.entries_selected = state.app.entries_selected.saturating_sub(1);
        }
        AppCommand::EntriesMoveDown => {
            let len = state.app.visible_entries().len();
            if state.app.entries_selected + 1 < len {
                state.app.entries_selected += 1;
            }
        }
        AppCommand::EntriesDeleteSelected => {
            let Some(entry_id) = state.app.selected_entry().map(|e| e.id) else {
                return UiAction::Handled;
            };
            let req_id = next_id(&mut state.req_id);
            tracing::info!(req_id, entry_id, "删除歌单条目");
            state.app.status = "Eliminando canción...".to_owned();
            effects.send_harmony_warn(
                HarmonyCommand::DeleteEntry { req_id, entry_id },
                "HarmonyActor 已退出（DeleteEntry）",
            );
        }
        _ => return UiAction::NotHandled,
    }
    effects.emit_state(&state.app);
    UiAction::Handled
}

pub async fn handle_harmony_event(
    evt: &HarmonyEvent,
    state: &mut CoreState,
    effects: &mut CoreEffects,
) -> bool {
    match evt {
        HarmonyEvent::PlaylistEntries {
            req_id, entries, ..
        } => {
            if !state.request_tracker.accept(&RequestKey::Entries, *req_id) {
                tracing::debug!(req_id, "丢弃过期的条目响应");
                return false;
            }
            state.app.songs = entries.clone();
            state.app.loading = false;
            state.app.clamp_selection();
            effects.emit_state(&state.app);
            true
        }
        HarmonyEvent::Error {
            req_id,
            op: HarmonyOp::PlaylistEntries { .. },
            error,
        } => {
            if !state.request_tracker.accept(&RequestKey::Entries, *req_id) {
                return false;
            }
            state.app.error = Some(error.clone());
            state.app.loading = false;
            effects.emit_state(&state.app);
            true
        }
        HarmonyEvent::EntryDeleted { entry_id, .. } => {
            state.app.songs.retain(|e| e.id != *entry_id);
            state.app.clamp_selection();
            state.app.status = crate::app::STATUS_HINT.to_owned();
            effects.toast("Canción eliminada de la lista de reproducción");
            effects.emit_state(&state.app);
            true
        }
        HarmonyEvent::Error {
            op: HarmonyOp::DeleteEntry { entry_id },
            error,
            ..
        } => {
            tracing::warn!(entry_id, err = %error, "删除条目失败");
            state.app.error = Some(error.clone());
            state.app.status = crate::app::STATUS_HINT.to_owned();
            effects.emit_state(&state.app);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::effects::CoreEffect;
    use crate::domain::PlaylistEntry;
    use crate::error::{ErrorKind, MessageError};

    fn entry(id: i64, title: &str) -> PlaylistEntry {
        PlaylistEntry {
            id,
            song: id * 10,
            playlist: 1,
            order: 1,
            title: Some(title.to_owned()),
            song_file: None,
        }
    }

    fn harmony_sends(effects: &CoreEffects) -> usize {
        effects
            .actions
            .iter()
            .filter(|a| matches!(a, CoreEffect::SendHarmony { .. }))
            .count()
    }

    #[tokio::test]
    async fn delete_removes_only_matching_id_without_refetch() {
        let mut state = CoreState::for_playlist(1);
        state.app.songs = vec![entry(1, "a"), entry(2, "b"), entry(3, "c")];
        let mut effects = CoreEffects::default();

        let handled = handle_harmony_event(
            &HarmonyEvent::EntryDeleted {
                req_id: 9,
                entry_id: 2,
            },
            &mut state,
            &mut effects,
        )
        .await;

        assert!(handled);
        let ids: Vec<i64> = state.app.songs.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(harmony_sends(&effects), 0);
    }

    #[tokio::test]
    async fn delete_selected_uses_filtered_selection() {
        let mut state = CoreState::for_playlist(1);
        state.app.songs = vec![entry(1, "Alpha"), entry(2, "Beta"), entry(3, "Alphabet")];
        state.app.search_query = "alpha".to_owned();
        state.app.entries_selected = 1;
        let mut effects = CoreEffects::default();

        handle_ui(&AppCommand::EntriesDeleteSelected, &mut state, &mut effects).await;

        assert!(effects.actions.iter().any(|a| matches!(
            a,
            CoreEffect::SendHarmony {
                cmd: HarmonyCommand::DeleteEntry { entry_id: 3, .. },
                ..
            }
        )));
    }

    #[tokio::test]
    async fn delete_is_ignored_while_error_replaces_lists() {
        let mut state = CoreState::for_playlist(1);
        state.app.show_songs = true;
        state.app.songs = vec![entry(1, "a")];
        state.app.error = Some(MessageError::new(ErrorKind::Network, "Error de red"));
        let mut effects = CoreEffects::default();

        let outcome = handle_ui(&AppCommand::EntriesDeleteSelected, &mut state, &mut effects).await;

        assert!(matches!(outcome, UiAction::Handled));
        assert_eq!(harmony_sends(&effects), 0);
    }

    #[tokio::test]
    async fn entries_failure_sets_error_and_clears_loading() {
        let mut state = CoreState::for_playlist(1);
        let mut effects = CoreEffects::default();
        request_entries(&mut state, &mut effects);
        let req_id = state
            .request_tracker
            .get_pending(&RequestKey::Entries)
            .expect("pending");

        let handled = handle_harmony_event(
            &HarmonyEvent::Error {
                req_id,
                op: HarmonyOp::PlaylistEntries { playlist_id: 1 },
                error: MessageError::new(ErrorKind::Format, "Respuesta no es JSON"),
            },
            &mut state,
            &mut effects,
        )
        .await;

        assert!(handled);
        assert!(!state.app.loading);
        assert_eq!(
            state.app.error.as_ref().map(|e| e.kind),
            Some(ErrorKind::Format)
        );
    }

    #[tokio::test]
    async fn delete_failure_lands_in_error_state() {
        let mut state = CoreState::for_playlist(1);
        state.app.songs = vec![entry(4, "x")];
        let mut effects = CoreEffects::default();

        handle_harmony_event(
            &HarmonyEvent::Error {
                req_id: 3,
                op: HarmonyOp::DeleteEntry { entry_id: 4 },
                error: MessageError::new(ErrorKind::Network, "Error de red: 404 Not Found"),
            },
            &mut state,
            &mut effects,
        )
        .await;

        assert_eq!(state.app.songs.len(), 1);
        assert_eq!(
            state.app.error.as_ref().map(|e| e.kind),
            Some(ErrorKind::Network)
        );
    }

    #[tokio::test]
    async fn stale_entries_response_is_dropped() {
        let mut state = CoreState::for_playlist(1);
        let mut effects = CoreEffects::default();
        request_entries(&mut state, &mut effects);
        request_entries(&mut state, &mut effects);

        let handled = handle_harmony_event(
            &HarmonyEvent::PlaylistEntries {
                req_id: 1,
                playlist_id: 1,
                entries: vec![entry(1, "old")],
            },
            &mut state,
            &mut effects,
        )
        .await;

        assert!(!handled);
        assert!(state.app.songs.is_empty());
        assert!(state.app.loading);
    }
}
