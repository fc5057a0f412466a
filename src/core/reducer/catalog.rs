use super::{CoreState, UiAction, entries};
use crate::core::effects::CoreEffects;
use crate::core::infra::RequestKey;
use crate::core::utils::next_id;
use crate::domain::NewEntry;
use crate::error::ErrorKind;
use crate::harmony::actor::{HarmonyCommand, HarmonyEvent, HarmonyOp};
use crate::messages::app::AppCommand;

pub(super) const INVALID_IDS_MSG: &str = "ID de canción o ID de lista de reproducción no válido";

/// 按当前页码与搜索词请求目录；旧请求由 tracker 作废
pub(super) fn request_catalog(state: &mut CoreState, effects: &mut CoreEffects) {
    let req_id = state
        .request_tracker
        .issue(RequestKey::Catalog, || next_id(&mut state.req_id));
    tracing::debug!(
        req_id,
        page = state.app.current_page,
        search = %state.app.search_query,
        "请求歌曲目录"
    );
    effects.send_harmony_warn(
        HarmonyCommand::SongsPage {
            req_id,
            page: state.app.current_page,
            search: state.app.search_query.clone(),
        },
        "HarmonyActor 已退出（SongsPage）",
    );
}

/// 搜索词变化：回到第一页并重新查询
fn on_search_changed(state: &mut CoreState, effects: &mut CoreEffects) {
    state.app.current_page = 1;
    state.app.entries_selected = 0;
    state.app.catalog_selected = 0;
    request_catalog(state, effects);
}

pub async fn handle_ui(
    cmd: &AppCommand,
    state: &mut CoreState,
    effects: &mut CoreEffects,
) -> UiAction {
    let list_cmd = matches!(
        cmd,
        AppCommand::CatalogMoveUp
            | AppCommand::CatalogMoveDown
            | AppCommand::CatalogAddSelected
            | AppCommand::CatalogNextPage
            | AppCommand::CatalogPrevPage
    );
    if list_cmd && state.app.lists_hidden() {
        tracing::debug!(?cmd, "目录不可见，忽略");
        return UiAction::Handled;
    }
    match cmd {
        AppCommand::SearchInputChar { c } => {
            state.app.search_query.push(*c);
            on_search_changed(state, effects);
        }
        AppCommand::SearchInputBackspace => {
            if state.app.search_query.pop().is_none() {
                return UiAction::Handled;
            }
            on_search_changed(state, effects);
        }
        AppCommand::SearchClear => {
            if state.app.search_query.is_empty() {
                return UiAction::Handled;
            }
            state.app.search_query.clear();
            on_search_changed(state, effects);
        }
        AppCommand::CatalogMoveUp => {
            state.app.catalog_selected = state.app.catalog_selected.saturating_sub(1);
        }
        AppCommand::CatalogMoveDown => {
            if state.app.catalog_selected + 1 < state.app.available_songs.len() {
                state.app.catalog_selected += 1;
            }
        }
        AppCommand::CatalogNextPage => {
            let Some(page) = state.app.next_page else {
                return UiAction::Handled;
            };
            state.app.current_page = page;
            request_catalog(state, effects);
        }
        AppCommand::CatalogPrevPage => {
            let Some(page) = state.app.previous_page else {
                return UiAction::Handled;
            };
            state.app.current_page = page;
            request_catalog(state, effects);
        }
        AppCommand::CatalogAddSelected => {
            let Some(song_id) = state.app.selected_song().map(|s| s.id) else {
                return UiAction::Handled;
            };
            add_song(song_id, state, effects);
        }
        _ => return UiAction::NotHandled,
    }
    effects.emit_state(&state.app);
    UiAction::Handled
}

fn add_song(song_id: i64, state: &mut CoreState, effects: &mut CoreEffects) {
    let entry = NewEntry {
        song: song_id,
        playlist: state.app.playlist_id,
        order: state.settings.default_order,
    };
    if !entry.is_complete() {
        tracing::warn!(?entry, "缺少歌曲或歌单 id，不发送请求");
        state.app.push_notice(INVALID_IDS_MSG);
        return;
    }
    let req_id = next_id(&mut state.req_id);
    tracing::info!(req_id, ?entry, "添加歌曲到歌单");
    effects.send_harmony_warn(
        HarmonyCommand::AddEntry { req_id, entry },
        "HarmonyActor 已退出（AddEntry）",
    );
}

pub async fn handle_harmony_event(
    evt: &HarmonyEvent,
    state: &mut CoreState,
    effects: &mut CoreEffects,
) -> bool {
    match evt {
        HarmonyEvent::SongsPage { req_id, page } => {
            if !state.request_tracker.accept(&RequestKey::Catalog, *req_id) {
                tracing::debug!(req_id, "丢弃过期的目录响应");
                return false;
            }
            state.app.available_songs = page.songs.clone();
            state.app.current_page = page.page;
            state.app.next_page = page.next_page;
            state.app.previous_page = page.previous_page;
            state.app.clamp_selection();
            effects.emit_state(&state.app);
            true
        }
        HarmonyEvent::Error {
            req_id,
            op: HarmonyOp::SongsPage { .. },
            error,
        } => {
            if !state.request_tracker.accept(&RequestKey::Catalog, *req_id) {
                return false;
            }
            state
                .app
                .push_notice(format!("Error al cargar las canciones disponibles: {error}"));
            effects.emit_state(&state.app);
            true
        }
        HarmonyEvent::EntryAdded { entry, .. } => {
            state.app.songs.push(entry.clone());
            effects.toast("Canción agregada a la lista de reproducción");
            // 追加后整体重拉一次，和服务端对齐
            entries::request_entries(state, effects);
            effects.emit_state(&state.app);
            true
        }
        HarmonyEvent::Error {
            op: HarmonyOp::AddEntry { song_id },
            error,
            ..
        } => {
            tracing::warn!(song_id, kind = ?error.kind, err = %error, "添加歌曲失败");
            let notice = match error.kind {
                ErrorKind::Conflict | ErrorKind::Validation => error.message.clone(),
                ErrorKind::Network | ErrorKind::Format => {
                    format!("Error al agregar la canción: {error}")
                }
            };
            state.app.push_notice(notice);
            effects.emit_state(&state.app);
            true
        }
        _ => false,
    }
}
