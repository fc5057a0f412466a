use super::{CoreState, UiAction};
use crate::audio_worker::{AudioCommand, AudioEvent};
use crate::core::effects::CoreEffects;
use crate::messages::app::AppCommand;

const NO_AUDIO_FILE_MSG: &str = "La canción no tiene un archivo de audio.";

pub async fn handle_ui(
    cmd: &AppCommand,
    state: &mut CoreState,
    effects: &mut CoreEffects,
) -> UiAction {
    match cmd {
        AppCommand::EntriesPlaySelected => {
            if state.app.lists_hidden() {
                return UiAction::Handled;
            }
            let Some(entry) = state.app.selected_entry() else {
                return UiAction::Handled;
            };
            let entry_id = entry.id;
            let title = entry
                .title
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Sin título".to_owned());
            match entry.song_file.clone().filter(|u| !u.is_empty()) {
                Some(url) => {
                    tracing::info!(entry_id, url = %url, "请求播放");
                    effects.send_audio_warn(
                        AudioCommand::Play {
                            entry_id,
                            url,
                            title,
                        },
                        "AudioWorker 已退出（Play）",
                    );
                }
                None => state.app.push_notice(NO_AUDIO_FILE_MSG),
            }
        }
        AppCommand::PlaybackStop => {
            effects.send_audio(AudioCommand::Stop);
        }
        _ => return UiAction::NotHandled,
    }
    effects.emit_state(&state.app);
    UiAction::Handled
}

pub async fn handle_audio_event(evt: AudioEvent, state: &mut CoreState, effects: &mut CoreEffects) {
    match evt {
        AudioEvent::Loading { entry_id, title } => {
            state.app.playing_entry_id = Some(entry_id);
            state.app.now_playing = None;
            state.app.status = format!("Cargando audio: {title}");
            state.play_id = None;
        }
        AudioEvent::NowPlaying {
            entry_id,
            play_id,
            title,
            duration_ms,
        } => {
            tracing::info!(entry_id, play_id, ?duration_ms, "开始播放");
            state.play_id = Some(play_id);
            state.app.playing_entry_id = Some(entry_id);
            state.app.status = format!("Reproduciendo: {title}");
            state.app.now_playing = Some(title);
        }
        AudioEvent::Ended { play_id } => {
            if state.play_id != Some(play_id) {
                tracing::debug!(play_id, "忽略过期的播放结束事件");
                return;
            }
            clear_playback(state);
        }
        AudioEvent::Stopped => clear_playback(state),
        AudioEvent::Error(message) => {
            clear_playback(state);
            state
                .app
                .push_notice(format!("Error de reproducción: {message}"));
        }
    }
    effects.emit_state(&state.app);
}

fn clear_playback(state: &mut CoreState) {
    state.play_id = None;
    state.app.playing_entry_id = None;
    state.app.now_playing = None;
    state.app.status = crate::app::STATUS_HINT.to_owned();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::effects::CoreEffect;
    use crate::domain::PlaylistEntry;

    fn entry(id: i64, file: Option<&str>) -> PlaylistEntry {
        PlaylistEntry {
            id,
            song: id,
            playlist: 1,
            order: 1,
            title: Some(format!("song {id}")),
            song_file: file.map(ToOwned::to_owned),
        }
    }

    #[tokio::test]
    async fn play_selected_sends_song_file() {
        let mut state = CoreState::for_playlist(1);
        state.app.songs = vec![entry(1, Some("http://cdn/1.mp3"))];
        let mut effects = CoreEffects::default();

        handle_ui(&AppCommand::EntriesPlaySelected, &mut state, &mut effects).await;

        assert!(effects.actions.iter().any(|a| matches!(
            a,
            CoreEffect::SendAudio {
                cmd: AudioCommand::Play { entry_id: 1, url, .. },
                ..
            } if url == "http://cdn/1.mp3"
        )));
    }

    #[tokio::test]
    async fn play_ignored_while_loading() {
        let mut state = CoreState::for_playlist(1);
        state.app.songs = vec![entry(1, Some("http://cdn/1.mp3"))];
        state.app.loading = true;
        let mut effects = CoreEffects::default();

        handle_ui(&AppCommand::EntriesPlaySelected, &mut state, &mut effects).await;

        assert!(
            !effects
                .actions
                .iter()
                .any(|a| matches!(a, CoreEffect::SendAudio { .. }))
        );
    }

    #[tokio::test]
    async fn entry_without_file_shows_notice() {
        let mut state = CoreState::for_playlist(1);
        state.app.songs = vec![entry(1, None)];
        let mut effects = CoreEffects::default();

        handle_ui(&AppCommand::EntriesPlaySelected, &mut state, &mut effects).await;

        assert_eq!(state.app.active_notice(), Some(NO_AUDIO_FILE_MSG));
        assert!(
            !effects
                .actions
                .iter()
                .any(|a| matches!(a, CoreEffect::SendAudio { .. }))
        );
    }

    #[tokio::test]
    async fn stale_end_event_is_ignored() {
        let mut state = CoreState::for_playlist(1);
        let mut effects = CoreEffects::default();

        handle_audio_event(
            AudioEvent::NowPlaying {
                entry_id: 1,
                play_id: 2,
                title: "dos".to_owned(),
                duration_ms: None,
            },
            &mut state,
            &mut effects,
        )
        .await;
        handle_audio_event(AudioEvent::Ended { play_id: 1 }, &mut state, &mut effects).await;
        assert_eq!(state.app.now_playing.as_deref(), Some("dos"));

        handle_audio_event(AudioEvent::Ended { play_id: 2 }, &mut state, &mut effects).await;
        assert_eq!(state.app.now_playing, None);
        assert_eq!(state.app.playing_entry_id, None);
    }

    #[tokio::test]
    async fn stop_command_reaches_audio_worker() {
        let mut state = CoreState::for_playlist(1);
        let mut effects = CoreEffects::default();

        handle_ui(&AppCommand::PlaybackStop, &mut state, &mut effects).await;

        assert!(effects.actions.iter().any(|a| matches!(
            a,
            CoreEffect::SendAudio {
                cmd: AudioCommand::Stop,
                ..
            }
        )));
    }
}
