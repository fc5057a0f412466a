use crate::app::App;
use crate::audio_worker::{AudioBackend, AudioEvent, AudioSettings};
use crate::harmony::actor::HarmonyEvent;
use crate::harmony::{HarmonyClient, Session};
use crate::messages::app::{AppCommand, AppEvent};
use crate::settings::AppSettings;

use std::time::Duration;
use tokio::sync::mpsc;

use crate::core::effects::{CoreDispatch, CoreEffects, run_effects};
use crate::core::infra::{RequestKey, RequestTracker};

mod catalog;
mod entries;
mod playback;
mod ui;

enum CoreMsg {
    Ui(AppCommand),
    Harmony(HarmonyEvent),
    Audio(AudioEvent),
}

struct CoreState {
    app: App,
    req_id: u64,
    settings: AppSettings,
    request_tracker: RequestTracker<RequestKey>,
    /// 当前播放句柄的 id，用于识别过期的结束事件
    play_id: Option<u64>,
}

enum UiAction {
    Handled,
    NotHandled,
    Quit,
}

impl CoreState {
    fn new(playlist_id: i64, settings: AppSettings) -> Self {
        let mut app = App::new(playlist_id);
        app.show_songs = settings.show_songs_on_start;
        Self {
            app,
            req_id: 1,
            settings,
            request_tracker: RequestTracker::new(),
            play_id: None,
        }
    }

    #[cfg(test)]
    fn for_playlist(playlist_id: i64) -> Self {
        // 从已加载完成的状态开始
        let mut state = Self::new(playlist_id, AppSettings::default());
        state.app.loading = false;
        state
    }
}

async fn reduce(msg: CoreMsg, state: &mut CoreState, effects: &mut CoreEffects) -> bool {
    match msg {
        CoreMsg::Ui(cmd) => {
            match ui::handle_ui(&cmd, state, effects).await {
                UiAction::Quit => return true,
                UiAction::Handled => return false,
                UiAction::NotHandled => {}
            }
            if matches!(
                entries::handle_ui(&cmd, state, effects).await,
                UiAction::Handled
            ) {
                return false;
            }
            if matches!(
                catalog::handle_ui(&cmd, state, effects).await,
                UiAction::Handled
            ) {
                return false;
            }
            if matches!(
                playback::handle_ui(&cmd, state, effects).await,
                UiAction::Handled
            ) {
                return false;
            }
            tracing::trace!(?cmd, "未处理的 UI 命令");
        }
        CoreMsg::Harmony(evt) => {
            if entries::handle_harmony_event(&evt, state, effects).await {
                return false;
            }
            if catalog::handle_harmony_event(&evt, state, effects).await {
                return false;
            }
            tracing::debug!(?evt, "丢弃 Harmony 事件");
        }
        CoreMsg::Audio(evt) => {
            playback::handle_audio_event(evt, state, effects).await;
        }
    }

    false
}

pub fn spawn_app_actor(
    client: HarmonyClient,
    session: Session,
    playlist_id: i64,
    settings: AppSettings,
    audio_backend: AudioBackend,
) -> (mpsc::Sender<AppCommand>, mpsc::Receiver<AppEvent>) {
    let (tx_cmd, mut rx_cmd) = mpsc::channel::<AppCommand>(64);
    let (tx_evt, rx_evt) = mpsc::channel::<AppEvent>(64);

    let (tx_harmony, mut rx_harmony) = crate::harmony::actor::spawn_harmony_actor(client, session);

    let audio_settings = AudioSettings {
        http_timeout: Duration::from_secs(settings.http_timeout_secs),
    };
    let (tx_audio, mut rx_audio_evt) =
        crate::audio_worker::spawn_audio_worker(audio_backend, audio_settings);

    tokio::spawn(async move {
        let mut state = CoreState::new(playlist_id, settings);
        let dispatch = CoreDispatch {
            tx_harmony: &tx_harmony,
            tx_audio: &tx_audio,
            tx_evt: &tx_evt,
        };
        tracing::info!(playlist_id, "AppActor 已启动");

        loop {
            let msg = tokio::select! {
                maybe_cmd = rx_cmd.recv() => match maybe_cmd {
                    Some(cmd) => CoreMsg::Ui(cmd),
                    None => break,
                },
                Some(evt) = rx_harmony.recv() => CoreMsg::Harmony(evt),
                Some(evt) = rx_audio_evt.recv() => CoreMsg::Audio(evt),
            };

            let mut effects = CoreEffects::default();
            let should_quit = reduce(msg, &mut state, &mut effects).await;
            run_effects(effects, &dispatch).await;
            if should_quit {
                break;
            }
        }
        // tx_audio 随任务结束被 drop，音频引擎随之停止当前播放
        tracing::info!("AppActor 退出");
    });

    (tx_cmd, rx_evt)
}
