use tokio::select;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::AudioSettings;
use super::messages::{AudioCommand, AudioEvent};
use super::player::{AudioOutput, PlaybackHandle};
use crate::error::AudioError;

struct PendingPlay {
    token: u64,
    entry_id: i64,
    title: String,
    task: JoinHandle<()>,
}

struct Downloaded {
    token: u64,
    result: Result<Vec<u8>, AudioError>,
}

struct AudioEngine {
    tx_evt: mpsc::Sender<AudioEvent>,
    rx_cmd: mpsc::Receiver<AudioCommand>,
    tx_download: mpsc::Sender<Downloaded>,
    rx_download: mpsc::Receiver<Downloaded>,
    http: reqwest::Client,
    output: AudioOutput,
    current: Option<PlaybackHandle>,
    pending: Option<PendingPlay>,
    next_token: u64,
    play_id: u64,
}

impl AudioEngine {
    fn new(
        tx_evt: mpsc::Sender<AudioEvent>,
        rx_cmd: mpsc::Receiver<AudioCommand>,
        http: reqwest::Client,
        output: AudioOutput,
    ) -> Self {
        let (tx_download, rx_download) = mpsc::channel(4);
        Self {
            tx_evt,
            rx_cmd,
            tx_download,
            rx_download,
            http,
            output,
            current: None,
            pending: None,
            next_token: 1,
            play_id: 0,
        }
    }

    async fn run(mut self) {
        loop {
            select! {
                maybe_cmd = self.rx_cmd.recv() => {
                    let Some(cmd) = maybe_cmd else {
                        break;
                    };
                    self.handle_audio_command(cmd).await;
                }
                Some(done) = self.rx_download.recv() => {
                    self.handle_downloaded(done).await;
                }
            }
        }
        // UI 已退出：drop 句柄即停止播放
        self.cancel_pending();
        self.current = None;
        tracing::info!("AudioEngine 退出");
    }

    fn cancel_pending(&mut self) {
        if let Some(p) = self.pending.take() {
            p.task.abort();
        }
    }

    async fn handle_audio_command(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::Play {
                entry_id,
                url,
                title,
            } => {
                self.cancel_pending();
                self.current = None;

                let token = self.next_token;
                self.next_token = self.next_token.wrapping_add(1).max(1);
                tracing::info!(entry_id, token, url = %url, title = %title, "开始播放请求");

                let http = self.http.clone();
                let tx_download = self.tx_download.clone();
                let dl_title = title.clone();
                let task = tokio::spawn(async move {
                    let result = download(&http, &url, &dl_title).await;
                    let _ = tx_download.send(Downloaded { token, result }).await;
                });
                self.pending = Some(PendingPlay {
                    token,
                    entry_id,
                    title: title.clone(),
                    task,
                });
                let _ = self
                    .tx_evt
                    .send(AudioEvent::Loading { entry_id, title })
                    .await;
            }
            AudioCommand::Stop => {
                self.cancel_pending();
                self.current = None;
                let _ = self.tx_evt.send(AudioEvent::Stopped).await;
            }
        }
    }

    async fn handle_downloaded(&mut self, done: Downloaded) {
        let Some(pending) = self.pending.take_if(|p| p.token == done.token) else {
            tracing::debug!(token = done.token, "下载结果已过期，丢弃");
            return;
        };

        let bytes = match done.result {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(entry_id = pending.entry_id, err = %e, "下载音频失败");
                let _ = self.tx_evt.send(AudioEvent::Error(e.to_string())).await;
                return;
            }
        };

        self.play_id = self.play_id.wrapping_add(1).max(1);
        match PlaybackHandle::start(
            self.output.mixer(),
            self.play_id,
            bytes,
            &pending.title,
            &self.tx_evt,
        ) {
            Ok((handle, duration_ms)) => {
                let play_id = handle.play_id();
                self.current = Some(handle);
                let _ = self
                    .tx_evt
                    .send(AudioEvent::NowPlaying {
                        entry_id: pending.entry_id,
                        play_id,
                        title: pending.title,
                        duration_ms,
                    })
                    .await;
            }
            Err(e) => {
                tracing::error!(entry_id = pending.entry_id, err = %e, "播放失败");
                let _ = self.tx_evt.send(AudioEvent::Error(e.to_string())).await;
            }
        }
    }
}

async fn download(http: &reqwest::Client, url: &str, title: &str) -> Result<Vec<u8>, AudioError> {
    let resp = http.get(url).send().await.map_err(|source| AudioError::Download {
        title: title.to_owned(),
        source,
    })?;
    let status = resp.status();
    if !status.is_success() {
        return Err(AudioError::DownloadStatus {
            title: title.to_owned(),
            status: status.as_u16(),
        });
    }
    let bytes = resp.bytes().await.map_err(|source| AudioError::Download {
        title: title.to_owned(),
        source,
    })?;
    Ok(bytes.to_vec())
}

pub(super) fn spawn(
    rx_cmd: mpsc::Receiver<AudioCommand>,
    tx_evt: mpsc::Sender<AudioEvent>,
    settings: AudioSettings,
) {
    tokio::spawn(async move {
        let output = match tokio::task::spawn_blocking(AudioOutput::open).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                tracing::error!(err = %e, "初始化音频输出失败");
                let _ = tx_evt.send(AudioEvent::Error(e.to_string())).await;
                return;
            }
            Err(e) => {
                tracing::error!(err = %e, "音频输出初始化任务失败");
                let _ = tx_evt.send(AudioEvent::Error(e.to_string())).await;
                return;
            }
        };
        let http = match reqwest::Client::builder()
            .timeout(settings.http_timeout)
            .build()
        {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(err = %e, "初始化 HTTP 客户端失败");
                let _ = tx_evt
                    .send(AudioEvent::Error(format!("No se pudo crear el cliente HTTP: {e}")))
                    .await;
                return;
            }
        };
        tracing::info!("AudioEngine 已启动");
        AudioEngine::new(tx_evt, rx_cmd, http, output).run().await;
    });
}
