use rodio::mixer::Mixer;
use rodio::{Decoder, OutputStreamBuilder, Sink, Source};
use std::io::Cursor;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc as std_mpsc;
use std::thread;
use tokio::sync::mpsc;

use super::messages::AudioEvent;
use crate::error::AudioError;

/// 音频输出设备
///
/// OutputStream 留在专用线程上，只把 Mixer 交给引擎；本结构 drop 时线程退出并关闭设备。
pub struct AudioOutput {
    mixer: Mixer,
    _shutdown: std_mpsc::Sender<()>,
}

impl AudioOutput {
    pub fn open() -> Result<Self, AudioError> {
        let (tx_ready, rx_ready) = std_mpsc::channel::<Result<Mixer, String>>();
        let (tx_shutdown, rx_shutdown) = std_mpsc::channel::<()>();

        thread::Builder::new()
            .name("audio-output".to_owned())
            .spawn(move || match OutputStreamBuilder::open_default_stream() {
                Ok(stream) => {
                    let _ = tx_ready.send(Ok(stream.mixer().clone()));
                    // 发送端全部 drop 后 recv 返回 Err
                    let _ = rx_shutdown.recv();
                    drop(stream);
                    tracing::debug!("音频输出已关闭");
                }
                Err(e) => {
                    let _ = tx_ready.send(Err(e.to_string()));
                }
            })
            .map_err(|e| AudioError::OutputStream(e.to_string()))?;

        let mixer = rx_ready
            .recv()
            .map_err(|e| AudioError::OutputStream(e.to_string()))?
            .map_err(AudioError::OutputStream)?;
        Ok(Self {
            mixer,
            _shutdown: tx_shutdown,
        })
    }

    pub fn mixer(&self) -> &Mixer {
        &self.mixer
    }
}

/// 正在播放的一首曲目；stop 或 drop 都会终止播放
pub struct PlaybackHandle {
    play_id: u64,
    sink: Arc<Sink>,
    end_cancel: Arc<AtomicBool>,
}

impl PlaybackHandle {
    pub fn start(
        mixer: &Mixer,
        play_id: u64,
        bytes: Vec<u8>,
        title: &str,
        tx_evt: &mpsc::Sender<AudioEvent>,
    ) -> Result<(Self, Option<u64>), AudioError> {
        let decoder = Decoder::new(Cursor::new(bytes)).map_err(|source| AudioError::Decode {
            title: title.to_owned(),
            source,
        })?;
        let duration_ms = decoder.total_duration().map(|d| d.as_millis() as u64);

        let sink = Arc::new(Sink::connect_new(mixer));
        sink.append(decoder);
        sink.play();

        let handle = Self {
            play_id,
            sink,
            end_cancel: Arc::new(AtomicBool::new(false)),
        };
        handle.watch_end(tx_evt);
        Ok((handle, duration_ms))
    }

    pub fn play_id(&self) -> u64 {
        self.play_id
    }

    pub fn stop(&self) {
        self.end_cancel.store(true, Ordering::Relaxed);
        self.sink.stop();
    }

    fn watch_end(&self, tx_evt: &mpsc::Sender<AudioEvent>) {
        let play_id = self.play_id;
        let tx_end = tx_evt.clone();
        let sink = Arc::clone(&self.sink);
        let cancel = Arc::clone(&self.end_cancel);

        let spawned = thread::Builder::new()
            .name(format!("audio-end-check-{play_id}"))
            .spawn(move || {
                sink.sleep_until_end();
                if !cancel.load(Ordering::Relaxed) {
                    tracing::debug!(play_id, "播放自然结束");
                    let _ = tx_end.blocking_send(AudioEvent::Ended { play_id });
                }
            });
        if let Err(e) = spawned {
            // 无法检测结束时播放仍可继续
            tracing::warn!(play_id, err = %e, "创建播放结束检测线程失败");
        }
    }
}

impl Drop for PlaybackHandle {
    fn drop(&mut self) {
        tracing::debug!(play_id = self.play_id, "停止播放");
        self.stop();
    }
}
