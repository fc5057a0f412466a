use std::time::Duration;
use tokio::sync::mpsc;

use super::messages::{AudioCommand, AudioEvent};
use super::{engine, null_engine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioBackend {
    Real,
    /// 不输出声音，仅回报事件（无声卡环境 / 测试）
    Null,
}

#[derive(Debug, Clone, Copy)]
pub struct AudioSettings {
    pub http_timeout: Duration,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            http_timeout: Duration::from_secs(30),
        }
    }
}

pub fn spawn_audio_worker(
    backend: AudioBackend,
    settings: AudioSettings,
) -> (mpsc::Sender<AudioCommand>, mpsc::Receiver<AudioEvent>) {
    let (tx_cmd, rx_cmd) = mpsc::channel::<AudioCommand>(16);
    let (tx_evt, rx_evt) = mpsc::channel::<AudioEvent>(16);

    match backend {
        AudioBackend::Real => engine::spawn(rx_cmd, tx_evt, settings),
        AudioBackend::Null => null_engine::spawn(rx_cmd, tx_evt),
    }

    (tx_cmd, rx_evt)
}
