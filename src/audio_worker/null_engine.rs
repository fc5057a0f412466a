use tokio::sync::mpsc;

use super::messages::{AudioCommand, AudioEvent};

struct NullEngine {
    tx_evt: mpsc::Sender<AudioEvent>,
    rx_cmd: mpsc::Receiver<AudioCommand>,
    play_id: u64,
}

impl NullEngine {
    async fn run(mut self) {
        while let Some(cmd) = self.rx_cmd.recv().await {
            self.handle_audio_command(cmd).await;
        }
    }

    async fn handle_audio_command(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::Play {
                entry_id, title, ..
            } => {
                self.play_id = self.play_id.wrapping_add(1).max(1);
                let _ = self
                    .tx_evt
                    .send(AudioEvent::NowPlaying {
                        entry_id,
                        play_id: self.play_id,
                        title,
                        duration_ms: None,
                    })
                    .await;
            }
            AudioCommand::Stop => {
                let _ = self.tx_evt.send(AudioEvent::Stopped).await;
            }
        }
    }
}

pub(super) fn spawn(rx_cmd: mpsc::Receiver<AudioCommand>, tx_evt: mpsc::Sender<AudioEvent>) {
    tokio::spawn(async move {
        let engine = NullEngine {
            tx_evt,
            rx_cmd,
            play_id: 0,
        };
        engine.run().await;
    });
}

#[cfg(test)]
mod tests {
    use super::super::{AudioBackend, AudioSettings, spawn_audio_worker};
    use super::*;

    #[tokio::test]
    async fn null_engine_reports_playback_lifecycle() {
        let (tx, mut rx) = spawn_audio_worker(AudioBackend::Null, AudioSettings::default());
        tx.send(AudioCommand::Play {
            entry_id: 4,
            url: "http://example.com/a.mp3".to_owned(),
            title: "A".to_owned(),
        })
        .await
        .expect("send");
        assert_eq!(
            rx.recv().await,
            Some(AudioEvent::NowPlaying {
                entry_id: 4,
                play_id: 1,
                title: "A".to_owned(),
                duration_ms: None,
            })
        );

        tx.send(AudioCommand::Stop).await.expect("send");
        assert_eq!(rx.recv().await, Some(AudioEvent::Stopped));
    }
}
