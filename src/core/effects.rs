use crate::app::App;
use crate::audio_worker::AudioCommand;
use crate::harmony::actor::HarmonyCommand;
use crate::messages::app::AppEvent;
use tokio::sync::mpsc;

#[derive(Default)]
pub struct CoreEffects {
    pub(super) actions: Vec<CoreEffect>,
}

#[derive(Debug)]
pub enum CoreEffect {
    EmitState(Box<App>),
    EmitToast(String),
    SendHarmony {
        cmd: HarmonyCommand,
        warn: Option<&'static str>,
    },
    SendAudio {
        cmd: AudioCommand,
        warn: Option<&'static str>,
    },
}

impl CoreEffects {
    pub fn emit_state(&mut self, app: &App) {
        self.actions.push(CoreEffect::EmitState(Box::new(app.clone())));
    }

    pub fn send_harmony_warn(&mut self, cmd: HarmonyCommand, warn: &'static str) {
        self.actions.push(CoreEffect::SendHarmony {
            cmd,
            warn: Some(warn),
        });
    }

    pub fn send_audio(&mut self, cmd: AudioCommand) {
        self.actions.push(CoreEffect::SendAudio { cmd, warn: None });
    }

    pub fn send_audio_warn(&mut self, cmd: AudioCommand, warn: &'static str) {
        self.actions.push(CoreEffect::SendAudio {
            cmd,
            warn: Some(warn),
        });
    }

    pub fn toast(&mut self, message: impl Into<String>) {
        self.actions.push(CoreEffect::EmitToast(message.into()));
    }
}

pub struct CoreDispatch<'a> {
    pub(super) tx_harmony: &'a mpsc::Sender<HarmonyCommand>,
    pub(super) tx_audio: &'a mpsc::Sender<AudioCommand>,
    pub(super) tx_evt: &'a mpsc::Sender<AppEvent>,
}

pub async fn run_effects(effects: CoreEffects, dispatch: &CoreDispatch<'_>) {
    for effect in effects.actions {
        match effect {
            CoreEffect::EmitState(app) => {
                let _ = dispatch.tx_evt.send(AppEvent::State(app)).await;
            }
            CoreEffect::EmitToast(msg) => {
                let _ = dispatch.tx_evt.send(AppEvent::Toast(msg)).await;
            }
            CoreEffect::SendHarmony { cmd, warn } => {
                if let Err(e) = dispatch.tx_harmony.send(cmd).await
                    && let Some(ctx) = warn
                {
                    tracing::warn!(err = %e, "{ctx}");
                }
            }
            CoreEffect::SendAudio { cmd, warn } => {
                if let Err(e) = dispatch.tx_audio.send(cmd).await
                    && let Some(ctx) = warn
                {
                    tracing::warn!(err = %e, "{ctx}");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn effects_are_dispatched_in_order() {
        let (tx_harmony, mut rx_harmony) = mpsc::channel(4);
        let (tx_audio, mut rx_audio) = mpsc::channel(4);
        let (tx_evt, mut rx_evt) = mpsc::channel(4);
        let dispatch = CoreDispatch {
            tx_harmony: &tx_harmony,
            tx_audio: &tx_audio,
            tx_evt: &tx_evt,
        };

        let mut effects = CoreEffects::default();
        effects.toast("hola");
        effects.send_harmony_warn(
            HarmonyCommand::DeleteEntry {
                req_id: 4,
                entry_id: 9,
            },
            "send failed",
        );
        effects.send_audio(AudioCommand::Stop);
        effects.emit_state(&App::new(3));
        run_effects(effects, &dispatch).await;

        assert!(matches!(rx_evt.recv().await, Some(AppEvent::Toast(m)) if m == "hola"));
        assert!(matches!(
            rx_evt.recv().await,
            Some(AppEvent::State(app)) if app.playlist_id == 3
        ));
        assert!(matches!(
            rx_harmony.recv().await,
            Some(HarmonyCommand::DeleteEntry { entry_id: 9, .. })
        ));
        assert_eq!(rx_audio.recv().await, Some(AudioCommand::Stop));
    }

    #[tokio::test]
    async fn closed_channel_does_not_abort_remaining_effects() {
        let (tx_harmony, rx_harmony) = mpsc::channel(1);
        drop(rx_harmony);
        let (tx_audio, mut rx_audio) = mpsc::channel(1);
        let (tx_evt, _rx_evt) = mpsc::channel(1);
        let dispatch = CoreDispatch {
            tx_harmony: &tx_harmony,
            tx_audio: &tx_audio,
            tx_evt: &tx_evt,
        };

        let mut effects = CoreEffects::default();
        effects.send_harmony_warn(
            HarmonyCommand::DeleteEntry {
                req_id: 1,
                entry_id: 1,
            },
            "send failed",
        );
        effects.send_audio_warn(AudioCommand::Stop, "audio send failed");
        run_effects(effects, &dispatch).await;

        assert_eq!(rx_audio.recv().await, Some(AudioCommand::Stop));
    }
}
