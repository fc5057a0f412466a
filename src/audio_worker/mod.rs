mod engine;
mod messages;
mod null_engine;
mod player;
mod worker;

pub use messages::{AudioCommand, AudioEvent};
pub use worker::{AudioBackend, AudioSettings, spawn_audio_worker};
