#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioCommand {
    /// 停掉当前曲目并播放新的 URL
    Play {
        entry_id: i64,
        url: String,
        title: String,
    },
    Stop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioEvent {
    Loading {
        entry_id: i64,
        title: String,
    },
    NowPlaying {
        entry_id: i64,
        play_id: u64,
        title: String,
        duration_ms: Option<u64>,
    },
    Stopped,
    Ended {
        play_id: u64,
    },
    Error(String),
}
