use std::collections::VecDeque;

use crate::error::MessageError;

pub use crate::domain::model::{PlaylistEntry, Song};

/// 状态栏默认提示
pub const STATUS_HINT: &str = "Tab: foco | s: mostrar/ocultar | r: recargar | x: detener | q: salir";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiFocus {
    Search,
    Entries,
    Catalog,
}

/// 歌单详情页的全部渲染状态，启动时重建，不做持久化
#[derive(Debug, Clone)]
pub struct App {
    pub playlist_id: i64,
    pub ui_focus: UiFocus,

    pub songs: Vec<PlaylistEntry>,
    pub available_songs: Vec<Song>,
    pub loading: bool,
    pub error: Option<MessageError>,
    pub search_query: String,
    pub current_page: u32,
    pub next_page: Option<u32>,
    pub previous_page: Option<u32>,
    pub show_songs: bool,

    pub entries_selected: usize,
    pub catalog_selected: usize,

    /// 阻塞式提示，队首显示，确认后出队
    pub notices: VecDeque<String>,
    pub status: String,

    pub now_playing: Option<String>,
    pub playing_entry_id: Option<i64>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(0)
    }
}

impl App {
    pub fn new(playlist_id: i64) -> Self {
        Self {
            playlist_id,
            ui_focus: UiFocus::Catalog,
            songs: Vec::new(),
            available_songs: Vec::new(),
            loading: true,
            error: None,
            search_query: String::new(),
            current_page: 1,
            next_page: None,
            previous_page: None,
            show_songs: false,
            entries_selected: 0,
            catalog_selected: 0,
            notices: VecDeque::new(),
            status: STATUS_HINT.to_owned(),
            now_playing: None,
            playing_entry_id: None,
        }
    }

    /// 按搜索词在本地过滤后的条目，`songs` 本身不变
    pub fn visible_entries(&self) -> Vec<&PlaylistEntry> {
        self.songs
            .iter()
            .filter(|e| e.matches_query(&self.search_query))
            .collect()
    }

    pub fn selected_entry(&self) -> Option<&PlaylistEntry> {
        self.visible_entries().get(self.entries_selected).copied()
    }

    pub fn selected_song(&self) -> Option<&Song> {
        self.available_songs.get(self.catalog_selected)
    }

    pub fn clamp_selection(&mut self) {
        let visible = self.visible_entries().len();
        self.entries_selected = self.entries_selected.min(visible.saturating_sub(1));
        self.catalog_selected = self
            .catalog_selected
            .min(self.available_songs.len().saturating_sub(1));
    }

    /// 加载中或出错时列表整块被替换，列表上的操作一律不可用
    pub fn lists_hidden(&self) -> bool {
        self.loading || self.error.is_some()
    }

    pub fn push_notice(&mut self, message: impl Into<String>) {
        self.notices.push_back(message.into());
    }

    pub fn active_notice(&self) -> Option<&str> {
        self.notices.front().map(String::as_str)
    }

    /// 当前可获得焦点的区域；条目列表隐藏时跳过
    pub fn focus_order(&self) -> &'static [UiFocus] {
        if self.show_songs {
            &[UiFocus::Search, UiFocus::Entries, UiFocus::Catalog]
        } else {
            &[UiFocus::Search, UiFocus::Catalog]
        }
    }
}
