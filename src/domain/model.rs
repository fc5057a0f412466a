use serde::{Deserialize, Serialize};

/// 目录中的一首歌
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    /// 可直接播放的音频 URL
    #[serde(default)]
    pub song_file: Option<String>,
}

impl Song {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or("Sin título")
    }
}

/// 歌单条目：song 与 playlist 在某个 order 位置上的关联记录
///
/// 服务端可能把 `title` / `song_file` 一并展开返回，因此两者都是可选的。
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub id: i64,
    pub song: i64,
    pub playlist: i64,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub song_file: Option<String>,
}

impl PlaylistEntry {
    /// 本地过滤：标题不区分大小写的子串匹配，无标题的条目永不匹配
    pub fn matches_query(&self, query: &str) -> bool {
        let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) else {
            return false;
        };
        title.to_lowercase().contains(&query.to_lowercase())
    }
}

/// POST /playlist-entries/ 的请求体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NewEntry {
    pub song: i64,
    pub playlist: i64,
    pub order: i64,
}

impl NewEntry {
    pub fn is_complete(&self) -> bool {
        self.song > 0 && self.playlist > 0
    }
}

/// 分页信封 `{ results, next, previous }`
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
}

/// 一页目录结果，游标已换算成页码
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogPage {
    pub page: u32,
    pub songs: Vec<Song>,
    pub next_page: Option<u32>,
    pub previous_page: Option<u32>,
}

impl CatalogPage {
    pub fn from_page(page: u32, resp: Page<Song>) -> Self {
        Self {
            page,
            next_page: resp.next.as_ref().map(|_| page + 1),
            previous_page: resp.previous.as_ref().map(|_| page.saturating_sub(1)),
            songs: resp.results,
        }
    }
}
