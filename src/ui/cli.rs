use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "harmonyhub-ratui",
    version,
    about = "HarmonyHub 歌单编辑 TUI 客户端（Rust + ratatui）"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// 要编辑的歌单 id
    #[arg(long, env = "HARMONYHUB_PLAYLIST")]
    pub playlist: Option<i64>,

    /// API token（请求头 `Authorization: Token …`）
    #[arg(long, env = "HARMONYHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// 覆盖 API 根地址（默认取 settings.json）
    #[arg(long, env = "HARMONYHUB_BASE_URL")]
    pub base_url: Option<String>,

    /// 覆盖数据目录（默认走系统 data_local_dir）
    #[arg(long, env = "HARMONYHUB_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// 覆盖日志目录（默认 `{data_dir}/logs`）
    #[arg(long, env = "HARMONYHUB_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// 覆盖日志过滤（等价于设置 RUST_LOG）
    #[arg(long, env = "RUST_LOG")]
    pub log_filter: Option<String>,

    /// 不打开音频设备
    #[arg(long, env = "HARMONYHUB_NO_AUDIO")]
    pub no_audio: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// 运行 TUI（默认）
    Tui,

    /// 打印歌单条目后退出
    Entries,

    /// 打印一页歌曲目录后退出
    Songs {
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value = "")]
        search: String,
    },
}
