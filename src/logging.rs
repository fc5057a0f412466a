use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "info,reqwest=warn,hyper=warn";
const LOG_FILE_PREFIX: &str = "harmonyhub-ratui.log";

/// 持有后台写线程；drop 时刷盘
pub struct LogGuard(#[allow(dead_code)] Option<WorkerGuard>);

#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub dir: Option<PathBuf>,
    pub filter: Option<String>,
}

/// 日志只写文件，避免破坏 TUI 画面
pub fn init(data_dir: &Path, cfg: LogConfig) -> LogGuard {
    let log_dir = resolve_log_dir(data_dir, cfg.dir);

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(file_writer);

    let subscriber = tracing_subscriber::registry()
        .with(build_filter(cfg.filter.as_deref()))
        .with(file_layer);

    let _ = subscriber.try_init();
    tracing::info!(log_dir = %log_dir.display(), "tracing 已初始化");

    LogGuard(Some(guard))
}

fn resolve_log_dir(data_dir: &Path, dir: Option<PathBuf>) -> PathBuf {
    let log_dir = dir.unwrap_or_else(|| data_dir.join("logs"));
    match fs::create_dir_all(&log_dir) {
        Ok(()) => log_dir,
        Err(_) => {
            let fallback = std::env::temp_dir().join("harmonyhub-ratui-logs");
            let _ = fs::create_dir_all(&fallback);
            fallback
        }
    }
}

fn build_filter(filter: Option<&str>) -> EnvFilter {
    match filter {
        Some(s) if !s.trim().is_empty() => {
            EnvFilter::try_new(s).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        }
        _ => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    }
}
