use crate::settings::AppSettings;
use directories::ProjectDirs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct HarmonyClientConfig {
    pub base_url: String,
    pub http_timeout_secs: u64,
    pub http_connect_timeout_secs: u64,
}

impl Default for HarmonyClientConfig {
    fn default() -> Self {
        Self::from_settings(&AppSettings::default())
    }
}

impl HarmonyClientConfig {
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            http_timeout_secs: settings.http_timeout_secs,
            http_connect_timeout_secs: settings.http_connect_timeout_secs,
        }
    }
}

/// 系统 data_local_dir 下的应用目录，取不到时退回临时目录
pub fn default_data_dir() -> PathBuf {
    ProjectDirs::from("dev", "harmonyhub", "harmonyhub-ratui")
        .map(|p| p.data_local_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("harmonyhub-ratui"))
}
