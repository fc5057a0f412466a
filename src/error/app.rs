//! 应用通用错误

use super::HarmonyError;

/// 应用通用错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 设置错误
    #[error("设置错误: {0}")]
    Settings(#[from] SettingsError),

    /// HarmonyHub API 错误
    #[error("HarmonyHub 错误: {0}")]
    Harmony(#[from] HarmonyError),

    /// 其他错误
    #[error("{0}")]
    Other(String),
}

/// 设置相关错误
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// 保存设置失败
    #[error("保存设置失败: {source}")]
    Save {
        #[source]
        source: std::io::Error,
    },

    /// 序列化设置失败
    #[error("序列化设置失败: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "文件未找到");
        let err = AppError::Io(io_err);
        assert!(err.to_string().contains("IO 错误"));
    }

    #[test]
    fn test_error_chain() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "test");
        let err = AppError::Settings(SettingsError::Save { source: io_err });

        use std::error::Error;
        assert!(err.source().is_some());
    }
}
