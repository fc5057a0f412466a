//! 跨 Actor 边界的错误类型
//!
//! reqwest::Error 不可 Clone，跨通道时只保留分类与展示文本。

use super::{ErrorKind, HarmonyError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageError {
    pub kind: ErrorKind,
    pub message: String,
}

impl MessageError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<HarmonyError> for MessageError {
    fn from(err: HarmonyError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for MessageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_keeps_kind_across_boundary() {
        let msg = MessageError::from(HarmonyError::Conflict);
        assert_eq!(msg.kind, ErrorKind::Conflict);
        assert!(msg.message.contains("mismo orden"));
    }
}
