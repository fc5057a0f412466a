use crate::error::HarmonyError;
use reqwest::header::HeaderValue;
use std::fmt;

/// 外部提供的认证凭据，客户端只把它当作不透明字符串
#[derive(Clone, Default)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }

    pub fn authorization(&self) -> Result<HeaderValue, HarmonyError> {
        HeaderValue::from_str(&format!("Token {}", self.token))
            .map_err(|e| HarmonyError::BadHeader(format!("Authorization: {e}")))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &if self.has_token() { "***" } else { "" })
            .finish()
    }
}

/// 单次请求的上下文：凭据显式传入，不依赖全局状态
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub req_id: u64,
    pub session: Session,
}

impl RequestContext {
    pub fn new(req_id: u64, session: Session) -> Self {
        Self { req_id, session }
    }
}
