//! HarmonyHub API 相关错误

/// 服务端违反 (playlist, song, order) 唯一约束时返回的 non_field_errors 文本
pub const UNIQUE_TRIPLE_MSG: &str = "Los campos playlist, song, order deben formar un conjunto único.";

/// 错误分类，决定错误在界面上的呈现方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 非 2xx 或传输失败
    Network,
    /// 意外的 content-type 或无法解析的响应体
    Format,
    /// 变更前缺少必需的 id
    Validation,
    /// 重复的 playlist/song/order 三元组
    Conflict,
}

/// HarmonyHub API 错误类型
#[derive(Debug, thiserror::Error)]
pub enum HarmonyError {
    /// 网络请求错误
    #[error("Error de red: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// 非 2xx 响应
    #[error("Error de red: {status} {reason}")]
    Status {
        status: u16,
        reason: String,
        body: String,
    },

    /// 响应不是 JSON
    #[error("Respuesta no es JSON")]
    NotJson { content_type: Option<String> },

    /// 响应体解析失败
    #[error("Respuesta inválida: {0}")]
    Serde(#[from] serde_json::Error),

    /// 输入参数无效
    #[error("{0}")]
    BadInput(&'static str),

    /// HTTP 头构造失败
    #[error("Cabecera inválida: {0}")]
    BadHeader(String),

    /// 唯一约束冲突
    #[error("La canción ya existe en la lista de reproducción con el mismo orden.")]
    Conflict,

    /// 服务端拒绝，payload 为原始错误体
    #[error("{payload}")]
    Rejected {
        status: u16,
        payload: serde_json::Value,
    },
}

impl HarmonyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HarmonyError::Reqwest(_) | HarmonyError::Status { .. } | HarmonyError::Rejected { .. } => {
                ErrorKind::Network
            }
            HarmonyError::NotJson { .. } | HarmonyError::Serde(_) => ErrorKind::Format,
            HarmonyError::BadInput(_) | HarmonyError::BadHeader(_) => ErrorKind::Validation,
            HarmonyError::Conflict => ErrorKind::Conflict,
        }
    }

    /// HTTP 状态码（若有）
    #[allow(dead_code)]
    pub fn status(&self) -> Option<u16> {
        match self {
            HarmonyError::Status { status, .. } | HarmonyError::Rejected { status, .. } => {
                Some(*status)
            }
            HarmonyError::Reqwest(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
