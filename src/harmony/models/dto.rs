use serde::Deserialize;

use crate::domain::{Page, PlaylistEntry};

pub type EntriesResp = Page<PlaylistEntry>;

/// POST /playlist-entries/ 失败时的响应体（DRF 校验错误）
#[derive(Debug, Default, Deserialize)]
pub struct EntryErrorResp {
    #[serde(default)]
    pub non_field_errors: Vec<String>,
}

impl EntryErrorResp {
    pub fn from_value(v: &serde_json::Value) -> Self {
        serde_json::from_value(v.clone()).unwrap_or_default()
    }

    pub fn has_error(&self, msg: &str) -> bool {
        self.non_field_errors.iter().any(|e| e == msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_object_body_has_no_errors() {
        let resp = EntryErrorResp::from_value(&json!(["oops"]));
        assert!(resp.non_field_errors.is_empty());
    }

    #[test]
    fn finds_exact_message() {
        let resp = EntryErrorResp::from_value(&json!({"non_field_errors": ["a", "b"]}));
        assert!(resp.has_error("b"));
        assert!(!resp.has_error("c"));
    }
}
