//! 统一请求去重/过期丢弃管理器
//!
//! 同一 key 只保留最新的 req_id，旧请求返回时会被丢弃。
//! 目录请求随每次搜索输入发出，乱序返回的旧结果不能覆盖新状态。

use std::collections::HashMap;
use std::hash::Hash;

/// 通用请求追踪器
#[derive(Debug)]
pub struct RequestTracker<K> {
    pending: HashMap<K, u64>,
}

impl<K: Eq + Hash> Default for RequestTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> RequestTracker<K> {
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }

    /// 发起新请求，返回分配的 req_id
    ///
    /// 如果同一 key 已有 pending 请求，旧请求会被覆盖（后续 accept 会失败）。
    pub fn issue(&mut self, key: K, next_id_fn: impl FnOnce() -> u64) -> u64 {
        let id = next_id_fn();
        self.pending.insert(key, id);
        id
    }

    /// 检查并接受响应
    ///
    /// 只有当 key 对应的 pending req_id 与传入的 req_id 匹配时才返回 true，
    /// 并自动清除该 key 的 pending 状态。
    pub fn accept(&mut self, key: &K, req_id: u64) -> bool {
        match self.pending.get(key) {
            Some(&pending_id) if pending_id == req_id => {
                self.pending.remove(key);
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }

    pub fn get_pending(&self, key: &K) -> Option<u64> {
        self.pending.get(key).copied()
    }
}

/// 预定义的请求类型 key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKey {
    /// 歌单条目列表
    Entries,
    /// 歌曲目录分页
    Catalog,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::utils::next_id;

    #[test]
    fn test_issue_and_accept() {
        let mut tracker: RequestTracker<RequestKey> = RequestTracker::new();
        let mut counter = 1u64;

        let req_id = tracker.issue(RequestKey::Catalog, || next_id(&mut counter));

        assert_eq!(req_id, 1);
        assert!(tracker.is_pending(&RequestKey::Catalog));
        assert!(tracker.accept(&RequestKey::Catalog, 1));
        assert!(!tracker.is_pending(&RequestKey::Catalog));
    }

    #[test]
    fn test_consecutive_issue_only_accepts_latest() {
        let mut tracker: RequestTracker<RequestKey> = RequestTracker::new();
        let mut counter = 1u64;

        let first = tracker.issue(RequestKey::Catalog, || next_id(&mut counter));
        let second = tracker.issue(RequestKey::Catalog, || next_id(&mut counter));

        assert!(!tracker.accept(&RequestKey::Catalog, first));
        // 第二个请求仍在等待
        assert_eq!(tracker.get_pending(&RequestKey::Catalog), Some(second));
        assert!(tracker.accept(&RequestKey::Catalog, second));
    }

    #[test]
    fn test_accept_without_issue_returns_false() {
        let mut tracker: RequestTracker<RequestKey> = RequestTracker::new();
        assert!(!tracker.accept(&RequestKey::Entries, 999));
    }

    #[test]
    fn test_different_keys_independent() {
        let mut tracker: RequestTracker<RequestKey> = RequestTracker::new();
        let mut counter = 1u64;

        let entries = tracker.issue(RequestKey::Entries, || next_id(&mut counter));
        let catalog = tracker.issue(RequestKey::Catalog, || next_id(&mut counter));

        assert!(tracker.accept(&RequestKey::Entries, entries));
        assert!(tracker.is_pending(&RequestKey::Catalog));
        assert!(tracker.accept(&RequestKey::Catalog, catalog));
    }
}
