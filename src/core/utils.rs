/// 分配下一个请求 id（0 保留给“无请求”）
pub fn next_id(req_id: &mut u64) -> u64 {
    let id = *req_id;
    *req_id = req_id.wrapping_add(1).max(1);
    id
}
