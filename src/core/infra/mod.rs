mod request_tracker;

pub use request_tracker::{RequestKey, RequestTracker};
