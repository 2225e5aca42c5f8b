/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a UUID v4 string for use as resource ID.
///
/// All entities use TEXT UUID primary keys except the guest-stay serial
/// number, which is drawn from a monotonic counter.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
