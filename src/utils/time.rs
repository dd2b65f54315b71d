use chrono::Utc;

/// Returns current timestamp in milliseconds (Unix epoch)
pub fn current_timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}
