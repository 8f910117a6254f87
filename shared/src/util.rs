//! Small shared utilities

/// Current time as Unix millis
///
/// All timestamps are stored as `i64` Unix millis; conversion to the
/// business time zone happens at the presentation layer.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
