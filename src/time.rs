//! Time related utils.

use chrono::Utc;

/// DateTime in UTC.
pub type DateTime = chrono::DateTime<Utc>;

/// Create a datetime of the current time.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format a datetime into an `oauth_timestamp` value: seconds since the
/// Unix epoch, as a decimal string.
pub fn format_timestamp(t: DateTime) -> String {
    t.timestamp().to_string()
}
