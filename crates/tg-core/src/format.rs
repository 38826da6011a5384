//! Human-readable clock times and durations.

use chrono::{DateTime, Local};

/// Converts epoch seconds to a local datetime, if representable.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn local_datetime(timestamp: f64) -> Option<DateTime<Local>> {
    if !timestamp.is_finite() {
        return None;
    }
    let secs = timestamp.floor();
    let nanos = ((timestamp - secs) * 1e9) as u32;
    DateTime::from_timestamp(secs as i64, nanos).map(|dt| dt.with_timezone(&Local))
}

/// Formats a timestamp as `YYYY-MM-DD HH:MM` in local time.
pub fn readable_time(timestamp: f64) -> String {
    local_datetime(timestamp).map_or_else(
        || timestamp.to_string(),
        |dt| dt.format("%Y-%m-%d %H:%M").to_string(),
    )
}

/// Formats a timestamp as `YYYY-MM-DD HH:MM:SS` in local time.
pub fn readable_datetime(timestamp: f64) -> String {
    local_datetime(timestamp).map_or_else(
        || timestamp.to_string(),
        |dt| dt.format("%Y-%m-%d %H:%M:%S").to_string(),
    )
}

/// Formats a duration in seconds as `H:MM`.
///
/// Seconds are rounded to the nearest minute with ties going to the even
/// minute, so 30s is "0:00" and 90s is "0:02". Hours are floored, which
/// keeps the minutes in 0..59 for negative input too.
#[expect(
    clippy::cast_possible_truncation,
    reason = "minute counts fit comfortably in i64"
)]
pub fn readable_duration(seconds: f64) -> String {
    let minutes = (seconds / 60.0).round_ties_even() as i64;
    format!("{}:{:02}", minutes.div_euclid(60), minutes.rem_euclid(60))
}
