//! Time utilities: stopwatch formatting and RFC 3339 parsing.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Utc};

/// Elapsed milliseconds as `HH:MM:SS.cc` when there is at least one hour,
/// `MM:SS.cc` otherwise (`cc` = hundredths, floored).
pub fn format_elapsed(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    let centis = (ms % 1000) / 10;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}.{:02}", hours, minutes, seconds, centis)
    } else {
        format!("{:02}:{:02}.{:02}", minutes, seconds, centis)
    }
}

/// Accepts a full RFC 3339 timestamp or a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_instant(s: &str) -> AppResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::InvalidDate(s.to_string()))
}
