use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{CoreError, CoreResult};

const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Current wall-clock time in Unix seconds
pub fn now_unix() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Relative time as shown next to comments ("just now", "5 minutes ago",
/// "1 hour ago", "3 days ago"). A week or more falls back to a short date.
pub fn format_time_ago(timestamp: u64, now: u64) -> String {
    let diff_mins = now.saturating_sub(timestamp) / 60;
    let diff_hours = diff_mins / 60;
    let diff_days = diff_hours / 24;

    if diff_mins < 1 {
        "just now".to_string()
    } else if diff_mins < 60 {
        format!("{} minute{} ago", diff_mins, plural(diff_mins))
    } else if diff_hours < 24 {
        format!("{} hour{} ago", diff_hours, plural(diff_hours))
    } else if diff_days < 7 {
        format!("{} day{} ago", diff_days, plural(diff_days))
    } else {
        format_short_date(timestamp)
    }
}

fn plural(n: u64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// "Apr 5, 2025"
pub fn format_short_date(timestamp: u64) -> String {
    match DateTime::from_timestamp(timestamp as i64, 0) {
        Some(dt) => dt.format("%b %-d, %Y").to_string(),
        None => timestamp.to_string(),
    }
}

/// Parse an ISO-8601 date-time without offset (seed data, `--now`) into
/// Unix seconds. Values are read as UTC. A bare date means midnight, and
/// an RFC 3339 string with an offset is honored.
pub fn parse_iso(value: &str) -> CoreResult<u64> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return to_unix(dt.timestamp(), value);
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return to_unix(naive.and_utc().timestamp(), value);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return to_unix(naive.and_utc().timestamp(), value);
        }
    }

    Err(CoreError::validation(format!("invalid date-time: {}", value)))
}

fn to_unix(secs: i64, value: &str) -> CoreResult<u64> {
    u64::try_from(secs)
        .map_err(|_| CoreError::validation(format!("date-time before 1970: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_variants() {
        assert_eq!(parse_iso("2025-04-05T14:57:47").unwrap(), 1_743_865_067);
        assert_eq!(parse_iso("2025-04-05 14:57:47").unwrap(), 1_743_865_067);
        assert_eq!(parse_iso("2025-04-05T14:57:47Z").unwrap(), 1_743_865_067);
        assert_eq!(parse_iso("2025-04-05").unwrap(), 1_743_811_200);
        assert!(parse_iso("yesterday").is_err());
        assert!(parse_iso("1969-12-31T00:00:00").is_err());
    }

    #[test]
    fn test_time_ago_buckets() {
        let now = 1_743_865_067;
        assert_eq!(format_time_ago(now - 30, now), "just now");
        assert_eq!(format_time_ago(now - 60, now), "1 minute ago");
        assert_eq!(format_time_ago(now - 45 * 60, now), "45 minutes ago");
        assert_eq!(format_time_ago(now - 3600, now), "1 hour ago");
        assert_eq!(format_time_ago(now - 5 * 3600, now), "5 hours ago");
        assert_eq!(format_time_ago(now - 2 * 86_400, now), "2 days ago");
        assert_eq!(format_time_ago(now + 600, now), "just now");
    }

    #[test]
    fn test_old_timestamps_show_date() {
        let now = parse_iso("2025-04-05T14:57:47").unwrap();
        let then = parse_iso("2025-03-20T09:00:00").unwrap();
        assert_eq!(format_time_ago(then, now), "Mar 20, 2025");
    }
}
