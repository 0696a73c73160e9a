//! Small text formatting helpers for tables and progress lines

use chrono::{DateTime, Local, Utc};

/// `<1s` as milliseconds, `<1m` as seconds, `<1h` as minutes, else hours.
pub fn format_duration(ms: i64) -> String {
    let ms = ms.max(0);
    let rounded = |unit: i64| (ms + unit / 2) / unit;
    if ms < 1_000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{}s", rounded(1_000))
    } else if ms < 3_600_000 {
        format!("{}m", rounded(60_000))
    } else {
        format!("{}h", rounded(3_600_000))
    }
}

pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Run duration; an unfinished run is measured up to `now`.
pub fn run_duration(started: Option<&str>, completed: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(start) = started.and_then(parse_timestamp) else {
        return "-".to_string();
    };
    let end = completed.and_then(parse_timestamp).unwrap_or(now);
    format_duration((end - start).num_milliseconds())
}

/// Time until `next`: `overdue`, `in Nm`, `in Nh`, `in Nd`, else the date.
pub fn relative_time(next: &str, now: DateTime<Utc>) -> String {
    let Some(at) = parse_timestamp(next) else {
        return next.to_string();
    };
    let diff = at - now;
    if diff.num_milliseconds() < 0 {
        return "overdue".to_string();
    }
    let minutes = diff.num_minutes();
    let hours = diff.num_hours();
    let days = diff.num_days();
    if minutes < 60 {
        format!("in {}m", minutes)
    } else if hours < 24 {
        format!("in {}h", hours)
    } else if days < 7 {
        format!("in {}d", days)
    } else {
        at.with_timezone(&Local).format("%Y-%m-%d").to_string()
    }
}

/// Local date and time, or `-` when absent or unparsable.
pub fn local_datetime(value: Option<&str>) -> String {
    value
        .and_then(parse_timestamp)
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Local wall-clock time for log entries.
pub fn local_time(value: Option<&str>) -> String {
    value
        .and_then(parse_timestamp)
        .map(|t| t.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "??:??:??".to_string())
}

/// First `max` characters of `s`.
pub fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Left-align `s` in `width` columns, counting characters.
pub fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    format!("{}{}", s, " ".repeat(width - len))
}

/// `1 variable` / `3 variables`
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
