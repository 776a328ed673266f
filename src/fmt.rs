//! Shared formatting helpers for table cells and detail popups.
//!
//! All functions here are pure and total: a value that fails to parse
//! renders as the `FALLBACK` placeholder instead of propagating an error
//! past its own cell.

use chrono::NaiveDateTime;

/// Placeholder for values that are missing or fail to parse.
pub const FALLBACK: &str = "—";

/// Backend timestamp format ("2024-03-01 09:15:00").
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses a backend timestamp. `None` for missing or malformed input.
pub fn parse_date(raw: Option<&str>) -> Option<NaiveDateTime> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match NaiveDateTime::parse_from_str(raw, DATE_FORMAT) {
        Ok(dt) => Some(dt),
        Err(err) => {
            tracing::debug!(value = raw, %err, "unparseable timestamp");
            None
        }
    }
}

/// Formats a backend timestamp as a short date ("03-01 09:15"),
/// falling back to the placeholder on malformed input.
pub fn format_date_short(raw: Option<&str>) -> String {
    match parse_date(raw) {
        Some(dt) => dt.format("%m-%d %H:%M").to_string(),
        None => FALLBACK.to_string(),
    }
}

/// Formats a backend timestamp as a full date, placeholder on failure.
pub fn format_date_full(raw: Option<&str>) -> String {
    match parse_date(raw) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => FALLBACK.to_string(),
    }
}

/// Formats the age of a backend timestamp relative to `now_epoch` (seconds):
/// `"3s"`, `"5m"`, `"2h"`, `"7d"`. Placeholder for malformed input.
pub fn format_age(raw: Option<&str>, now_epoch: i64) -> String {
    let Some(dt) = parse_date(raw) else {
        return FALLBACK.to_string();
    };
    let age = now_epoch - dt.and_utc().timestamp();
    if age < 0 {
        return FALLBACK.to_string();
    }
    format_duration_compact(age)
}

/// Formats a duration in seconds as a single compact unit.
pub fn format_duration_compact(secs: i64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86400 {
        format!("{}h", secs / 3600)
    } else {
        format!("{}d", secs / 86400)
    }
}

/// Formats a count with K/M suffix for narrow columns.
pub fn format_count(v: u64) -> String {
    if v >= 1_000_000 {
        format!("{:.1}M", v as f64 / 1e6)
    } else if v >= 10_000 {
        format!("{:.1}K", v as f64 / 1e3)
    } else {
        v.to_string()
    }
}

/// Truncates a string to `max_len` characters with a unicode ellipsis.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let cut: String = s.chars().take(max_len.saturating_sub(1)).collect();
    format!("{}…", cut)
}

/// Renders an optional text field, placeholder when missing or blank.
pub fn or_fallback(v: Option<&str>) -> String {
    match v {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => FALLBACK.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_date_renders_placeholder() {
        assert_eq!(format_date_short(Some("not-a-date")), FALLBACK);
        assert_eq!(format_date_full(Some("2024-13-77 99:00:00")), FALLBACK);
        assert_eq!(format_date_short(None), FALLBACK);
        assert_eq!(format_date_short(Some("")), FALLBACK);
    }

    #[test]
    fn valid_date_formats() {
        assert_eq!(
            format_date_short(Some("2024-03-01 09:15:00")),
            "03-01 09:15"
        );
        assert_eq!(
            format_date_full(Some("2024-03-01 09:15:00")),
            "2024-03-01 09:15:00"
        );
    }

    #[test]
    fn age_is_compact_single_unit() {
        let base = parse_date(Some("2024-03-01 09:15:00"))
            .unwrap()
            .and_utc()
            .timestamp();
        assert_eq!(format_age(Some("2024-03-01 09:15:00"), base + 30), "30s");
        assert_eq!(format_age(Some("2024-03-01 09:15:00"), base + 7200), "2h");
        assert_eq!(
            format_age(Some("2024-03-01 09:15:00"), base + 3 * 86400),
            "3d"
        );
        // Future timestamps degrade to the placeholder.
        assert_eq!(format_age(Some("2024-03-01 09:15:00"), base - 10), FALLBACK);
        assert_eq!(format_age(Some("garbage"), base), FALLBACK);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("0123456789", 5), "0123…");
        assert_eq!(truncate("préséance", 5), "prés…");
    }

    #[test]
    fn counts_use_suffixes() {
        assert_eq!(format_count(950), "950");
        assert_eq!(format_count(12_500), "12.5K");
        assert_eq!(format_count(3_200_000), "3.2M");
    }
}
