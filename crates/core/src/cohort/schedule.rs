//! Date arithmetic for cohort scheduling.
//!
//! All span math is done in integer milliseconds so that session windows
//! tile the cohort exactly, with no floating-point drift at the boundaries.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::Serialize;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Milliseconds in one calendar day.
pub const MS_PER_DAY: i64 = 86_400_000;

/// One contiguous slice of a cohort's overall date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

/// Parse an ISO-8601 date or date-time.
///
/// Accepts RFC 3339 (`2024-01-01T09:30:00Z`), a zone-less date-time (taken as
/// UTC), or a bare `YYYY-MM-DD` date (UTC midnight). `field` names the
/// offending input in the error message.
pub fn parse_iso_date(field: &str, value: &str) -> Result<Timestamp, CoreError> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(CoreError::InvalidInput(format!(
        "{field} must be an ISO-8601 date, got '{trimmed}'"
    )))
}

/// Require `end` to be strictly after `start`.
pub fn ensure_end_after_start(start: Timestamp, end: Timestamp) -> Result<(), CoreError> {
    if end <= start {
        return Err(CoreError::InvalidInput(
            "endDate must be after startDate".to_string(),
        ));
    }
    Ok(())
}

/// Whole days covered by `[start, end]`, rounded up.
pub fn duration_in_days(start: Timestamp, end: Timestamp) -> i64 {
    let span = (end - start).num_milliseconds();
    let days = span.div_euclid(MS_PER_DAY);
    if span.rem_euclid(MS_PER_DAY) > 0 {
        days + 1
    } else {
        days
    }
}

/// Split `[start, end]` into `count` equal, contiguous windows.
///
/// Window `i` starts at `start + i * span / count` (integer division on the
/// millisecond span) and ends where window `i + 1` starts. The final window
/// always ends exactly at `end`. Returns an empty list for `count == 0`.
pub fn session_windows(start: Timestamp, end: Timestamp, count: u32) -> Vec<SessionWindow> {
    if count == 0 {
        return Vec::new();
    }

    let span = i128::from((end - start).num_milliseconds());
    let n = i128::from(count);
    let offset = |i: i128| start + Duration::milliseconds((span * i / n) as i64);

    (0..n)
        .map(|i| SessionWindow {
            start: offset(i),
            end: if i == n - 1 { end } else { offset(i + 1) },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    use super::*;

    fn utc(y: i32, m: u32, d: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn parses_date_only() {
        assert_eq!(parse_iso_date("startDate", "2024-01-01").unwrap(), utc(2024, 1, 1));
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let parsed = parse_iso_date("startDate", "2024-01-01T02:00:00+02:00").unwrap();
        assert_eq!(parsed, utc(2024, 1, 1));
    }

    #[test]
    fn parses_zoneless_datetime_as_utc() {
        let parsed = parse_iso_date("endDate", "2024-03-05T00:00:00.000").unwrap();
        assert_eq!(parsed, utc(2024, 3, 5));
    }

    #[test]
    fn rejects_garbage_and_names_field() {
        let err = parse_iso_date("endDate", "next tuesday").unwrap_err();
        assert_matches!(err, CoreError::InvalidInput(msg) if msg.starts_with("endDate"));
    }

    #[test]
    fn end_must_be_strictly_after_start() {
        let day = utc(2024, 1, 1);
        assert!(ensure_end_after_start(day, day).is_err());
        assert!(ensure_end_after_start(utc(2024, 1, 2), day).is_err());
        assert!(ensure_end_after_start(day, utc(2024, 1, 2)).is_ok());
    }

    #[test]
    fn leap_year_duration_is_366_days() {
        assert_eq!(duration_in_days(utc(2024, 1, 1), utc(2025, 1, 1)), 366);
    }

    #[test]
    fn partial_day_rounds_up() {
        let start = utc(2024, 1, 1);
        let end = start + Duration::hours(25);
        assert_eq!(duration_in_days(start, end), 2);
    }

    #[test]
    fn windows_tile_the_span_exactly() {
        let start = utc(2024, 1, 1);
        let end = utc(2024, 1, 11);
        let windows = session_windows(start, end, 3);

        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0].start, start);
        assert_eq!(windows[2].end, end);
        for pair in windows.windows(2) {
            assert_eq!(pair[0].end, pair[1].start, "windows must be contiguous");
        }
        for w in &windows {
            assert!(w.start < w.end);
        }
    }

    #[test]
    fn uneven_split_floors_each_boundary() {
        // 10 ms split three ways: boundaries at 0, 3, 6, 10.
        let start = utc(2024, 1, 1);
        let end = start + Duration::milliseconds(10);
        let offsets: Vec<i64> = session_windows(start, end, 3)
            .iter()
            .map(|w| (w.start - start).num_milliseconds())
            .collect();
        assert_eq!(offsets, vec![0, 3, 6]);
    }

    #[test]
    fn single_window_covers_everything() {
        let start = utc(2024, 1, 1);
        let end = utc(2024, 2, 1);
        assert_eq!(
            session_windows(start, end, 1),
            vec![SessionWindow { start, end }]
        );
    }

    #[test]
    fn zero_windows_is_empty() {
        assert!(session_windows(utc(2024, 1, 1), utc(2024, 2, 1), 0).is_empty());
    }
}
