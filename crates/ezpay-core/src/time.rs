//! Clock abstraction and inclusive date ranges for filtering transactions

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use std::sync::Mutex;

/// Source of creation timestamps
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(start) }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now = *now + by;
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Inclusive timestamp bounds; a missing side is unbounded
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Check if a timestamp falls within the range
    pub fn contains(&self, ts: &DateTime<Utc>) -> bool {
        match (self.start, self.end) {
            (None, None) => true,
            (Some(s), None) => *ts >= s,
            (None, Some(e)) => *ts <= e,
            (Some(s), Some(e)) => *ts >= s && *ts <= e,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Parse a range bound. Accepts RFC 3339 timestamps or plain `YYYY-MM-DD`
/// dates; a plain date expands to the start of the day, or to its last
/// instant when `end_of_day` is set so the whole day stays inclusive.
pub fn parse_bound(s: &str, end_of_day: bool) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    let time = if end_of_day {
        NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)?
    } else {
        NaiveTime::from_hms_opt(0, 0, 0)?
    };
    Some(Utc.from_utc_datetime(&date.and_time(time)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_range_contains_inclusive() {
        let range = DateRange::new(at(2024, 1, 1, 0), at(2024, 1, 31, 0));
        assert!(range.contains(&at(2024, 1, 1, 0)));
        assert!(range.contains(&at(2024, 1, 31, 0)));
        assert!(range.contains(&at(2024, 1, 15, 12)));
        assert!(!range.contains(&at(2023, 12, 31, 23)));
        assert!(!range.contains(&at(2024, 1, 31, 1)));
    }

    #[test]
    fn test_half_open_ranges() {
        let from = DateRange { start: Some(at(2024, 6, 1, 0)), end: None };
        assert!(from.contains(&at(2030, 1, 1, 0)));
        assert!(!from.contains(&at(2024, 5, 31, 0)));
        assert!(DateRange::default().is_unbounded());
        assert!(DateRange::default().contains(&at(1999, 1, 1, 0)));
    }

    #[test]
    fn test_parse_bound() {
        assert_eq!(parse_bound("2024-01-15", false), Some(at(2024, 1, 15, 0)));
        let end = parse_bound("2024-01-15", true).unwrap();
        assert!(end > at(2024, 1, 15, 23));
        assert!(end < at(2024, 1, 16, 0));
        assert_eq!(parse_bound("2024-01-15T10:00:00Z", false), Some(at(2024, 1, 15, 10)));
        assert_eq!(parse_bound("yesterday", false), None);
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(at(2024, 1, 1, 0));
        clock.advance(Duration::hours(5));
        assert_eq!(clock.now(), at(2024, 1, 1, 5));
        clock.set(at(2025, 1, 1, 0));
        assert_eq!(clock.now(), at(2025, 1, 1, 0));
    }
}
