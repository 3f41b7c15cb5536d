//! Time windows and the date/time encodings of flight sheets
//!
//! All timestamps are local wall-clock `NaiveDateTime` values. Sheets encode
//! dates as `YYYYMMDD` and times of day as `HH:mm`; generated legs also carry
//! a combined `DD/MM/YYYY HH:mm:ss` stamp.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Combined generator timestamp, e.g. `01/01/2024 08:00:00`
pub const STAD_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Time of day in sheet rows, e.g. `08:00`
pub const HHMM_FORMAT: &str = "%H:%M";

/// Time of day with seconds, accepted on input only
pub const HHMMSS_FORMAT: &str = "%H:%M:%S";

/// Date column of load rows, e.g. `01/01/2024`
pub const LOAD_DATE_FORMAT: &str = "%d/%m/%Y";

/// Closed interval of wall-clock time that generated legs must fall in.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use flight_schedule_core_rs::core::time::TimeWindow;
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let window = TimeWindow::new(
///     day.and_hms_opt(0, 0, 0).unwrap(),
///     day.and_hms_opt(23, 59, 59).unwrap(),
/// );
/// assert!(window.contains(day.and_hms_opt(12, 0, 0).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeWindow {
    /// Create a window
    ///
    /// # Panics
    /// Panics if `start >= end`
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        assert!(start < end, "window start must precede window end");
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Width of the window in milliseconds
    pub fn span_millis(&self) -> i64 {
        (self.end - self.start).num_milliseconds()
    }

    /// Whole days covered (truncated)
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Timestamp `millis` after the window start
    pub fn offset(&self, millis: i64) -> NaiveDateTime {
        self.start + Duration::milliseconds(millis)
    }

    /// Inclusive on both ends
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        ts >= self.start && ts <= self.end
    }

    pub fn clamp(&self, ts: NaiveDateTime) -> NaiveDateTime {
        ts.clamp(self.start, self.end)
    }
}

/// Parse an 8-digit `YYYYMMDD` date.
///
/// Returns `None` for anything other than eight ASCII digits forming a real
/// calendar date.
pub fn parse_sdt(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let year = raw[0..4].parse().ok()?;
    let month = raw[4..6].parse().ok()?;
    let day = raw[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse a time of day in `HH:mm` or `HH:mm:ss`.
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, HHMM_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(raw, HHMMSS_FORMAT))
        .ok()
}

/// Combine a sheet date and time of day into one timestamp.
pub fn combine_sdt_time(sdt: &str, time: &str) -> Option<NaiveDateTime> {
    Some(parse_sdt(sdt)?.and_time(parse_time_of_day(time)?))
}

pub fn format_sdt(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

pub fn format_hhmm(time: NaiveTime) -> String {
    time.format(HHMM_FORMAT).to_string()
}

pub fn format_stad(ts: NaiveDateTime) -> String {
    ts.format(STAD_FORMAT).to_string()
}

/// `YYYYMMDD` → `DD/MM/YYYY`, `None` when the date does not parse.
pub fn sdt_to_load_date(sdt: &str) -> Option<String> {
    parse_sdt(sdt).map(|d| d.format(LOAD_DATE_FORMAT).to_string())
}

/// Zero-pad a leading `H:M` pattern to `HH:MM` without range checks.
///
/// `"8:5"` becomes `"08:05"`, `"08:00:30"` becomes `"08:00"`, and anything
/// not starting with one or two digits, a colon, then one or two digits
/// yields `None`.
pub fn normalize_hhmm_prefix(raw: &str) -> Option<String> {
    fn leading_digits(s: &str) -> Option<(&str, &str)> {
        let len = s.bytes().take_while(u8::is_ascii_digit).count();
        (1..=2).contains(&len).then(|| s.split_at(len))
    }

    let (hours, rest) = leading_digits(raw)?;
    let rest = rest.strip_prefix(':')?;
    // "08:123" still matches with the first two minute digits
    let minute_len = rest.bytes().take_while(u8::is_ascii_digit).count().min(2);
    if minute_len == 0 {
        return None;
    }
    let minutes = &rest[..minute_len];

    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    Some(format!("{hours:02}:{minutes:02}"))
}
