//! Date/time parsing for event fields.
//!
//! Events carry their date and clock times as strings. This module turns them
//! into local wall-clock timestamps. Nothing here fails: a string that does not
//! name a real calendar date or a valid 24-hour time becomes
//! [`Timestamp::Invalid`], and callers branch on that variant instead of
//! handling errors.
//!
//! # Functions
//!
//! - [`parse_date_time`] — `YYYY-MM-DD` + `HH:MM` → [`Timestamp`]
//! - [`convert_event_to_date_range`] — an event's `[start, end)` as a [`DateRange`]

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::event::Event;

// ── Timestamp ───────────────────────────────────────────────────────────────

/// A local wall-clock instant, or the marker for an unparseable one.
///
/// Not `PartialOrd`. Compare through [`Timestamp::valid`] and handle the
/// invalid case at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Timestamp {
    Valid(NaiveDateTime),
    Invalid,
}

impl Timestamp {
    pub fn is_valid(&self) -> bool {
        matches!(self, Timestamp::Valid(_))
    }

    /// The instant, if valid.
    pub fn valid(&self) -> Option<NaiveDateTime> {
        match self {
            Timestamp::Valid(dt) => Some(*dt),
            Timestamp::Invalid => None,
        }
    }
}

impl From<Option<NaiveDateTime>> for Timestamp {
    fn from(value: Option<NaiveDateTime>) -> Self {
        value.map_or(Timestamp::Invalid, Timestamp::Valid)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Timestamp::Valid(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M")),
            Timestamp::Invalid => f.write_str("Invalid Date"),
        }
    }
}

// ── DateRange ───────────────────────────────────────────────────────────────

/// The half-open interval `[start, end)` of one event. Each endpoint is
/// parsed independently, so one may be valid while the other is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl DateRange {
    /// Both endpoints, when both are valid.
    pub fn bounds(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((self.start.valid()?, self.end.valid()?))
    }
}

// ── Parsing ─────────────────────────────────────────────────────────────────

/// Combine a date and a clock time into a local timestamp.
///
/// `date` must be `YYYY-MM-DD` naming a real calendar day; `time` must be
/// `HH:MM` (a trailing `:SS` is tolerated) with hour 0–23. Anything else,
/// including an empty date, yields [`Timestamp::Invalid`].
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use schedule_engine::datetime::{parse_date_time, Timestamp};
///
/// let ts = parse_date_time("2024-07-01", "14:30");
/// let expected = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap().and_hms_opt(14, 30, 0).unwrap();
/// assert_eq!(ts, Timestamp::Valid(expected));
///
/// assert_eq!(parse_date_time("2024-04-44", "14:30"), Timestamp::Invalid);
/// assert_eq!(parse_date_time("2024-04-24", "30:30"), Timestamp::Invalid);
/// ```
pub fn parse_date_time(date: &str, time: &str) -> Timestamp {
    let date = match parse_date(date) {
        Some(d) => d,
        None => return Timestamp::Invalid,
    };
    parse_clock_time(time)
        .map(|t| date.and_time(t))
        .into()
}

/// Convert an event into its `[start, end)` range. Invalidity propagates per
/// endpoint: a bad `start_time` with a good `end_time` gives
/// `{ start: Invalid, end: Valid(..) }`.
pub fn convert_event_to_date_range(event: &Event) -> DateRange {
    DateRange {
        start: parse_date_time(&event.date, &event.start_time),
        end: parse_date_time(&event.date, &event.end_time),
    }
}

/// Parse a `YYYY-MM-DD` date. Empty or non-existent dates give `None`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse a 24-hour `HH:MM` or `HH:MM:SS` clock time.
pub fn parse_clock_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

// ── Tests ───────────────────────────────────────────────────────────────────
