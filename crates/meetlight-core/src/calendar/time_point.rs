//! Offset-qualified timestamp normalization.
//!
//! Calendar providers hand out `YYYY-MM-DDTHH:MM:SS+HH:MM`. The string is
//! taken apart field by field rather than fed to an RFC 3339 parser, and
//! only that exact shape is accepted:
//!
//! - only a `+` offset is recognised (`-05:00` and `Z` are rejected),
//! - only the offset *hours* are applied, offset minutes are dropped,
//! - seconds are validated and then truncated to zero.
//!
//! chrono is used for one thing only: validating the calendar date and
//! counting days since the Unix epoch.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Days from 0001-01-01 (CE day 1) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

const SECS_PER_DAY: i64 = 86_400;
const SECS_PER_HOUR: i64 = 3_600;
const SECS_PER_MINUTE: i64 = 60;

/// An absolute instant in whole seconds since the Unix epoch, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimePoint(i64);

impl TimePoint {
    pub const fn from_unix(secs: i64) -> Self {
        Self(secs)
    }

    pub const fn as_unix(self) -> i64 {
        self.0
    }

    /// Parse `YYYY-MM-DDTHH:MM:SS+HH:MM` into a UTC instant.
    ///
    /// The result has minute precision: seconds are checked for range and
    /// then discarded.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let (date, time) = raw
            .split_once('T')
            .ok_or_else(|| ParseError::MissingTimeSeparator(raw.to_string()))?;

        let days = parse_date(date)?;

        let (clock, offset) = time
            .split_once('+')
            .ok_or_else(|| ParseError::MissingOffset(raw.to_string()))?;

        let (hour, minute) = parse_clock(clock)?;
        let offset_hours = parse_offset_hours(offset)?;

        // May leave 0..=23; the multiplication carries into the adjacent day.
        let hours_utc = i64::from(hour) - i64::from(offset_hours);

        Ok(Self(
            days * SECS_PER_DAY + hours_utc * SECS_PER_HOUR + i64::from(minute) * SECS_PER_MINUTE,
        ))
    }

    /// Signed number of seconds from `self` until `later`, saturating at
    /// the `i64` bounds.
    pub fn seconds_until(self, later: TimePoint) -> i64 {
        later.0.saturating_sub(self.0)
    }

    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.0, 0)
    }
}

impl From<DateTime<Utc>> for TimePoint {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp())
    }
}

impl FromStr for TimePoint {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Saturating: instants near the `i64` bounds never overflow.
impl Sub for TimePoint {
    type Output = i64;

    fn sub(self, rhs: TimePoint) -> i64 {
        rhs.seconds_until(self)
    }
}

impl Add<i64> for TimePoint {
    type Output = TimePoint;

    fn add(self, secs: i64) -> TimePoint {
        TimePoint(self.0.saturating_add(secs))
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%SZ")),
            None => write!(f, "@{}", self.0),
        }
    }
}

/// `YYYY-MM-DD` to days since 1970-01-01.
fn parse_date(segment: &str) -> Result<i64, ParseError> {
    let malformed = || ParseError::MalformedDate(segment.to_string());

    let mut fields = segment.split('-');
    let (Some(year), Some(month), Some(day), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(malformed());
    };

    let year: i32 = numeric(year).ok_or_else(malformed)?;
    let month: u32 = numeric(month).ok_or_else(malformed)?;
    let day: u32 = numeric(day).ok_or_else(malformed)?;

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(malformed)?;
    Ok(i64::from(date.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE)
}

/// `HH:MM:SS` to `(hour, minute)`.
fn parse_clock(segment: &str) -> Result<(u8, u8), ParseError> {
    let malformed = || ParseError::MalformedTime(segment.to_string());

    let mut fields = segment.split(':');
    let (Some(hour), Some(minute), Some(second), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(malformed());
    };

    let hour: u8 = numeric(hour).ok_or_else(malformed)?;
    let minute: u8 = numeric(minute).ok_or_else(malformed)?;
    let second: u8 = numeric(second).ok_or_else(malformed)?;

    // 60 is a leap second; it is truncated away like any other second.
    if hour > 23 || minute > 59 || second > 60 {
        return Err(malformed());
    }
    Ok((hour, minute))
}

/// Hour part of `HH:MM`. Minutes are ignored.
fn parse_offset_hours(segment: &str) -> Result<u8, ParseError> {
    let hours = segment.split(':').next().unwrap_or_default();
    numeric::<u8>(hours)
        .filter(|h| *h <= 23)
        .ok_or_else(|| ParseError::MalformedOffset(segment.to_string()))
}

/// Unsigned decimal digits only; rejects signs, whitespace and fractions.
fn numeric<T: FromStr>(field: &str) -> Option<T> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
