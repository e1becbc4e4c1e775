//! Raw provider records and the normalized windows built from them.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::time_point::TimePoint;
use crate::error::ParseError;

/// Summary shown for events that have none.
pub const UNTITLED: &str = "Untitled";

/// One side of a raw event. Google Calendar sends `dateTime` for timed
/// events and `date` for all-day events; only the former is understood.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEventTime {
    #[serde(rename = "dateTime", default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl RawEventTime {
    pub fn at(date_time: impl Into<String>) -> Self {
        Self {
            date_time: Some(date_time.into()),
            date: None,
        }
    }
}

/// An event exactly as the provider returned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub start: RawEventTime,
    #[serde(default)]
    pub end: RawEventTime,
}

impl RawEvent {
    pub fn new(summary: Option<&str>, start: &str, end: &str) -> Self {
        Self {
            summary: summary.map(str::to_string),
            start: RawEventTime::at(start),
            end: RawEventTime::at(end),
        }
    }
}

/// A meeting's start and end instants plus its display summary.
///
/// `end >= start` is not enforced: providers occasionally send reversed
/// ranges and the proximity engine copes with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventWindow {
    pub start: TimePoint,
    pub end: TimePoint,
    pub summary: String,
}

impl EventWindow {
    pub fn new(start: TimePoint, end: TimePoint, summary: impl Into<String>) -> Self {
        Self {
            start,
            end,
            summary: summary.into(),
        }
    }

    /// Normalize both ends of a raw event. Either failure rejects the event.
    pub fn from_raw(raw: &RawEvent) -> Result<Self, ParseError> {
        let start = parse_side(&raw.start, "start")?;
        let end = parse_side(&raw.end, "end")?;
        let summary = raw.summary.clone().unwrap_or_else(|| UNTITLED.to_string());
        Ok(Self { start, end, summary })
    }

    /// `start <= now <= end`.
    pub fn contains(&self, now: TimePoint) -> bool {
        self.start <= now && now <= self.end
    }

    /// The meeting has not concluded yet.
    pub fn ends_after(&self, now: TimePoint) -> bool {
        self.end > now
    }
}

fn parse_side(side: &RawEventTime, which: &'static str) -> Result<TimePoint, ParseError> {
    let raw = side
        .date_time
        .as_deref()
        .ok_or(ParseError::MissingDateTime(which))?;
    TimePoint::parse(raw)
}

/// Windows built from one batch of raw events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowBatch {
    /// Successfully parsed windows, in provider order.
    pub windows: Vec<EventWindow>,
    /// Number of records that were dropped.
    pub skipped: usize,
}

/// Convert every raw event, dropping (and logging) the ones that do not parse.
pub fn build_windows(raw_events: &[RawEvent]) -> WindowBatch {
    let mut batch = WindowBatch::default();
    for raw in raw_events {
        match EventWindow::from_raw(raw) {
            Ok(window) => {
                debug!(
                    summary = %window.summary,
                    start = %window.start,
                    end = %window.end,
                    "parsed event"
                );
                batch.windows.push(window);
            }
            Err(e) => {
                warn!(
                    summary = raw.summary.as_deref().unwrap_or(UNTITLED),
                    error = %e,
                    "skipping event"
                );
                batch.skipped += 1;
            }
        }
    }
    batch
}
