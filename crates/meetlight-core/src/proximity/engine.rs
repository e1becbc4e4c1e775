//! Meeting proximity evaluation.
//!
//! Two independent passes over the same windows:
//!
//! - the alert scan walks windows in the order given and stops at the first
//!   one that is in progress or about to start,
//! - the row selection keeps windows that have not ended yet, again in the
//!   order given, up to a fixed limit.
//!
//! Neither pass sorts. A provider that returns events out of chronological
//! order can make a later, less urgent meeting win the alert scan; callers
//! that care should sort by start time first.

use serde::{Deserialize, Serialize};

use super::alert::AlertState;
use super::countdown::Countdown;
use crate::calendar::{EventWindow, TimePoint};

pub const DEFAULT_SOON_THRESHOLD_SECS: i64 = 300;
pub const DEFAULT_MAX_ROWS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProximityConfig {
    /// A meeting starting within this many seconds is `Soon`.
    pub soon_threshold_secs: i64,
    /// Maximum number of display rows.
    pub max_rows: usize,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            soon_threshold_secs: DEFAULT_SOON_THRESHOLD_SECS,
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

/// One line on the display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub summary: String,
    pub countdown: String,
}

/// Result of one proximity evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub alert: AlertState,
    /// Upcoming meetings. Empty (never absent) when nothing is left today.
    pub rows: Vec<DisplayRow>,
}

pub fn evaluate(now: TimePoint, windows: &[EventWindow], config: &ProximityConfig) -> Evaluation {
    Evaluation {
        alert: alert_state(now, windows, config.soon_threshold_secs),
        rows: display_rows(now, windows, config.max_rows),
    }
}

/// First window in progress wins `Active`, first one starting within
/// `(0, soon_threshold_secs]` wins `Soon`, whichever comes first.
pub fn alert_state(now: TimePoint, windows: &[EventWindow], soon_threshold_secs: i64) -> AlertState {
    for window in windows {
        if window.contains(now) {
            return AlertState::Active;
        }
        let lead = now.seconds_until(window.start);
        if lead > 0 && lead <= soon_threshold_secs {
            return AlertState::Soon;
        }
    }
    AlertState::None
}

/// Up to `max_rows` windows that end after `now`, in input order.
pub fn display_rows(now: TimePoint, windows: &[EventWindow], max_rows: usize) -> Vec<DisplayRow> {
    windows
        .iter()
        .filter(|w| w.ends_after(now))
        .take(max_rows)
        .map(|w| DisplayRow {
            summary: w.summary.clone(),
            countdown: Countdown::between(now, w.start).to_string(),
        })
        .collect()
}
