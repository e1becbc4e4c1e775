use serde::{Deserialize, Serialize};

use crate::calendar::TimePoint;
use crate::proximity::AlertState;

/// Every lifecycle hook reports what it did as a list of Events.
/// The host may log them, print them, or ignore them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    MonitorStarted {
        at: TimePoint,
    },
    /// Provider answered; `skipped` records did not parse.
    FetchCompleted {
        accepted: usize,
        skipped: usize,
        at: TimePoint,
    },
    /// Throttled: the last successful fetch is still fresh.
    FetchSkipped {
        last_fetch: TimePoint,
        at: TimePoint,
    },
    /// Provider failed; the previous events are still in use.
    FetchFailed {
        reason: String,
        at: TimePoint,
    },
    /// `from` is `None` for the first evaluation after start.
    AlertChanged {
        from: Option<AlertState>,
        to: AlertState,
        at: TimePoint,
    },
    Rendered {
        rows: usize,
        at: TimePoint,
    },
    IndicatorFailed {
        reason: String,
        at: TimePoint,
    },
    MonitorStopped {
        at: TimePoint,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = Event::AlertChanged {
            from: Some(AlertState::None),
            to: AlertState::Soon,
            at: TimePoint::from_unix(42),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "alert_changed", "from": "none", "to": "soon", "at": 42})
        );
    }
}
