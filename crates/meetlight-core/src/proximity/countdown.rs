use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calendar::TimePoint;

/// Relative time until a meeting starts, in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Countdown {
    /// An hour or more away.
    Hours { hours: i64, minutes: i64 },
    /// Between one and 59 minutes away.
    Minutes { minutes: i64 },
    /// Less than a full minute away, started, or reversed.
    Ongoing,
}

impl Countdown {
    /// Floor the distance to whole minutes, clamped at zero.
    ///
    /// Anything under 60 seconds is `Ongoing`, even if the meeting has not
    /// technically begun yet.
    pub fn between(now: TimePoint, start: TimePoint) -> Self {
        let minutes_until = (start - now).div_euclid(60).max(0);
        if minutes_until >= 60 {
            Countdown::Hours {
                hours: minutes_until / 60,
                minutes: minutes_until % 60,
            }
        } else if minutes_until > 0 {
            Countdown::Minutes {
                minutes: minutes_until,
            }
        } else {
            Countdown::Ongoing
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::Hours { hours, minutes } => write!(f, "in {hours}h {minutes}m"),
            Countdown::Minutes { minutes } => write!(f, "in {minutes}m"),
            Countdown::Ongoing => f.write_str("ongoing"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn countdown(delta: i64) -> String {
        let now = TimePoint::from_unix(1_000);
        Countdown::between(now, now + delta).to_string()
    }

    #[test]
    fn hours_and_minutes() {
        assert_eq!(countdown(3_661), "in 1h 1m");
        assert_eq!(countdown(3_600), "in 1h 0m");
        assert_eq!(countdown(2 * 3_600 + 59 * 60 + 59), "in 2h 59m");
    }

    #[test]
    fn minutes_only() {
        assert_eq!(countdown(60), "in 1m");
        assert_eq!(countdown(3_599), "in 59m");
    }

    #[test]
    fn under_a_minute_reads_ongoing() {
        // 45 seconds floors to zero minutes, which is not "> 0".
        assert_eq!(countdown(45), "ongoing");
        assert_eq!(countdown(0), "ongoing");
    }

    #[test]
    fn started_meetings_are_ongoing() {
        assert_eq!(countdown(-1), "ongoing");
        assert_eq!(countdown(-7_200), "ongoing");
    }
}
