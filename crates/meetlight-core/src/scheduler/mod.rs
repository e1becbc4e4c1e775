//! Fetch throttling.
//!
//! A fetch is due once `interval_secs` have passed since the last
//! *successful* fetch. A negative gap means the clock went backwards
//! (e.g. an NTP resync on a device that booted at the epoch); that also
//! counts as due, otherwise refreshing would stall until the clock caught up.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::TimePoint;

pub const DEFAULT_INTERVAL_SECS: i64 = 60;

/// `now - last >= interval` or `now - last < 0`.
pub fn is_fetch_due(now: TimePoint, last: TimePoint, interval_secs: i64) -> bool {
    let elapsed = now - last;
    elapsed >= interval_secs || elapsed < 0
}

/// Owns the last successful fetch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshScheduler {
    interval_secs: i64,
    /// `None` until the first successful fetch.
    last_fetch: Option<TimePoint>,
}

impl RefreshScheduler {
    pub fn new(interval_secs: i64) -> Self {
        Self {
            interval_secs,
            last_fetch: None,
        }
    }

    pub fn interval_secs(&self) -> i64 {
        self.interval_secs
    }

    pub fn last_fetch(&self) -> Option<TimePoint> {
        self.last_fetch
    }

    pub fn is_due(&self, now: TimePoint) -> bool {
        let due = match self.last_fetch {
            Some(last) => is_fetch_due(now, last, self.interval_secs),
            None => true,
        };
        debug!(now = %now, last = ?self.last_fetch, due, "fetch due check");
        due
    }

    /// The only way `last_fetch` moves. Failed fetches must not call this.
    pub fn record_success(&mut self, now: TimePoint) {
        self.last_fetch = Some(now);
    }
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tp(secs: i64) -> TimePoint {
        TimePoint::from_unix(secs)
    }

    #[test]
    fn due_after_interval() {
        assert!(is_fetch_due(tp(1_100), tp(1_000), 60));
        assert!(is_fetch_due(tp(1_060), tp(1_000), 60));
    }

    #[test]
    fn not_due_within_interval() {
        assert!(!is_fetch_due(tp(1_030), tp(1_000), 60));
        assert!(!is_fetch_due(tp(1_000), tp(1_000), 60));
        assert!(!is_fetch_due(tp(1_059), tp(1_000), 60));
    }

    #[test]
    fn due_after_backward_clock_jump() {
        assert!(is_fetch_due(tp(900), tp(1_000), 60));
        assert!(is_fetch_due(tp(999), tp(1_000), 60));
    }

    #[test]
    fn extreme_gaps_do_not_overflow() {
        assert!(is_fetch_due(tp(i64::MIN), tp(1_000), 60));
        assert!(is_fetch_due(tp(i64::MAX), tp(-1_000), 60));
        assert!(is_fetch_due(tp(i64::MAX), tp(i64::MIN), 60));
    }

    #[test]
    fn first_check_is_always_due() {
        let scheduler = RefreshScheduler::default();
        assert!(scheduler.is_due(tp(0)));
        assert_eq!(scheduler.last_fetch(), None);
    }

    #[test]
    fn only_success_moves_last_fetch() {
        let mut scheduler = RefreshScheduler::new(60);
        scheduler.record_success(tp(1_000));
        assert!(!scheduler.is_due(tp(1_030)));
        // A failed fetch at 1_060 records nothing, so 1_061 is still due.
        assert!(scheduler.is_due(tp(1_060)));
        assert!(scheduler.is_due(tp(1_061)));
        scheduler.record_success(tp(1_061));
        assert!(!scheduler.is_due(tp(1_062)));
        assert_eq!(scheduler.last_fetch(), Some(tp(1_061)));
    }

    proptest! {
        #[test]
        fn due_iff_outside_window(last in -1_000_000i64..1_000_000, delta in -10_000i64..10_000, interval in 1i64..3_600) {
            let due = is_fetch_due(tp(last + delta), tp(last), interval);
            prop_assert_eq!(due, delta < 0 || delta >= interval);
        }
    }
}
