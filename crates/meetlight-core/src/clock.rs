//! Source of "now" for the monitor.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

use crate::calendar::TimePoint;

pub trait Clock {
    fn now(&self) -> TimePoint;
}

/// Wall clock. Can jump backwards when the host resyncs its time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> TimePoint {
        TimePoint::from(Utc::now())
    }
}

/// A clock that only moves when told to. Used by `check --now` and tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    secs: AtomicI64,
}

impl ManualClock {
    pub fn new(now: TimePoint) -> Self {
        Self {
            secs: AtomicI64::new(now.as_unix()),
        }
    }

    pub fn set(&self, now: TimePoint) {
        self.secs.store(now.as_unix(), Ordering::SeqCst);
    }

    pub fn advance(&self, secs: i64) {
        self.secs.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> TimePoint {
        TimePoint::from_unix(self.secs.load(Ordering::SeqCst))
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> TimePoint {
        (**self).now()
    }
}
