//! Meeting monitor: the lifecycle that ties fetch, evaluation and output together.

mod engine;

pub use engine::{MeetingMonitor, MonitorState};

use serde::{Deserialize, Serialize};

use crate::proximity::{ProximityConfig, DEFAULT_BRIGHTNESS};
use crate::scheduler::DEFAULT_INTERVAL_SECS;
use crate::storage::Config;

/// The slice of [`Config`] the monitor reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorSettings {
    pub proximity: ProximityConfig,
    pub refresh_interval_secs: i64,
    pub brightness: u8,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            proximity: ProximityConfig::default(),
            refresh_interval_secs: DEFAULT_INTERVAL_SECS,
            brightness: DEFAULT_BRIGHTNESS,
        }
    }
}

impl From<&Config> for MonitorSettings {
    fn from(config: &Config) -> Self {
        Self {
            proximity: config.proximity,
            refresh_interval_secs: config.refresh.interval_secs,
            brightness: config.indicator.brightness,
        }
    }
}
