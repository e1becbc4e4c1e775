use std::fmt;

use serde::{Deserialize, Serialize};

/// One RGB triple as the indicator expects it.
pub type Rgb = (u8, u8, u8);

/// Indicator color when the monitor is stopped.
pub const OFF: Rgb = (0, 0, 0);

/// Brightness used for every alert level unless configured otherwise.
pub const DEFAULT_BRIGHTNESS: u8 = 100;

/// Urgency of the most relevant meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertState {
    /// Nothing imminent.
    #[default]
    None,
    /// A meeting starts within the warning threshold.
    Soon,
    /// A meeting is in progress.
    Active,
}

impl AlertState {
    pub fn color(self) -> Rgb {
        match self {
            AlertState::None => (0, 255, 0),
            AlertState::Soon => (255, 255, 0),
            AlertState::Active => (255, 0, 0),
        }
    }

    pub fn color_name(self) -> &'static str {
        match self {
            AlertState::None => "green",
            AlertState::Soon => "yellow",
            AlertState::Active => "red",
        }
    }
}

impl fmt::Display for AlertState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AlertState::None => "none",
            AlertState::Soon => "soon",
            AlertState::Active => "active",
        };
        f.write_str(s)
    }
}
