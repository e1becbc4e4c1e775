//! Meeting proximity: alert level plus countdown rows.

mod alert;
mod countdown;
mod engine;

pub use alert::{AlertState, Rgb, DEFAULT_BRIGHTNESS, OFF};
pub use countdown::Countdown;
pub use engine::{
    alert_state, display_rows, evaluate, DisplayRow, Evaluation, ProximityConfig,
    DEFAULT_MAX_ROWS, DEFAULT_SOON_THRESHOLD_SECS,
};
