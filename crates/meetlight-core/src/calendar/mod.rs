//! Calendar event normalization: raw provider records to UTC windows.

mod time_point;
mod window;

pub use time_point::TimePoint;
pub use window::{build_windows, EventWindow, RawEvent, RawEventTime, WindowBatch, UNTITLED};
