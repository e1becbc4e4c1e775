//! # Meetlight Core Library
//!
//! This library provides the core logic for a desk-side meeting indicator.
//! It pulls upcoming calendar events, decides whether a meeting is in
//! progress or about to begin, and drives a colored light plus a short
//! list of countdown rows. All operations are available via a standalone
//! CLI binary; any device firmware is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Calendar**: Fixed-offset timestamp normalization and event windows
//! - **Proximity**: Pure evaluation of alert level and display rows
//! - **Scheduler**: Fetch throttling keyed on the last successful fetch
//! - **Monitor**: A tick-driven lifecycle that requires the caller to
//!   invoke `on_foreground_tick()` periodically
//! - **Integrations**: Traits for event providers, indicators and renderers
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`MeetingMonitor`]: Lifecycle state machine
//! - [`TimePoint`]: Normalized epoch-seconds instant
//! - [`evaluate`]: Alert level plus countdown rows for a point in time
//! - [`Config`]: Application configuration management
//! - [`EventProvider`]: Trait for calendar event sources

pub mod calendar;
pub mod clock;
pub mod error;
pub mod events;
pub mod integrations;
pub mod monitor;
pub mod proximity;
pub mod scheduler;
pub mod storage;

pub use calendar::{build_windows, EventWindow, RawEvent, TimePoint, WindowBatch};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ActuatorError, ConfigError, CoreError, FetchError, ParseError};
pub use events::Event;
pub use integrations::{EventProvider, FileEventProvider, HttpEventProvider, Indicator, Renderer};
pub use monitor::{MeetingMonitor, MonitorSettings, MonitorState};
pub use proximity::{evaluate, AlertState, Countdown, DisplayRow, Evaluation, ProximityConfig};
pub use scheduler::RefreshScheduler;
pub use storage::Config;
