//! Meeting monitor implementation.
//!
//! The monitor is a tick-driven state machine. It does not use internal
//! threads or timers - the host calls the three lifecycle hooks and decides
//! the cadence.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Stopped
//!   \________________^
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut monitor = MeetingMonitor::new(provider, indicator, renderer, settings);
//! monitor.on_start();
//! // Every ~60 seconds:
//! monitor.on_foreground_tick();
//! // On shutdown:
//! monitor.on_stop();
//! ```
//!
//! Each hook runs: fetch (if due) -> normalize -> evaluate -> render ->
//! indicator. No error escapes a hook; failures become log lines and
//! [`Event`]s, and the tick carries on with the last good data.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::MonitorSettings;
use crate::calendar::{build_windows, EventWindow, TimePoint};
use crate::clock::{Clock, SystemClock};
use crate::events::Event;
use crate::integrations::{EventProvider, Indicator, Renderer};
use crate::proximity::{evaluate, AlertState, Evaluation, OFF};
use crate::scheduler::RefreshScheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorState {
    Idle,
    Running,
    Stopped,
}

/// Owns everything that survives between ticks: the current event set,
/// the last successful fetch time and the indicator hold.
pub struct MeetingMonitor<P, I, R, C = SystemClock> {
    provider: P,
    indicator: I,
    renderer: R,
    clock: C,
    settings: MonitorSettings,
    scheduler: RefreshScheduler,
    state: MonitorState,
    /// Windows from the last successful fetch.
    windows: Vec<EventWindow>,
    /// Alert level from the last evaluation.
    last_alert: Option<AlertState>,
    indicator_held: bool,
}

impl<P, I, R> MeetingMonitor<P, I, R, SystemClock>
where
    P: EventProvider,
    I: Indicator,
    R: Renderer,
{
    pub fn new(provider: P, indicator: I, renderer: R, settings: MonitorSettings) -> Self {
        Self::with_clock(provider, indicator, renderer, SystemClock, settings)
    }
}

impl<P, I, R, C> MeetingMonitor<P, I, R, C>
where
    P: EventProvider,
    I: Indicator,
    R: Renderer,
    C: Clock,
{
    pub fn with_clock(
        provider: P,
        indicator: I,
        renderer: R,
        clock: C,
        settings: MonitorSettings,
    ) -> Self {
        Self {
            provider,
            indicator,
            renderer,
            clock,
            scheduler: RefreshScheduler::new(settings.refresh_interval_secs),
            settings,
            state: MonitorState::Idle,
            windows: Vec::new(),
            last_alert: None,
            indicator_held: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> MonitorState {
        self.state
    }

    pub fn windows(&self) -> &[EventWindow] {
        &self.windows
    }

    pub fn last_alert(&self) -> Option<AlertState> {
        self.last_alert
    }

    pub fn last_fetch(&self) -> Option<TimePoint> {
        self.scheduler.last_fetch()
    }

    pub fn indicator_held(&self) -> bool {
        self.indicator_held
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn indicator(&self) -> &I {
        &self.indicator
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Evaluate the held events at the current time without touching any sink.
    pub fn evaluation(&self) -> Evaluation {
        evaluate(self.clock.now(), &self.windows, &self.settings.proximity)
    }

    // ── Lifecycle hooks ──────────────────────────────────────────────

    /// Acquire the indicator, pull events and show the first result.
    pub fn on_start(&mut self) -> Vec<Event> {
        let now = self.clock.now();
        let mut events = Vec::new();

        match self.state {
            MonitorState::Running => {
                debug!("monitor already running");
                return events;
            }
            MonitorState::Idle | MonitorState::Stopped => {}
        }

        info!(provider = self.provider.name(), "monitor starting");
        self.state = MonitorState::Running;
        events.push(Event::MonitorStarted { at: now });

        self.ensure_acquired(now, &mut events);
        self.refresh(now, &mut events);
        self.present(now, &mut events);
        events
    }

    /// Call periodically. Re-fetches when the throttle allows and
    /// re-evaluates every time.
    pub fn on_foreground_tick(&mut self) -> Vec<Event> {
        let now = self.clock.now();
        let mut events = Vec::new();

        if self.state != MonitorState::Running {
            debug!(state = ?self.state, "tick ignored");
            return events;
        }

        self.ensure_acquired(now, &mut events);
        self.refresh(now, &mut events);
        self.present(now, &mut events);
        events
    }

    /// Turn the indicator off and release it. Safe to call more than once.
    pub fn on_stop(&mut self) -> Vec<Event> {
        let now = self.clock.now();
        let mut events = Vec::new();

        if self.state == MonitorState::Stopped {
            return events;
        }

        if let Err(e) = self.indicator.set_color(&[OFF], true) {
            warn!(error = %e, "failed to turn indicator off");
            events.push(Event::IndicatorFailed {
                reason: e.to_string(),
                at: now,
            });
        }
        if self.indicator_held {
            if let Err(e) = self.indicator.release() {
                warn!(error = %e, "failed to release indicator");
                events.push(Event::IndicatorFailed {
                    reason: e.to_string(),
                    at: now,
                });
            }
            self.indicator_held = false;
        }

        self.state = MonitorState::Stopped;
        self.last_alert = None;
        info!("monitor stopped");
        events.push(Event::MonitorStopped { at: now });
        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn ensure_acquired(&mut self, now: TimePoint, events: &mut Vec<Event>) {
        if self.indicator_held {
            return;
        }
        match self.indicator.acquire() {
            Ok(()) => self.indicator_held = true,
            Err(e) => {
                warn!(error = %e, "indicator unavailable");
                events.push(Event::IndicatorFailed {
                    reason: e.to_string(),
                    at: now,
                });
            }
        }
    }

    /// Replace the event set if a fetch is due and succeeds. On failure the
    /// previous set stays and `last_fetch` does not move.
    fn refresh(&mut self, now: TimePoint, events: &mut Vec<Event>) {
        if !self.scheduler.is_due(now) {
            if let Some(last_fetch) = self.scheduler.last_fetch() {
                events.push(Event::FetchSkipped { last_fetch, at: now });
            }
            return;
        }

        match self.provider.fetch() {
            Ok(raw) => {
                let batch = build_windows(&raw);
                info!(
                    accepted = batch.windows.len(),
                    skipped = batch.skipped,
                    "events refreshed"
                );
                events.push(Event::FetchCompleted {
                    accepted: batch.windows.len(),
                    skipped: batch.skipped,
                    at: now,
                });
                self.windows = batch.windows;
                self.scheduler.record_success(now);
            }
            Err(e) => {
                warn!(
                    provider = self.provider.name(),
                    error = %e,
                    held = self.windows.len(),
                    "fetch failed, keeping previous events"
                );
                events.push(Event::FetchFailed {
                    reason: e.to_string(),
                    at: now,
                });
            }
        }
    }

    fn present(&mut self, now: TimePoint, events: &mut Vec<Event>) {
        let evaluation = evaluate(now, &self.windows, &self.settings.proximity);

        self.renderer.render(&evaluation.rows);
        events.push(Event::Rendered {
            rows: evaluation.rows.len(),
            at: now,
        });

        let alert = evaluation.alert;
        if self.last_alert != Some(alert) {
            info!(from = ?self.last_alert, to = %alert, color = alert.color_name(), "alert changed");
            events.push(Event::AlertChanged {
                from: self.last_alert,
                to: alert,
                at: now,
            });
            self.last_alert = Some(alert);
        }

        self.show(alert, now, events);
    }

    /// Re-sent every tick; the indicator treats repeats as no-ops.
    fn show(&mut self, alert: AlertState, now: TimePoint, events: &mut Vec<Event>) {
        if !self.indicator_held {
            return;
        }
        let result = self
            .indicator
            .set_color(&[alert.color()], true)
            .and_then(|()| self.indicator.set_brightness(self.settings.brightness));
        if let Err(e) = result {
            warn!(error = %e, alert = %alert, "failed to drive indicator");
            events.push(Event::IndicatorFailed {
                reason: e.to_string(),
                at: now,
            });
        }
    }
}
