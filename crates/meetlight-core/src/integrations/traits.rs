use crate::calendar::RawEvent;
use crate::error::{ActuatorError, FetchError};
use crate::proximity::{DisplayRow, Rgb};

/// Supplies the raw events for one evaluation cycle.
/// Authentication and headers are the provider's business.
pub trait EventProvider {
    /// Short identifier used in logs (e.g. "http", "file").
    fn name(&self) -> &str;

    /// One blocking call. No retry: a failure is reported and the monitor
    /// tries again on a later tick.
    fn fetch(&mut self) -> Result<Vec<RawEvent>, FetchError>;
}

/// The ambient light (or whatever stands in for it).
pub trait Indicator {
    /// Take exclusive hold of the device.
    fn acquire(&mut self) -> Result<(), ActuatorError>;

    /// Give the device back. Only called on stop.
    fn release(&mut self) -> Result<(), ActuatorError>;

    /// Show `colors`; `immediate` skips any fade the device supports.
    fn set_color(&mut self, colors: &[Rgb], immediate: bool) -> Result<(), ActuatorError>;

    /// 0..=100.
    fn set_brightness(&mut self, percent: u8) -> Result<(), ActuatorError>;
}

/// Draws the upcoming-meeting list. Owns all layout, including what to show
/// when `rows` is empty.
pub trait Renderer {
    fn render(&mut self, rows: &[DisplayRow]);
}

impl<T: EventProvider + ?Sized> EventProvider for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(&mut self) -> Result<Vec<RawEvent>, FetchError> {
        (**self).fetch()
    }
}

impl<T: Indicator + ?Sized> Indicator for Box<T> {
    fn acquire(&mut self) -> Result<(), ActuatorError> {
        (**self).acquire()
    }

    fn release(&mut self) -> Result<(), ActuatorError> {
        (**self).release()
    }

    fn set_color(&mut self, colors: &[Rgb], immediate: bool) -> Result<(), ActuatorError> {
        (**self).set_color(colors, immediate)
    }

    fn set_brightness(&mut self, percent: u8) -> Result<(), ActuatorError> {
        (**self).set_brightness(percent)
    }
}

impl<T: Renderer + ?Sized> Renderer for Box<T> {
    fn render(&mut self, rows: &[DisplayRow]) {
        (**self).render(rows)
    }
}
