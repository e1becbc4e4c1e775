//! Stand-ins for the light and the screen when running on a desktop.

use std::io::Write;

use meetlight_core::error::ActuatorError;
use meetlight_core::proximity::{DisplayRow, Rgb, OFF};
use meetlight_core::{Indicator, Renderer};
use tracing::debug;

pub const NO_MORE_MEETINGS: &str = "No more meetings today";

/// Prints a line whenever the color or brightness actually changes.
#[derive(Default)]
pub struct TerminalIndicator {
    held: bool,
    color: Option<Rgb>,
    brightness: Option<u8>,
}

impl TerminalIndicator {
    fn color_label(color: Rgb) -> &'static str {
        match color {
            (255, 0, 0) => "red",
            (255, 255, 0) => "yellow",
            (0, 255, 0) => "green",
            OFF => "off",
            _ => "custom",
        }
    }

    fn ensure_held(&self) -> Result<(), ActuatorError> {
        if self.held {
            Ok(())
        } else {
            Err(ActuatorError::NotAcquired)
        }
    }
}

impl Indicator for TerminalIndicator {
    fn acquire(&mut self) -> Result<(), ActuatorError> {
        self.held = true;
        debug!("terminal indicator acquired");
        Ok(())
    }

    fn release(&mut self) -> Result<(), ActuatorError> {
        self.held = false;
        self.color = None;
        self.brightness = None;
        Ok(())
    }

    fn set_color(&mut self, colors: &[Rgb], _immediate: bool) -> Result<(), ActuatorError> {
        let color = colors.first().copied().unwrap_or(OFF);
        // Turning off must work even when the hold was never taken.
        if color != OFF {
            self.ensure_held()?;
        }
        if self.color != Some(color) {
            let (r, g, b) = color;
            let mut out = std::io::stdout().lock();
            writeln!(out, "light: {} ({r}, {g}, {b})", Self::color_label(color))?;
            self.color = Some(color);
        }
        Ok(())
    }

    fn set_brightness(&mut self, percent: u8) -> Result<(), ActuatorError> {
        self.ensure_held()?;
        if self.brightness != Some(percent) {
            debug!(percent, "brightness");
            self.brightness = Some(percent);
        }
        Ok(())
    }
}

/// Writes one line per row, or the fallback line when there is nothing left.
pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl TerminalRenderer<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self {
            out: std::io::stdout(),
        }
    }
}

impl<W: Write> TerminalRenderer<W> {
    #[cfg(test)]
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn write_rows(&mut self, rows: &[DisplayRow]) -> std::io::Result<()> {
        writeln!(self.out, "----")?;
        if rows.is_empty() {
            writeln!(self.out, "{NO_MORE_MEETINGS}")?;
        }
        for row in rows {
            writeln!(self.out, "{}  {}", row.summary, row.countdown)?;
        }
        self.out.flush()
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, rows: &[DisplayRow]) {
        if let Err(e) = self.write_rows(rows) {
            tracing::warn!(error = %e, "failed to render rows");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(rows: &[DisplayRow]) -> String {
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.render(rows);
        String::from_utf8(renderer.out).unwrap()
    }

    #[test]
    fn empty_rows_show_fallback() {
        assert_eq!(rendered(&[]), "----\nNo more meetings today\n");
    }

    #[test]
    fn rows_are_listed_in_order() {
        let rows = [
            DisplayRow {
                summary: "Standup".into(),
                countdown: "in 5m".into(),
            },
            DisplayRow {
                summary: "Untitled".into(),
                countdown: "ongoing".into(),
            },
        ];
        assert_eq!(rendered(&rows), "----\nStandup  in 5m\nUntitled  ongoing\n");
    }

    #[test]
    fn color_requires_hold_but_off_does_not() {
        let mut light = TerminalIndicator::default();
        assert!(matches!(
            light.set_color(&[(255, 0, 0)], true),
            Err(ActuatorError::NotAcquired)
        ));
        assert!(light.set_color(&[OFF], true).is_ok());

        light.acquire().unwrap();
        light.set_color(&[(0, 255, 0)], true).unwrap();
        assert_eq!(light.color, Some((0, 255, 0)));
        light.set_brightness(100).unwrap();
        light.release().unwrap();
        assert!(light.color.is_none());
    }
}
