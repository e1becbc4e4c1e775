use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use meetlight_core::error::{ParseError, Result};
use meetlight_core::integrations::EventProvider;
use meetlight_core::proximity::Rgb;
use meetlight_core::{
    build_windows, evaluate, AlertState, Clock, Config, DisplayRow, FileEventProvider,
    SystemClock, TimePoint,
};

#[derive(Args)]
pub struct CheckArgs {
    /// JSON file holding an event array or an `{"items": [...]}` envelope
    #[arg(long)]
    pub file: PathBuf,
    /// Evaluate at this instant: epoch seconds or "YYYY-MM-DDTHH:MM:SS+HH:MM"
    #[arg(long)]
    pub now: Option<String>,
    /// Override proximity.soon_threshold_secs
    #[arg(long)]
    pub soon_threshold: Option<i64>,
    /// Override proximity.max_rows
    #[arg(long)]
    pub max_rows: Option<usize>,
}

#[derive(Serialize)]
struct CheckReport {
    now: TimePoint,
    alert: AlertState,
    color: Rgb,
    rows: Vec<DisplayRow>,
    accepted: usize,
    skipped: usize,
}

fn parse_now(raw: &str) -> Result<TimePoint, ParseError> {
    match raw.parse::<i64>() {
        Ok(secs) => Ok(TimePoint::from_unix(secs)),
        Err(_) => TimePoint::parse(raw),
    }
}

pub fn run(args: CheckArgs) -> Result<()> {
    let now = match args.now.as_deref() {
        Some(raw) => parse_now(raw)?,
        None => SystemClock.now(),
    };

    // Read-only: an offline check must not create or rewrite the config file.
    let mut config = Config::read()?;
    if let Some(secs) = args.soon_threshold {
        config.proximity.soon_threshold_secs = secs;
    }
    if let Some(rows) = args.max_rows {
        config.proximity.max_rows = rows;
    }
    config.validate()?;
    let proximity = config.proximity;

    let raw = FileEventProvider::new(args.file).fetch()?;
    let batch = build_windows(&raw);
    let evaluation = evaluate(now, &batch.windows, &proximity);

    let report = CheckReport {
        now,
        alert: evaluation.alert,
        color: evaluation.alert.color(),
        rows: evaluation.rows,
        accepted: batch.windows.len(),
        skipped: batch.skipped,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
