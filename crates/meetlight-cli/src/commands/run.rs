use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use clap::Args;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use meetlight_core::error::{FetchError, Result};
use meetlight_core::{
    Config, Event, EventProvider, FileEventProvider, HttpEventProvider, MeetingMonitor,
    MonitorSettings,
};

use crate::terminal::{TerminalIndicator, TerminalRenderer};

#[derive(Args)]
pub struct RunArgs {
    /// Read events from a JSON file instead of the configured endpoint
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Override provider.api_url for this run
    #[arg(long)]
    pub api_url: Option<String>,
    /// Override refresh.tick_secs for this run
    #[arg(long)]
    pub tick_secs: Option<u64>,
    /// Stop after this many ticks (the start evaluation is not counted)
    #[arg(long)]
    pub ticks: Option<u64>,
}

enum Command {
    Tick,
    Stop,
}

/// Provider for this run. Built before the runtime starts so a missing or
/// bad endpoint fails immediately, and so the blocking HTTP client is never
/// created on an async worker.
fn build_provider(
    config: &Config,
    file: Option<PathBuf>,
) -> Result<Box<dyn EventProvider + Send>, FetchError> {
    Ok(match file {
        Some(path) => Box::new(FileEventProvider::new(path)),
        None => Box::new(HttpEventProvider::from_config(&config.provider)?),
    })
}

pub fn run(args: RunArgs) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(url) = args.api_url {
        config.provider.api_url = url;
    }
    if let Some(secs) = args.tick_secs {
        config.refresh.tick_secs = secs;
    }
    config.validate()?;

    let provider = build_provider(&config, args.file)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(drive(config, provider, args.ticks))
}

/// Host loop: a timer sends ticks to the monitor thread until Ctrl-C, the
/// tick limit, or the monitor thread exiting, then asks it to stop.
async fn drive(
    config: Config,
    provider: Box<dyn EventProvider + Send>,
    ticks: Option<u64>,
) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    let tick_every = Duration::from_secs(config.refresh.tick_secs);

    // The monitor and its blocking HTTP client live on their own thread.
    let mut worker =
        tokio::task::spawn_blocking(move || monitor_loop(&config, provider, rx));

    let mut interval = tokio::time::interval(tick_every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // First tick fires immediately; on_start already covered it.
    interval.tick().await;

    let mut sent = 0u64;
    let finished = loop {
        if ticks.is_some_and(|limit| sent >= limit) {
            break None;
        }
        tokio::select! {
            _ = interval.tick() => {
                if tx.send(Command::Tick).is_err() {
                    break None;
                }
                sent += 1;
            }
            joined = &mut worker => {
                warn!("monitor thread exited early");
                break Some(joined);
            }
            result = tokio::signal::ctrl_c() => {
                result?;
                info!("interrupt received, stopping");
                break None;
            }
        }
    };

    let _ = tx.send(Command::Stop);
    let joined = match finished {
        Some(joined) => joined,
        None => worker.await,
    };
    joined.map_err(std::io::Error::other)?;
    Ok(())
}

fn monitor_loop(
    config: &Config,
    provider: Box<dyn EventProvider + Send>,
    commands: Receiver<Command>,
) {
    let mut monitor = MeetingMonitor::new(
        provider,
        TerminalIndicator::default(),
        TerminalRenderer::stdout(),
        MonitorSettings::from(config),
    );

    log_events(&monitor.on_start());
    for command in commands.iter() {
        match command {
            Command::Tick => log_events(&monitor.on_foreground_tick()),
            Command::Stop => break,
        }
    }
    log_events(&monitor.on_stop());
}

fn log_events(events: &[Event]) {
    for event in events {
        match serde_json::to_string(event) {
            Ok(json) => debug!(target: "meetlight::events", "{json}"),
            Err(e) => debug!(error = %e, "unserializable event"),
        }
    }
}
