mod app;
mod config;
mod error;
mod keymap;
mod pump;
mod ui;

use std::sync::mpsc;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use lap_core::MonotonicClock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::app::{spawn_input_thread, TimerApp};
use crate::config::{ensure_parent_dir, AppConfig, CliArgs};

const APP_NAME: &str = "lapwatch";

// The terminal belongs to the UI, so records only ever go to the log file.
fn init_logging(config: &AppConfig) -> Result<()> {
    let from_env = EnvFilter::try_from_default_env().ok();
    let env_override = from_env.is_some();
    let filter = from_env.unwrap_or_else(|| EnvFilter::new(config.log_level.to_string()));

    let Some(log_path) = config.effective_log_path() else {
        return Ok(());
    };
    ensure_parent_dir(&log_path)?;
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false);

    // Also bridges `log` records into the subscriber
    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    if !env_override {
        log::set_max_level(config.log_level.to_level_filter());
    }
    log::info!("logging to {}", log_path.display());
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let config = AppConfig::load(CliArgs::parse())?;
    init_logging(&config)?;
    log::info!(
        "{} {} starting, tick {} ms",
        APP_NAME,
        env!("CARGO_PKG_VERSION"),
        config.tick_ms
    );

    let (events_tx, events_rx) = mpsc::channel();
    let app = TimerApp::new(&config, Arc::new(MonotonicClock::new()), events_tx.clone());
    spawn_input_thread(events_tx);

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal, events_rx);
    ratatui::restore();

    Ok(result?)
}
