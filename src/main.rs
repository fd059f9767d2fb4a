//! CLI entry point for wattscope.
//!
//! Opens the configured serial port, optionally preloads a previous run's
//! snapshot, and launches the live chart window. The run ends when the
//! window is closed; a final snapshot is written on the way out.
//!
//! # Usage
//!
//! ```bash
//! wattscope                      # live acquisition from the configured port
//! wattscope --file out.json      # preload a previous run, then go live
//! wattscope --config bench       # use config/bench.toml
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};
use std::time::Duration;
use wattscope::acquisition::Acquisition;
use wattscope::config::Settings;
use wattscope::data::series::SeriesStore;
use wattscope::data::snapshot::{Snapshot, Snapshotter};
use wattscope::gui::Gui;
use wattscope::instrument::byte_source::SerialByteSource;

#[derive(Parser)]
#[command(name = "wattscope")]
#[command(about = "Live acquisition and charting for a serial power meter", long_about = None)]
struct Cli {
    /// Snapshot file to preload before live decoding begins
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Config name under config/ (defaults to "default")
    #[arg(long)]
    config: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings =
        Settings::new(cli.config.as_deref()).context("Failed to load configuration")?;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log_level.as_str()),
    )
    .init();

    let store = match &cli.file {
        Some(path) => {
            let store = Snapshot::read(path)
                .and_then(Snapshot::into_store)
                .with_context(|| format!("Failed to preload snapshot '{}'", path.display()))?;
            info!(
                "Preloaded {} samples from '{}'",
                store.len(),
                path.display()
            );
            store
        }
        None => SeriesStore::new(),
    };

    // No data can ever be decoded without the port, so this is fatal.
    let source = SerialByteSource::open(&settings.serial.port, settings.serial.baud_rate)?;
    let snapshotter = Snapshotter::new(Path::new(&settings.storage.output_dir))?;
    let acquisition = Acquisition::new(
        Box::new(source),
        store,
        snapshotter,
        settings.storage.snapshot_every,
    );
    let tick_interval = Duration::from_millis(settings.acquisition.tick_interval_ms);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([900.0, 700.0]),
        ..Default::default()
    };
    eframe::run_native(
        "wattscope",
        options,
        Box::new(move |cc| Ok(Box::new(Gui::new(cc, acquisition, tick_interval)))),
    )
    .map_err(|err| anyhow::anyhow!("GUI error: {err}"))
}
