use anyhow::Context;
use eframe::egui;
use env_logger::Builder;
use log::{LevelFilter, info};

use crate::config::ViewerConfig;
use crate::trace::TraceView;
use crate::trace::loader::load_trace;
use crate::ui::AppState;

mod config;
mod trace;
mod ui;

fn main() -> anyhow::Result<()> {
    // Logging setup
    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter(Some("paxos_trace_viewer"), LevelFilter::Debug)
        .init();

    info!("Starting up");

    let config = ViewerConfig::load_or_default().map_err(anyhow::Error::msg)?;

    // A CLI argument wins over the config file; with neither, the UI opens a
    // file dialog on the first frame.
    let events_path = std::env::args().nth(1).or_else(|| config.events_file.clone());

    // With an explicit path a load failure is fatal at startup; the dialog
    // path surfaces failures as an alert instead.
    let view = match &events_path {
        Some(path) => {
            let trace = load_trace(path).with_context(|| format!("Failed to load event log {}", path))?;
            Some(TraceView::build(trace, &config))
        }
        None => None,
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Paxos Trace Viewer",
        native_options,
        Box::new(move |cc| Ok(Box::new(AppState::new(config, view, cc.storage)))),
    )
    .map_err(|e| anyhow::anyhow!("UI error: {}", e))?;

    Ok(())
}
