mod app;
mod config;
mod controller;
mod data;
mod ui;
mod worker;

use anyhow::{Context, Result};
use eframe::egui;

use app::StockPredictorApp;
use config::AppConfig;

fn main() -> Result<()> {
    let config = AppConfig::from_env();

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();
    for warning in &config.warnings {
        tracing::warn!("{}", warning);
    }

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config::WINDOW_SIZE)
            .with_min_inner_size(config::WINDOW_MIN_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        "AI Stock Predictor",
        options,
        Box::new(move |cc| Ok(Box::new(StockPredictorApp::new(cc, &config, handle)?))),
    )
    .map_err(|e| anyhow::anyhow!("Window error: {}", e))?;

    drop(runtime);
    Ok(())
}
