// src/main.rs
use eframe::egui;
use anyhow::{Context, Result};

mod actions;
mod android;
mod app;
mod assessments;
mod config;
mod file;
mod handlers;
mod logging;
mod settings;
mod state;
mod ui;
mod utils;

use app::AssessmentApp;
use settings::Settings;

fn main() -> Result<()> {
    let settings = Settings::load().context("Failed to load settings")?;

    if let Err(e) = logging::init_logging(&settings::log_dir(), &settings.log_level) {
        tracing::warn!(error = %format!("{:#}", e), "file logging unavailable, console only");
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting a11y-insights");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window_width, settings.window_height])
            .with_title("Accessibility Insights"),
        ..Default::default()
    };

    eframe::run_native(
        "a11y-insights",
        options,
        Box::new(move |cc| Box::new(AssessmentApp::new(cc, settings))),
    ).map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
