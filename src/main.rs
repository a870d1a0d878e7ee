// src/main.rs
use anyhow::Result;
use eframe::egui;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod analysis;
mod app;
mod config;
mod file;
mod map;
mod state;
mod ui;
mod utils;

use app::DashboardApp;
use config::Settings;
use file::FileManager;

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    // First argument overrides the settings file location.
    let settings_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(Settings::default_path);

    let (settings, settings_error) = match Settings::load(settings_path.as_deref()) {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };
    init_logging(&settings.log_filter);

    let mut startup_errors = Vec::new();
    match (&settings_error, &settings_path) {
        (Some(e), _) => {
            warn!("Using default settings: {:#}", e);
            startup_errors.push(format!("Settings ignored: {:#}", e));
        }
        (None, Some(path)) => info!("Settings from {} and environment", path.display()),
        (None, None) => info!("Settings from environment only"),
    }

    let file_manager = FileManager::new(settings.region_policy);
    let dataset = match file_manager.load_dataset(settings.dataset_path.as_deref()) {
        Ok(dataset) => dataset,
        Err(e) if settings.dataset_path.is_some() => {
            error!("{:#}", e);
            startup_errors.push(format!("Error loading dataset, showing bundled data: {:#}", e));
            file_manager.load_dataset(None)?
        }
        Err(e) => return Err(e),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_title("Startup Atlas"),
        ..Default::default()
    };

    let startup_error = (!startup_errors.is_empty()).then(|| startup_errors.join("\n"));
    eframe::run_native(
        "Startup Atlas",
        options,
        Box::new(move |cc| Box::new(DashboardApp::new(cc, settings, dataset, startup_error))),
    ).map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
