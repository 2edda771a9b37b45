//! Epi Dashboard - Validated COVID-19 Dataset Dashboard
//!
//! Loads the dataset once at startup, then opens the dashboard window.

use eframe::egui;
use epi_dashboard::config::DashboardConfig;
use epi_dashboard::data::{DataLoader, DatasetCache};
use epi_dashboard::gui::DashboardApp;
use epi_dashboard::logging::init_logging;
use std::rc::Rc;
use tracing::info;

fn main() -> eframe::Result<()> {
    init_logging();
    let config = DashboardConfig::from_env();
    info!(source = %config.source, "startup");

    // Blocking load; a failure leaves the window with the error only
    let cache = Rc::new(DatasetCache::new(DataLoader::from_config(&config)));
    let app = DashboardApp::load(cache, config.thresholds);

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("COVID-19 Validated Dashboard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Epi Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}
