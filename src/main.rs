//! Water Level Monitor - Tank sensor CSV dashboard
//!
//! Loads potentiometer readings exported by the ESP32 logger and shows
//! charts, summary statistics and threshold filters.

mod charts;
mod config;
mod dashboard;
mod data;
mod gui;
mod sensor;
mod stats;

use config::DashboardConfig;
use eframe::egui;
use gui::WaterLevelApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = DashboardConfig::default();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size)
            .with_title("Monitoreo de Nivel de Agua - Tanque Principal"),
        ..Default::default()
    };

    log::info!("Starting water level dashboard");

    // Run the application
    eframe::run_native(
        "Monitoreo de Nivel de Agua",
        options,
        Box::new(|cc| Ok(Box::new(WaterLevelApp::new(cc, config)))),
    )
}
