#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod config;
mod engine;
mod model;
mod ui;

use config::AppSettings;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings_path = AppSettings::default_path();
    let settings = AppSettings::load_or_default(&settings_path);
    if !settings_path.exists() {
        // First run: leave an editable copy of the defaults behind.
        if let Err(err) = settings.save_to(&settings_path) {
            tracing::warn!(%err, "could not write default settings");
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([900.0, 480.0])
            .with_title("Week Planner"),
        ..Default::default()
    };

    eframe::run_native(
        "Week Planner",
        options,
        Box::new(|cc| Ok(Box::new(app::PlannerApp::new(cc, settings)))),
    )
}
