mod app;
mod color;
mod ui;

use app::BreweryDashboardApp;
use brewery_dashboard::config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::load();
    log::debug!("Starting with {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Brewery Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(BreweryDashboardApp::new(cc, config)))),
    )
}
