mod app;
mod chart;
mod color;
mod config;
mod dashboard;
mod data;
mod guide;
mod pipeline;
mod state;
mod ui;
mod view;

use app::ShinkansenApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Falling back to default config: {e:#}");
        config::DashboardConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Shinkansen Chart Guide",
        options,
        Box::new(|cc| {
            // Install image loaders so egui can render the banner png/jpg.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(ShinkansenApp::new(config)))
        }),
    )
}
