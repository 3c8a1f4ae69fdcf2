use eframe::egui;

use crate::color::NAV_BACKGROUND;
use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{dashboard, panels, table};
use crate::view::Page;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ShinkansenApp {
    pub state: AppState,
}

impl ShinkansenApp {
    /// Build the app and load the configured dataset.  A failed load leaves
    /// the app running with the error in the status bar.
    pub fn new(config: DashboardConfig) -> Self {
        let mut state = AppState::new(config);
        let path = state.config.dataset_path.clone();
        state.load_from(&path);
        Self { state }
    }
}

impl eframe::App for ShinkansenApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: navigation bar ----
        egui::TopBottomPanel::top("top_bar")
            .frame(egui::Frame::side_top_panel(&ctx.style()).fill(NAV_BACKGROUND))
            .show(ctx, |ui| {
                panels::top_bar(ui, &mut self.state);
            });

        // ---- Central panel: the active page ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.page {
            Page::Dashboard => dashboard::dashboard_page(ui, &mut self.state),
            Page::SimpleCharts => panels::chart_page(ui, &mut self.state, Page::SimpleCharts),
            Page::AdvancedCharts => panels::chart_page(ui, &mut self.state, Page::AdvancedCharts),
            Page::Data => table::data_page(ui, &self.state),
        });
    }
}
