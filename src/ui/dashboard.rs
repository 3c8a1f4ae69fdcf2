use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, Size, StripBuilder, TableBuilder};
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::color::ACCENT;
use crate::dashboard::{DashboardSummary, Metrics, summarize};
use crate::data::filter::YearRange;
use crate::state::AppState;
use crate::ui::{panels, plot, shapes};

// ---------------------------------------------------------------------------
// Dashboard page: filter + metrics | column map | rankings
// ---------------------------------------------------------------------------

pub fn dashboard_page(ui: &mut Ui, state: &mut AppState) {
    ui.heading(RichText::new("Shinkansen in Japan 🚅").strong());
    ui.add_space(8.0);

    let Some(bounds) = state.table.as_ref().and_then(|t| t.year_bounds()) else {
        panels::no_data(ui);
        return;
    };

    // `set_year_range` snaps to `year_step` and keeps the last year on the grid.
    let mut range = state.year_range;
    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new("Filter by Year").italics());
        ui.add(egui::Slider::new(&mut range.from, bounds.clone()).text("from"));
        ui.add(egui::Slider::new(&mut range.to, bounds.clone()).text("to"));
    });
    state.set_year_range(range);
    ui.add_space(8.0);

    let Some(table) = &state.table else {
        return;
    };
    // Every sub-view below reads this one summary of the narrowed table.
    let summary = summarize(
        table,
        state.year_range,
        state.config.reference_year,
        state.config.top_n,
    );
    let banner = state.config.banner_image.as_deref();

    StripBuilder::new(ui)
        .size(Size::relative(0.19))
        .size(Size::relative(0.56))
        .size(Size::remainder())
        .horizontal(|mut strip| {
            strip.cell(|ui: &mut Ui| {
                egui::ScrollArea::vertical()
                    .id_salt("dashboard_left")
                    .show(ui, |ui: &mut Ui| left_column(ui, &summary));
            });
            strip.cell(|ui: &mut Ui| {
                egui::ScrollArea::vertical()
                    .id_salt("dashboard_centre")
                    .show(ui, |ui: &mut Ui| centre_column(ui, &summary, banner));
            });
            strip.cell(|ui: &mut Ui| {
                egui::ScrollArea::vertical()
                    .id_salt("dashboard_right")
                    .show(ui, |ui: &mut Ui| right_column(ui, &summary));
            });
        });
}

fn metric(ui: &mut Ui, label: &str, value: usize, delta: Option<i64>) {
    ui.group(|ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new(label).italics());
        ui.label(RichText::new(value.to_string()).size(28.0));
        if let Some(delta) = delta {
            let (arrow, color) = match delta {
                d if d > 0 => ("↑", Color32::from_rgb(0x09, 0xab, 0x3b)),
                d if d < 0 => ("↓", Color32::from_rgb(0xff, 0x2b, 0x2b)),
                _ => ("", Color32::GRAY),
            };
            ui.label(RichText::new(format!("{arrow} {}", delta.abs())).color(color));
        }
    });
}

fn left_column(ui: &mut Ui, summary: &DashboardSummary) {
    let Metrics {
        stations,
        station_delta,
        lines,
        companies,
    } = summary.metrics;
    metric(ui, "Stations", stations, Some(station_delta));
    metric(ui, "Train Lines", lines, None);
    metric(ui, "Companies", companies, None);

    ui.add_space(8.0);
    ui.label(RichText::new("Stations Per Company").italics());
    shapes::pie(ui, &summary.company_share, 150.0);
}

fn centre_column(ui: &mut Ui, summary: &DashboardSummary, banner: Option<&std::path::Path>) {
    match &summary.columns {
        Ok(layer) => plot::column_plot(ui, layer, "dashboard_columns", 420.0),
        Err(e) => {
            let YearRange { from, to } = summary.range;
            ui.label(format!("No stations opened between {from} and {to}: {e}"));
        }
    }
    if let Some(path) = banner {
        ui.add_space(8.0);
        shapes::banner(ui, path);
    }
}

fn right_column(ui: &mut Ui, summary: &DashboardSummary) {
    ui.label(RichText::new("Top Prefectures").italics().size(18.0));
    TableBuilder::new(ui)
        .id_salt("top_prefectures")
        .striped(true)
        .vscroll(false)
        .column(Column::remainder())
        .column(Column::auto())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Prefecture");
            });
            header.col(|ui| {
                ui.strong("# of Stations");
            });
        })
        .body(|mut body| {
            for (prefecture, count) in &summary.top_prefectures {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(prefecture);
                    });
                    row.col(|ui| {
                        ui.label(count.to_string());
                    });
                });
            }
        });

    ui.add_space(8.0);
    ui.label(RichText::new("Stations Per Year").italics().size(18.0));
    if summary.stations_per_year.is_empty() {
        ui.label("No stations opened in this range.");
        return;
    }
    let points: Vec<[f64; 2]> = summary
        .stations_per_year
        .iter()
        .map(|&(year, n)| [year as f64, n as f64])
        .collect();
    Plot::new("dashboard_per_year")
        .height(220.0)
        .x_axis_label("Year Opened")
        .y_axis_label("Number of Stations")
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(PlotPoints::from(points)).name("Stations").color(ACCENT));
        });
}
