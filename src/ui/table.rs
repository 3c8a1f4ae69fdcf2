use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{REQUIRED_COLUMNS, StationTable};
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// Data page: the loaded table as-is
// ---------------------------------------------------------------------------

pub fn data_page(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        panels::no_data(ui);
        return;
    };

    ui.heading("My Data");
    if let Some(source) = &state.source {
        ui.label(RichText::new(format!("{} stations from {}", table.len(), source.display())).italics());
    }
    ui.add_space(6.0);
    station_table(ui, table);
}

fn station_table(ui: &mut Ui, table: &StationTable) {
    let mut builder = TableBuilder::new(ui)
        .id_salt("station_table")
        .striped(true)
        .resizable(true);
    for _ in 0..REQUIRED_COLUMNS.len() - 1 {
        builder = builder.column(Column::auto().at_least(60.0));
    }
    builder
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for name in REQUIRED_COLUMNS {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, table.len(), |mut row| {
                let r = &table.records[row.index()];
                let cells = [
                    r.station_name.clone(),
                    r.prefecture.clone(),
                    r.company.clone(),
                    r.line.clone(),
                    r.year.to_string(),
                    format!("{:.4}", r.longitude),
                    format!("{:.4}", r.latitude),
                    format!("{:.1}", r.distance_km),
                ];
                for cell in cells {
                    row.col(|ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}
