use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::guide::{self, Guide, Intro};
use crate::pipeline::build_chart;
use crate::state::AppState;
use crate::ui::plot;
use crate::view::{Page, View};

// ---------------------------------------------------------------------------
// Top bar: file menu and page navigation
// ---------------------------------------------------------------------------

/// Render the top menu / navigation bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        for page in Page::ALL {
            let label = RichText::new(page.label()).strong().color(Color32::BLACK);
            if ui.selectable_label(state.page == page, label).clicked() {
                state.page = page;
            }
        }

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(RichText::new(format!("{} stations loaded", table.len())).color(Color32::BLACK));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open station data")
        .add_filter("Supported files", &["xlsx", "csv", "json", "parquet", "pq"])
        .add_filter("Excel", &["xlsx"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_from(&path);
    }
}

// ---------------------------------------------------------------------------
// Chart pages
// ---------------------------------------------------------------------------

/// A page with a chart-type selector: the intro until a view is picked,
/// then the chart and its guide.
pub fn chart_page(ui: &mut Ui, state: &mut AppState, page: Page) {
    ui.heading("Shinkansen Chart Guide");

    let mut selected = state.view_for(page);
    egui::ComboBox::from_id_salt(page.label())
        .selected_text(selected.map_or("Choose a chart type", View::label))
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut selected, None, "Choose a chart type");
            for view in page.views() {
                ui.selectable_value(&mut selected, Some(*view), view.label());
            }
        });
    if selected != state.view_for(page) {
        state.select_view(page, selected);
    }
    ui.add_space(12.0);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match selected {
            Some(view) => view_with_guide(ui, state, view),
            None => {
                if let Some(intro) = guide::intro(page) {
                    intro_section(ui, &intro);
                }
            }
        });
}

fn view_with_guide(ui: &mut Ui, state: &AppState, view: View) {
    let Some(table) = &state.table else {
        no_data(ui);
        return;
    };

    match build_chart(view, table) {
        Ok(chart) => {
            ui.label(RichText::new(&chart.title).italics().strong().size(18.0));
            plot::render_chart(ui, &chart, view.label());
        }
        Err(e) => {
            ui.label(RichText::new(format!("Cannot draw {view}: {e}")).color(Color32::RED));
        }
    }

    ui.add_space(8.0);
    guide_section(ui, &guide::guide(view));
}

fn guide_section(ui: &mut Ui, guide: &Guide) {
    if let Some(signature) = guide.signature {
        ui.strong("Function Signature");
        ui.code(signature);
    }
    if !guide.parameters.is_empty() {
        ui.strong("Parameters:");
        bullet_list(ui, "parameters", guide.parameters);
        ui.strong("My Code");
    }
    ui.code(guide.code);
}

fn intro_section(ui: &mut Ui, intro: &Intro) {
    ui.label(RichText::new(intro.heading).size(18.0).strong());
    ui.label(RichText::new(intro.summary).italics());
    ui.add_space(6.0);
    ui.strong("Pros:");
    bullet_list(ui, "pros", intro.pros);
    ui.strong("Cons:");
    bullet_list(ui, "cons", intro.cons);

    ui.add_space(12.0);
    ui.label(RichText::new("My Data").size(18.0).strong());
    ui.label(guide::DATA_NOTE);
    ui.code(guide::DATA_CODE);
}

fn bullet_list(ui: &mut Ui, id_salt: &str, items: &[(&str, &str)]) {
    ui.indent(id_salt, |ui: &mut Ui| {
        for (name, text) in items {
            ui.horizontal_wrapped(|ui: &mut Ui| {
                ui.label("•");
                ui.strong(*name);
                ui.label(format!(": {text}"));
            });
        }
    });
}

/// Placeholder shown while no table is loaded.
pub fn no_data(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(40.0);
        ui.heading("Open a station file to begin  (File → Open…)");
        ui.label(format!(
            "Or run `cargo run --bin generate_sample` and restart; ${} picks another startup file.",
            crate::config::DATA_ENV
        ));
    });
}
