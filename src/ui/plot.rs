use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::chart::*;
use crate::ui::shapes;

/// Metres per degree of latitude.
const METRES_PER_DEGREE: f64 = 111_320.0;

// ---------------------------------------------------------------------------
// Chart renderer
// ---------------------------------------------------------------------------

/// Draw a chart description.  `id` must be unique among visible plots.
pub fn render_chart(ui: &mut Ui, chart: &Chart, id: &str) {
    match &chart.body {
        ChartBody::Series(series) => series_plot(ui, chart, series, id),
        ChartBody::Bars(bars) => bar_plot(ui, chart, bars, id),
        ChartBody::Scatter(scatter) => scatter_plot(ui, chart, scatter, id),
        ChartBody::Columns(layer) => column_plot(ui, layer, id, 480.0),
        ChartBody::Graph(graph) => {
            shapes::directed_graph(ui, graph);
            ui.add_space(6.0);
            ui.code(graph.to_dot());
        }
    }
}

fn base_plot<'a>(chart: &Chart, id: &str) -> Plot<'a> {
    Plot::new(id.to_string())
        .height(420.0)
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label.clone())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
}

/// Draw one series: plain line, filled area or line with markers.
pub fn series_plot(ui: &mut Ui, chart: &Chart, series: &Series, id: &str) {
    base_plot(chart, id)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            let line = Line::new(PlotPoints::from(series.points.clone()))
                .name(&series.name)
                .color(series.color);
            match series.style {
                SeriesStyle::Line => plot_ui.line(line.width(1.5)),
                SeriesStyle::Area => plot_ui.line(line.width(1.5).fill(0.0)),
                SeriesStyle::LineWithMarkers(marker) => {
                    plot_ui.line(line.width(2.0));
                    plot_ui.points(
                        Points::new(PlotPoints::from(series.points.clone()))
                            .name(&series.name)
                            .radius(4.0)
                            .color(marker),
                    );
                }
            }
        });
}

fn bar_plot(ui: &mut Ui, chart: &Chart, bars: &[BarDatum], id: &str) {
    let labels: Vec<String> = bars.iter().map(|b| b.label.clone()).collect();
    base_plot(chart, id)
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .show(ui, |plot_ui| {
            let bars = bars
                .iter()
                .enumerate()
                .map(|(i, b)| {
                    Bar::new(i as f64, b.value)
                        .name(&b.label)
                        .fill(b.color)
                        .width(0.7)
                })
                .collect();
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

fn scatter_plot(ui: &mut Ui, chart: &Chart, scatter: &Scatter, id: &str) {
    let mut plot = base_plot(chart, id);
    if scatter.groups.len() > 1 {
        plot = plot.legend(Legend::default());
    }
    if scatter.equal_aspect {
        plot = plot.data_aspect(1.0);
    }
    if !scatter.x_categories.is_empty() {
        let labels = scatter.x_categories.clone();
        plot = plot.x_axis_formatter(move |mark, _range| category_label(&labels, mark.value));
    }

    plot.show(ui, |plot_ui| {
        for group in &scatter.groups {
            plot_ui.points(
                Points::new(PlotPoints::from(group.points.clone()))
                    .name(&group.name)
                    .color(group.color)
                    .radius(3.5),
            );
        }
    });
}

/// Draw the column layer seen from its view state.  Columns are vertical
/// strokes whose on-screen height shrinks as the pitch flattens.
pub fn column_plot(ui: &mut Ui, layer: &ColumnLayer, id: &str, height: f32) {
    let view = layer.view;
    let span = view.half_span_degrees();
    let rise = layer.height_m() / METRES_PER_DEGREE * view.pitch.to_radians().sin();
    let width = (layer.radius / METRES_PER_DEGREE * 40.0) as f32;

    Plot::new(id.to_string())
        .height(height)
        .data_aspect(1.0)
        .include_x(view.longitude - span)
        .include_x(view.longitude + span)
        .include_y(view.latitude - span / 2.0)
        .include_y(view.latitude + span / 2.0)
        .show_axes([false, false])
        .label_formatter(|_name, value| {
            layer
                .nearest(value.x, value.y)
                .map(|c| c.tooltip.clone())
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for column in &layer.columns {
                let [lon, lat] = column.position;
                plot_ui.line(
                    Line::new(PlotPoints::from(vec![[lon, lat], [lon, lat + rise]]))
                        .color(layer.fill)
                        .width(width),
                );
            }
            let bases: Vec<[f64; 2]> = layer.columns.iter().map(|c| c.position).collect();
            plot_ui.points(Points::new(PlotPoints::from(bases)).color(layer.fill).radius(width / 2.0));
        });
}

/// Tick label for a categorical axis: the category at an integer position.
fn category_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_ticks_only_on_whole_positions() {
        let labels = vec!["Tokyo".to_string(), "Aichi".to_string()];
        assert_eq!(category_label(&labels, 1.0), "Aichi");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, -1.0), "");
        assert_eq!(category_label(&labels, 7.0), "");
    }
}
