//! Tutorial text shown next to each chart.

use crate::view::{Page, View};

/// Signature, parameter notes and the code behind one view.
pub struct Guide {
    pub signature: Option<&'static str>,
    pub parameters: &'static [(&'static str, &'static str)],
    pub code: &'static str,
}

const LINE_PARAMETERS: &[(&str, &str)] = &[
    ("series", "Points to draw, here (year, stations) pairs"),
    ("name", "Legend entry for the series"),
    ("color", "Customize the colour of the line"),
    ("fill", "Fill the area between the line and the given y value"),
    ("width", "Stroke width in points"),
];

const BAR_PARAMETERS: &[(&str, &str)] = &[
    ("bars", "One Bar per category: position, value, fill and name"),
    ("horizontal", "Lay the bars out horizontally"),
    ("width", "Width of every bar in plot units"),
    ("stack_on", "Stack this chart on top of other bar charts"),
    ("color", "Default colour for bars without their own fill"),
];

pub fn guide(view: View) -> Guide {
    match view {
        View::Area => Guide {
            signature: Some("Line::new(series: impl Into<PlotPoints>) -> Line"),
            parameters: LINE_PARAMETERS,
            code: "let counts = count_by_year(&table);\n\
                   let line = Line::new(points).fill(0.0).color(ACCENT);\n\
                   Plot::new(\"area\").x_axis_label(\"Year Opened\").show(ui, |p| p.line(line));",
        },
        View::Bar => Guide {
            signature: Some("BarChart::new(bars: Vec<Bar>) -> BarChart"),
            parameters: BAR_PARAMETERS,
            code: "let counts = count_by_category(&table, Category::Prefecture).sorted_by_count_desc();\n\
                   let bars = counts.iter().enumerate().map(|(i, (p, n))| Bar::new(i as f64, *n as f64).name(p));\n\
                   Plot::new(\"bars\").show(ui, |p| p.bar_chart(BarChart::new(bars.collect())));",
        },
        View::Line => Guide {
            signature: None,
            parameters: &[],
            code: "plot_ui.line(Line::new(points).name(\"Stations\"));",
        },
        View::Scatter => Guide {
            signature: None,
            parameters: &[],
            code: "plot_ui.points(Points::new(points).radius(3.0));",
        },
        View::Map => Guide {
            signature: None,
            parameters: &[],
            code: "Plot::new(\"map\").data_aspect(1.0).show(ui, |p| p.points(Points::new(lon_lat)));",
        },
        View::GroupedScatter => Guide {
            signature: None,
            parameters: &[],
            code: "for group in groups { plot_ui.points(Points::new(group.points).color(group.color).name(&group.name)); }",
        },
        View::CompanyBars => Guide {
            signature: None,
            parameters: &[],
            code: "plot_ui.bar_chart(BarChart::new(bars).element_formatter(Box::new(tooltip)));",
        },
        View::MeanDistance => Guide {
            signature: None,
            parameters: &[],
            code: "let means = mean_by(&table, |r| r.year, |r| r.distance_km, COL_DISTANCE)?;",
        },
        View::PrefectureBars => Guide {
            signature: None,
            parameters: &[],
            code: "let colors = ColorMap::new(prefectures.iter().map(|(p, _)| *p));",
        },
        View::YearlyTrend => Guide {
            signature: None,
            parameters: &[],
            code: "plot_ui.line(Line::new(points.clone()).width(2.0));\n\
                   plot_ui.points(Points::new(points).radius(4.0).color(Color32::RED));",
        },
        View::ColumnLayer => Guide {
            signature: None,
            parameters: &[],
            code: "let layer = ColumnLayer::from_table(&table, fill)?;",
        },
        View::LineNetwork => Guide {
            signature: None,
            parameters: &[],
            code: "let dot = DirectedGraph::line_termini(&table, &colors).to_dot();",
        },
    }
}

/// Pros/cons shown on a chart page before a view is picked.
pub struct Intro {
    pub heading: &'static str,
    pub summary: &'static str,
    pub pros: &'static [(&'static str, &'static str)],
    pub cons: &'static [(&'static str, &'static str)],
}

pub fn intro(page: Page) -> Option<Intro> {
    match page {
        Page::SimpleCharts => Some(Intro {
            heading: "Pros and Cons of Simple Charts",
            summary: "\"Simple charts\" are the plot primitives egui_plot ships with: lines, bars and points.",
            pros: &[
                ("Simplicity", "A chart is a handful of builder calls on data you already have."),
                ("Easy Integration", "Plots live inside the immediate-mode UI and redraw with it every frame."),
                ("Performance", "Drawing goes straight to the GPU-backed painter."),
                ("Low Learning Curve", "The same few types cover most everyday charts."),
            ],
            cons: &[
                ("Limited Customization", "Axis and legend styling is basic."),
                ("Fewer Choices", "No pies, maps or 3D out of the box."),
                ("Basic Interactivity", "Zoom, pan and hover; anything else is up to you."),
            ],
        }),
        Page::AdvancedCharts => Some(Intro {
            heading: "Pros and Cons of Advanced Charts",
            summary: "\"Advanced charts\" combine the primitives with grouping, custom colours and hand-drawn shapes.",
            pros: &[
                ("Many Customization Options", "Every group, colour and tooltip is under your control."),
                ("Wide Variety of Chart Types", "Column layers and graphs come from composing primitives."),
                ("Advanced Interactivity", "Custom hover labels can look up the nearest station."),
            ],
            cons: &[
                ("Steeper Learning Curve", "You describe the chart yourself before drawing it."),
                ("More Code", "Layout of graphs and pies is computed by hand."),
                ("Integration Complexity", "Coordinate systems must be kept consistent manually."),
            ],
        }),
        Page::Dashboard | Page::Data => None,
    }
}

/// The "My Data" blurb under each intro.
pub const DATA_NOTE: &str =
    "The dataset is a Japanese bullet train (shinkansen) station list, loaded into a typed StationTable.";
pub const DATA_CODE: &str = "let table = data::loader::load_file(Path::new(\"shinkansen.xlsx\"))?;";
