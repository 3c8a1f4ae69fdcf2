use eframe::egui::Color32;

use crate::chart::*;
use crate::color::{ACCENT, ColorMap};
use crate::data::aggregate::{count_by_category, count_by_year, mean_by};
use crate::data::error::AggregateError;
use crate::data::model::{COL_DISTANCE, Category, StationTable};
use crate::view::View;

// ---------------------------------------------------------------------------
// View dispatch
// ---------------------------------------------------------------------------

/// Aggregate `table` for `view` and describe the resulting chart.
///
/// Pure: nothing is cached, the same table always yields the same chart.
pub fn build_chart(view: View, table: &StationTable) -> Result<Chart, AggregateError> {
    log::debug!("Building {view:?} from {} stations", table.len());
    let chart = match view {
        View::Area => stations_per_year(table, SeriesStyle::Area, ACCENT),
        View::Bar => prefecture_bars(table, |_| ACCENT),
        View::Line => stations_per_year(table, SeriesStyle::Line, ACCENT),
        View::Scatter => distance_per_station(table),
        View::Map => station_map(table),
        View::GroupedScatter => stations_by_line(table),
        View::CompanyBars => company_bars(table),
        View::MeanDistance => mean_distance_per_year(table)?,
        View::PrefectureBars => {
            let prefectures = count_by_category(table, Category::Prefecture).sorted_by_count_desc();
            let colors = ColorMap::new(prefectures.iter().map(|(p, _)| *p));
            let mut chart = prefecture_bars(table, |p| colors.color_for(p));
            chart.title = "Number of Shinkansen Stations by Prefecture".to_string();
            chart
        }
        View::YearlyTrend => {
            let mut chart = stations_per_year(
                table,
                SeriesStyle::LineWithMarkers(Color32::RED),
                Color32::BLUE,
            );
            chart.title = "Number of Shinkansen Stations Established by Year".to_string();
            chart.x_label = "Year".to_string();
            chart
        }
        View::ColumnLayer => Chart {
            title: "3D Map of Shinkansen Stations in Japan".to_string(),
            x_label: "Longitude".to_string(),
            y_label: "Latitude".to_string(),
            body: ChartBody::Columns(ColumnLayer::from_table(
                table,
                Color32::from_rgba_unmultiplied(200, 30, 0, 160),
            )?),
        },
        View::LineNetwork => {
            let colors = ColorMap::new(table.first_appearance(Category::Line));
            Chart {
                title: "Shinkansen Lines and Their Termini".to_string(),
                x_label: String::new(),
                y_label: String::new(),
                body: ChartBody::Graph(DirectedGraph::line_termini(table, &colors)),
            }
        }
    };
    Ok(chart)
}

// ---------------------------------------------------------------------------
// Aggregations behind the views
// ---------------------------------------------------------------------------

/// Count-by-key on the opening year, chronological.
pub fn stations_per_year(table: &StationTable, style: SeriesStyle, color: Color32) -> Chart {
    let points = count_by_year(table)
        .iter()
        .map(|&(year, n)| [year as f64, n as f64])
        .collect();
    Chart {
        title: "Number of Stations Opened Per Year".to_string(),
        x_label: "Year Opened".to_string(),
        y_label: "Number of Stations".to_string(),
        body: ChartBody::Series(Series {
            name: "Stations".to_string(),
            points,
            color,
            style,
        }),
    }
}

/// Count-by-key on the prefecture, largest first.
fn prefecture_bars(table: &StationTable, color: impl Fn(&str) -> Color32) -> Chart {
    let bars = count_by_category(table, Category::Prefecture)
        .sorted_by_count_desc()
        .into_iter()
        .map(|(prefecture, n)| BarDatum {
            label: prefecture.to_string(),
            value: n as f64,
            color: color(prefecture),
        })
        .collect();
    Chart {
        title: "Number of Stations Per Prefecture".to_string(),
        x_label: "Prefecture".to_string(),
        y_label: "Number of Stations".to_string(),
        body: ChartBody::Bars(bars),
    }
}

fn company_bars(table: &StationTable) -> Chart {
    let companies = count_by_category(table, Category::Company).sorted_by_count_desc();
    let colors = ColorMap::new(companies.iter().map(|(c, _)| *c));
    let bars = companies
        .into_iter()
        .map(|(company, n)| BarDatum {
            label: company.to_string(),
            value: n as f64,
            color: colors.color_for(company),
        })
        .collect();
    Chart {
        title: "Number of Shinkansen Stations by Company".to_string(),
        x_label: "Company".to_string(),
        y_label: "Number of Stations".to_string(),
        body: ChartBody::Bars(bars),
    }
}

/// Pass-through: one point per station, x is the station's row position.
fn distance_per_station(table: &StationTable) -> Chart {
    let points = table
        .iter()
        .enumerate()
        .map(|(i, r)| [i as f64, r.distance_km])
        .collect();
    Chart {
        title: "Distance from Tokyo Station".to_string(),
        x_label: "Station Name".to_string(),
        y_label: "Distance from Tokyo Station (km)".to_string(),
        body: ChartBody::Scatter(Scatter {
            groups: vec![ScatterGroup {
                name: "Stations".to_string(),
                color: ACCENT,
                points,
            }],
            x_categories: table.iter().map(|r| r.station_name.clone()).collect(),
            equal_aspect: false,
        }),
    }
}

/// Pass-through: station positions.
fn station_map(table: &StationTable) -> Chart {
    Chart {
        title: "Shinkansen Stations in Japan".to_string(),
        x_label: "Longitude".to_string(),
        y_label: "Latitude".to_string(),
        body: ChartBody::Scatter(Scatter {
            groups: vec![ScatterGroup {
                name: "Stations".to_string(),
                color: Color32::from_rgb(0xff, 0x4b, 0x4b),
                points: table.iter().map(|r| [r.longitude, r.latitude]).collect(),
            }],
            x_categories: Vec::new(),
            equal_aspect: true,
        }),
    }
}

/// Station positions, one colour per line in order of first appearance.
fn stations_by_line(table: &StationTable) -> Chart {
    let lines = table.first_appearance(Category::Line);
    let colors = ColorMap::new(lines.iter().copied());
    let groups = lines
        .into_iter()
        .map(|line| ScatterGroup {
            name: line.to_string(),
            color: colors.color_for(line),
            points: table
                .iter()
                .filter(|r| r.line == line)
                .map(|r| [r.longitude, r.latitude])
                .collect(),
        })
        .collect();
    Chart {
        title: "Shinkansen Stations in Japan".to_string(),
        x_label: "Longitude".to_string(),
        y_label: "Latitude".to_string(),
        body: ChartBody::Scatter(Scatter {
            groups,
            x_categories: Vec::new(),
            equal_aspect: true,
        }),
    }
}

/// Mean-by-key: average distance from Tokyo per opening year.
fn mean_distance_per_year(table: &StationTable) -> Result<Chart, AggregateError> {
    let points = mean_by(table, |r| r.year, |r| r.distance_km, COL_DISTANCE)?
        .into_iter()
        .map(|(year, avg)| [year as f64, avg])
        .collect();
    Ok(Chart {
        title: "Average Distance from Tokyo Station by Year".to_string(),
        x_label: "Year".to_string(),
        y_label: "Average Distance (km)".to_string(),
        body: ChartBody::Series(Series {
            name: "Average Distance".to_string(),
            points,
            color: ACCENT,
            style: SeriesStyle::Line,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::sample_table;

    #[test]
    fn every_view_builds_from_the_sample() {
        let table = sample_table();
        for view in View::SIMPLE.iter().chain(View::ADVANCED.iter()) {
            let chart = build_chart(*view, &table).unwrap();
            assert!(!chart.title.is_empty(), "{view}");
        }
    }

    #[test]
    fn building_twice_gives_the_same_chart() {
        let table = sample_table();
        for view in View::ADVANCED {
            assert_eq!(build_chart(view, &table), build_chart(view, &table));
        }
    }

    #[test]
    fn area_chart_is_chronological_counts() {
        let chart = build_chart(View::Area, &sample_table()).unwrap();
        let ChartBody::Series(series) = chart.body else {
            panic!("expected a series");
        };
        assert_eq!(series.style, SeriesStyle::Area);
        assert_eq!(
            series.points,
            vec![[1964.0, 3.0], [1972.0, 2.0], [1982.0, 2.0], [2004.0, 1.0], [2011.0, 1.0], [2016.0, 2.0]]
        );
    }

    #[test]
    fn bars_are_sorted_largest_first() {
        let chart = build_chart(View::PrefectureBars, &sample_table()).unwrap();
        let ChartBody::Bars(bars) = chart.body else {
            panic!("expected bars");
        };
        assert_eq!(bars[0].label, "Hokkaido");
        assert_eq!(bars[0].value, 2.0);
        assert!(bars.windows(2).all(|w| w[0].value >= w[1].value));
        assert_eq!(bars.iter().map(|b| b.value).sum::<f64>(), 11.0);
    }

    #[test]
    fn grouped_scatter_has_one_group_per_line() {
        let chart = build_chart(View::GroupedScatter, &sample_table()).unwrap();
        let ChartBody::Scatter(scatter) = chart.body else {
            panic!("expected a scatter");
        };
        assert_eq!(scatter.groups.len(), 5);
        assert_eq!(scatter.groups[0].name, "Tokaido Shinkansen");
        assert_eq!(scatter.groups[0].points.len(), 3);
    }

    #[test]
    fn column_layer_needs_at_least_one_station() {
        assert!(build_chart(View::ColumnLayer, &StationTable::default()).is_err());
        assert!(build_chart(View::Bar, &StationTable::default()).is_ok());
    }
}
