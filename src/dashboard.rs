use eframe::egui::Color32;

use crate::chart::ColumnLayer;
use crate::color::{ACCENT, ColorMap};
use crate::data::aggregate::{
    CountTable, count_by_category, count_by_year, count_in_year, distinct_count, top_n_filter,
};
use crate::data::error::AggregateError;
use crate::data::filter::{YearRange, narrow_by_year};
use crate::data::model::{Category, StationTable};

// ---------------------------------------------------------------------------
// Overview page: everything derived from one narrowed table
// ---------------------------------------------------------------------------

/// Headline numbers of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    pub stations: usize,
    /// Stations opened in the latest year minus those in the reference year.
    pub station_delta: i64,
    pub lines: usize,
    pub companies: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompanyShare {
    pub company: String,
    pub stations: usize,
    /// Percentage of the narrowed table.
    pub percent: f64,
    pub color: Color32,
}

/// All dashboard sub-views for one year range.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub range: YearRange,
    pub metrics: Metrics,
    pub company_share: Vec<CompanyShare>,
    /// Errors only when the range leaves no stations.
    pub columns: Result<ColumnLayer, AggregateError>,
    /// Highest station count first.
    pub top_prefectures: Vec<(String, usize)>,
    /// Chronological.
    pub stations_per_year: CountTable<i32>,
}

/// Latest-year count minus reference-year count.
///
/// A reference year outside the table counts zero, so the delta is then the
/// latest-year count on its own.  An empty table yields zero.
pub fn station_delta(table: &StationTable, reference_year: i32) -> i64 {
    let latest = table
        .iter()
        .map(|r| r.year)
        .max()
        .map_or(0, |year| count_in_year(table, year));
    latest as i64 - count_in_year(table, reference_year) as i64
}

pub fn metrics(table: &StationTable, reference_year: i32) -> Metrics {
    Metrics {
        stations: table.len(),
        station_delta: station_delta(table, reference_year),
        lines: distinct_count(table, Category::Line),
        companies: distinct_count(table, Category::Company),
    }
}

/// Narrow `table` to `range` once and derive every sub-view from the result.
pub fn summarize(
    table: &StationTable,
    range: YearRange,
    reference_year: i32,
    top_n: usize,
) -> DashboardSummary {
    let narrowed = narrow_by_year(table, range);
    let colors = ColorMap::companies();

    let companies = count_by_category(&narrowed, Category::Company);
    let total = companies.total().max(1) as f64;
    let company_share = companies
        .iter()
        .map(|&(company, stations)| CompanyShare {
            company: company.to_string(),
            stations,
            percent: 100.0 * stations as f64 / total,
            color: colors.color_for(company),
        })
        .collect();

    let top_prefectures = top_n_filter(&narrowed, Category::Prefecture, top_n)
        .ranked
        .into_iter()
        .map(|(p, n)| (p.to_string(), n))
        .collect();

    DashboardSummary {
        range,
        metrics: metrics(&narrowed, reference_year),
        company_share,
        columns: ColumnLayer::from_table(&narrowed, ACCENT),
        top_prefectures,
        stations_per_year: count_by_year(&narrowed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::sample_table;

    #[test]
    fn full_range_summary() {
        let table = sample_table();
        let summary = summarize(&table, YearRange::new(1964, 2016), 2016, 5);

        assert_eq!(
            summary.metrics,
            Metrics {
                stations: 11,
                station_delta: 0,
                lines: 5,
                companies: 5,
            }
        );
        assert_eq!(summary.top_prefectures.len(), 5);
        assert_eq!(summary.top_prefectures[0], ("Hokkaido".to_string(), 2));
        assert_eq!(summary.company_share.iter().map(|c| c.stations).sum::<usize>(), 11);
        assert_eq!(summary.columns.as_ref().map(|c| c.columns.len()), Ok(11));
        assert_eq!(summary.stations_per_year.iter().next(), Some(&(1964, 3)));
        let percent: f64 = summary.company_share.iter().map(|c| c.percent).sum();
        assert!((percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn every_sub_view_sees_the_same_narrowed_table() {
        let table = sample_table();
        let summary = summarize(&table, YearRange::new(1964, 1980), 2016, 5);

        assert_eq!(summary.metrics.stations, 5);
        assert_eq!(summary.company_share.iter().map(|c| c.stations).sum::<usize>(), 5);
        assert_eq!(summary.columns.as_ref().map(|c| c.columns.len()), Ok(5));
        assert_eq!(
            summary.stations_per_year.iter().copied().collect::<Vec<_>>(),
            vec![(1964, 3), (1972, 2)]
        );
        assert_eq!(summary.top_prefectures.iter().map(|(_, n)| n).sum::<usize>(), 5);
    }

    #[test]
    fn filtered_out_reference_year_counts_zero() {
        let table = sample_table();
        let narrowed = narrow_by_year(&table, YearRange::new(1964, 1980));
        // Latest year 1972 has two stations and 2016 is outside the range.
        assert_eq!(station_delta(&narrowed, 2016), 2);
        assert_eq!(station_delta(&table, 1964), 2 - 3);
        assert_eq!(station_delta(&StationTable::default(), 2016), 0);
    }

    #[test]
    fn empty_range_has_no_column_layer() {
        let summary = summarize(&sample_table(), YearRange::new(1990, 2000), 2016, 5);
        assert_eq!(summary.metrics.stations, 0);
        assert!(summary.columns.is_err());
        assert!(summary.top_prefectures.is_empty());
        assert!(summary.stations_per_year.is_empty());
    }

    #[test]
    fn company_colours_follow_the_fixed_scale() {
        let summary = summarize(&sample_table(), YearRange::new(1964, 2016), 2016, 5);
        let central = summary
            .company_share
            .iter()
            .find(|c| c.company == "JR Central")
            .unwrap();
        assert_eq!(central.color, ColorMap::companies().color_for("JR Central"));
    }
}
