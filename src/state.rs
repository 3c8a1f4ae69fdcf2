use std::path::{Path, PathBuf};

use crate::config::DashboardConfig;
use crate::data::filter::YearRange;
use crate::data::loader::load_file;
use crate::data::model::StationTable;
use crate::view::{Page, View};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded station table (None until a file loads successfully).
    pub table: Option<StationTable>,

    /// File the current table came from.
    pub source: Option<PathBuf>,

    /// Active navigation destination.
    pub page: Page,

    /// Chosen view on the simple-charts page; None shows the intro.
    pub simple_view: Option<View>,

    /// Chosen view on the advanced-charts page; None shows the intro.
    pub advanced_view: Option<View>,

    /// Dashboard year filter.
    pub year_range: YearRange,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            table: None,
            source: None,
            page: Page::default(),
            simple_view: None,
            advanced_view: None,
            year_range: YearRange::new(0, 0),
            status_message: None,
        }
    }

    /// Ingest a newly loaded table and reset the year filter to its span.
    pub fn set_table(&mut self, table: StationTable, source: PathBuf) {
        if let Some(range) = YearRange::spanning(&table) {
            self.year_range = range;
        }
        self.table = Some(table);
        self.source = Some(source);
        self.status_message = None;
    }

    /// Load `path`; on failure keep the previous table and report the error.
    pub fn load_from(&mut self, path: &Path) {
        match load_file(path) {
            Ok(table) => self.set_table(table, path.to_path_buf()),
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Re-read the current source, or the configured dataset if none.
    pub fn reload(&mut self) {
        let path = self
            .source
            .clone()
            .unwrap_or_else(|| self.config.dataset_path.clone());
        self.load_from(&path);
    }

    /// The selected view of a chart page.
    pub fn view_for(&self, page: Page) -> Option<View> {
        match page {
            Page::SimpleCharts => self.simple_view,
            Page::AdvancedCharts => self.advanced_view,
            Page::Dashboard | Page::Data => None,
        }
    }

    /// Select (or clear) the view of a chart page.  Views from another page
    /// are ignored.
    pub fn select_view(&mut self, page: Page, view: Option<View>) {
        if view.is_some_and(|v| !page.views().contains(&v)) {
            log::warn!("{view:?} is not offered on {}", page.label());
            return;
        }
        match page {
            Page::SimpleCharts => self.simple_view = view,
            Page::AdvancedCharts => self.advanced_view = view,
            Page::Dashboard | Page::Data => {}
        }
    }

    /// Update the dashboard year filter, clamped to the data and snapped to
    /// `year_step`.  The data's first and last year are always selectable.
    pub fn set_year_range(&mut self, range: YearRange) {
        let Some(bounds) = self.table.as_ref().and_then(|t| t.year_bounds()) else {
            return;
        };
        let range = range
            .clamped(bounds.clone())
            .snapped(bounds, self.config.year_step);
        if range == self.year_range {
            return;
        }
        if !range.contains(self.config.reference_year) {
            log::warn!(
                "Reference year {} is outside {}..={}; the station delta counts it as zero",
                self.config.reference_year,
                range.from,
                range.to
            );
        }
        self.year_range = range;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::sample_table;

    fn loaded() -> AppState {
        let mut state = AppState::new(DashboardConfig::default());
        state.set_table(sample_table(), PathBuf::from("sample.csv"));
        state
    }

    #[test]
    fn loading_resets_the_year_filter_to_the_data() {
        let state = loaded();
        assert_eq!(state.year_range, YearRange::new(1964, 2016));
    }

    #[test]
    fn year_filter_is_clamped() {
        let mut state = loaded();
        state.set_year_range(YearRange::new(1900, 2100));
        assert_eq!(state.year_range, YearRange::new(1964, 2016));
        state.set_year_range(YearRange::new(2000, 1970));
        assert_eq!(state.year_range, YearRange::new(2004, 2004));
    }

    #[test]
    fn dragging_to_the_last_year_keeps_the_newest_stations() {
        let mut state = loaded();
        state.set_year_range(YearRange::new(1964, 1990));
        assert_eq!(state.year_range, YearRange::new(1964, 1994));

        // Past the right edge the slider reports the bound itself.
        state.set_year_range(YearRange::new(1964, 2016));
        assert_eq!(state.year_range, YearRange::new(1964, 2016));

        let table = state.table.as_ref().unwrap();
        let summary = crate::dashboard::summarize(table, state.year_range, 2016, 5);
        assert_eq!(summary.metrics.stations, 11);
        assert_eq!(summary.metrics.station_delta, 0);
    }

    #[test]
    fn views_stay_on_their_page() {
        let mut state = loaded();
        state.select_view(Page::SimpleCharts, Some(View::Map));
        state.select_view(Page::SimpleCharts, Some(View::LineNetwork));
        assert_eq!(state.view_for(Page::SimpleCharts), Some(View::Map));
        state.select_view(Page::AdvancedCharts, Some(View::LineNetwork));
        assert_eq!(state.view_for(Page::AdvancedCharts), Some(View::LineNetwork));
        state.select_view(Page::SimpleCharts, None);
        assert_eq!(state.view_for(Page::SimpleCharts), None);
    }

    #[test]
    fn failed_load_keeps_the_previous_table() {
        let mut state = loaded();
        state.load_from(Path::new("does-not-exist.csv"));
        assert_eq!(state.table.as_ref().map(|t| t.len()), Some(11));
        assert!(state.status_message.is_some());
    }
}
