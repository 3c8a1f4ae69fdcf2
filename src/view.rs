use std::fmt;

// ---------------------------------------------------------------------------
// Navigation: pages and the chart views they offer
// ---------------------------------------------------------------------------

/// Top-level navigation destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Dashboard,
    SimpleCharts,
    AdvancedCharts,
    Data,
}

impl Page {
    pub const ALL: [Page; 4] = [
        Page::Dashboard,
        Page::SimpleCharts,
        Page::AdvancedCharts,
        Page::Data,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Page::Dashboard => "Demo Dashboard",
            Page::SimpleCharts => "Simple Charts",
            Page::AdvancedCharts => "Advanced Charts",
            Page::Data => "Data",
        }
    }

    /// Views selectable on this page; empty for pages without a selector.
    pub fn views(self) -> &'static [View] {
        match self {
            Page::SimpleCharts => &View::SIMPLE,
            Page::AdvancedCharts => &View::ADVANCED,
            Page::Dashboard | Page::Data => &[],
        }
    }
}

/// One named chart derived from the station table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    // Plain plot primitives.
    Area,
    Bar,
    Line,
    Scatter,
    Map,
    // Charts with more styling and structure.
    GroupedScatter,
    CompanyBars,
    MeanDistance,
    PrefectureBars,
    YearlyTrend,
    ColumnLayer,
    LineNetwork,
}

impl View {
    pub const SIMPLE: [View; 5] = [View::Area, View::Bar, View::Line, View::Scatter, View::Map];

    pub const ADVANCED: [View; 7] = [
        View::GroupedScatter,
        View::CompanyBars,
        View::MeanDistance,
        View::PrefectureBars,
        View::YearlyTrend,
        View::ColumnLayer,
        View::LineNetwork,
    ];

    /// Name shown in the chart-type selector.
    pub fn label(self) -> &'static str {
        match self {
            View::Area => "Area Chart",
            View::Bar => "Bar Chart",
            View::Line => "Line Chart",
            View::Scatter => "Scatter Plot",
            View::Map => "Map",
            View::GroupedScatter => "Grouped Scatter",
            View::CompanyBars => "Sorted Bars",
            View::MeanDistance => "Mean Line",
            View::PrefectureBars => "Coloured Bars",
            View::YearlyTrend => "Line + Markers",
            View::ColumnLayer => "Column Layer",
            View::LineNetwork => "Directed Graph",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_view_belongs_to_exactly_one_page() {
        let all: Vec<View> = Page::ALL.iter().flat_map(|p| p.views().iter().copied()).collect();
        assert_eq!(all.len(), View::SIMPLE.len() + View::ADVANCED.len());
        for view in &all {
            assert_eq!(all.iter().filter(|v| *v == view).count(), 1, "{view}");
        }
    }
}
