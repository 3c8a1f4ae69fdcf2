use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;

// ---------------------------------------------------------------------------
// Column names of the source table
// ---------------------------------------------------------------------------

pub const COL_STATION: &str = "Station Name";
pub const COL_PREFECTURE: &str = "Prefecture";
pub const COL_COMPANY: &str = "Company";
pub const COL_LINE: &str = "Shinkansen_Line";
pub const COL_YEAR: &str = "Year";
pub const COL_LONGITUDE: &str = "Longitude";
pub const COL_LATITUDE: &str = "Latitude";
pub const COL_DISTANCE: &str = "Distance from Tokyo Station";

/// Every column the loader requires, in the order of the source file.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    COL_STATION,
    COL_PREFECTURE,
    COL_COMPANY,
    COL_LINE,
    COL_YEAR,
    COL_LONGITUDE,
    COL_LATITUDE,
    COL_DISTANCE,
];

// ---------------------------------------------------------------------------
// Category – a text column usable as a group-by key
// ---------------------------------------------------------------------------

/// Text columns that views group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Station,
    Prefecture,
    Company,
    Line,
}

impl Category {
    /// Header of the column in the source file.
    pub fn column_name(self) -> &'static str {
        match self {
            Category::Station => COL_STATION,
            Category::Prefecture => COL_PREFECTURE,
            Category::Company => COL_COMPANY,
            Category::Line => COL_LINE,
        }
    }

    /// Borrow this column's value from a record.
    pub fn value_of(self, record: &StationRecord) -> &str {
        match self {
            Category::Station => &record.station_name,
            Category::Prefecture => &record.prefecture,
            Category::Company => &record.company,
            Category::Line => &record.line,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

// ---------------------------------------------------------------------------
// StationRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single Shinkansen station (one row of the source spreadsheet).
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    pub station_name: String,
    pub prefecture: String,
    pub company: String,
    pub line: String,
    /// Year the station opened.
    pub year: i32,
    pub longitude: f64,
    pub latitude: f64,
    /// Distance from Tokyo Station in kilometres.
    pub distance_km: f64,
}

// ---------------------------------------------------------------------------
// StationTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded dataset. Never mutated after load; narrowing yields a new table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationTable {
    pub records: Vec<StationRecord>,
}

impl StationTable {
    pub fn new(records: Vec<StationRecord>) -> Self {
        Self { records }
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StationRecord> {
        self.records.iter()
    }

    /// Earliest and latest opening year, `None` for an empty table.
    pub fn year_bounds(&self) -> Option<RangeInclusive<i32>> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some(min..=max)
    }

    /// Distinct values of a text column in order of first appearance.
    pub fn first_appearance(&self, category: Category) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.records
            .iter()
            .map(|r| category.value_of(r))
            .filter(|v| seen.insert(*v))
            .collect()
    }
}

impl<'a> IntoIterator for &'a StationTable {
    type Item = &'a StationRecord;
    type IntoIter = std::slice::Iter<'a, StationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn station(name: &str, prefecture: &str, company: &str, line: &str, year: i32) -> StationRecord {
        StationRecord {
            station_name: name.to_string(),
            prefecture: prefecture.to_string(),
            company: company.to_string(),
            line: line.to_string(),
            year,
            longitude: 139.0,
            latitude: 35.0,
            distance_km: 0.0,
        }
    }

    /// A small but realistic slice of the dataset.
    pub fn sample_table() -> StationTable {
        let rows = [
            ("Tokyo", "Tokyo", "JR Central", "Tokaido Shinkansen", 1964, 139.767, 35.681, 0.0),
            ("Shin-Yokohama", "Kanagawa", "JR Central", "Tokaido Shinkansen", 1964, 139.617, 35.507, 28.8),
            ("Nagoya", "Aichi", "JR Central", "Tokaido Shinkansen", 1964, 136.882, 35.171, 366.0),
            ("Shin-Kobe", "Hyogo", "JR West", "Sanyo Shinkansen", 1972, 135.195, 34.706, 589.5),
            ("Okayama", "Okayama", "JR West", "Sanyo Shinkansen", 1972, 133.918, 34.666, 732.9),
            ("Sendai", "Miyagi", "JR East", "Tohoku Shinkansen", 1982, 140.882, 38.260, 351.8),
            ("Omiya", "Saitama", "JR East", "Tohoku Shinkansen", 1982, 139.623, 35.906, 30.3),
            ("Hakata", "Fukuoka", "JR Kyushu", "Kyushu Shinkansen", 2011, 130.420, 33.590, 1174.9),
            ("Kagoshima-Chuo", "Kagoshima", "JR Kyushu", "Kyushu Shinkansen", 2004, 130.541, 31.584, 1463.6),
            ("Shin-Hakodate-Hokuto", "Hokkaido", "JR Hokkaido", "Hokkaido Shinkansen", 2016, 140.648, 41.905, 862.5),
            ("Kikonai", "Hokkaido", "JR Hokkaido", "Hokkaido Shinkansen", 2016, 140.436, 41.678, 823.7),
        ];
        StationTable::new(
            rows.iter()
                .map(|&(name, pref, company, line, year, lon, lat, dist)| StationRecord {
                    station_name: name.to_string(),
                    prefecture: pref.to_string(),
                    company: company.to_string(),
                    line: line.to_string(),
                    year,
                    longitude: lon,
                    latitude: lat,
                    distance_km: dist,
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::sample_table;
    use super::*;

    #[test]
    fn year_bounds_cover_first_and_last_opening() {
        let table = sample_table();
        assert_eq!(table.year_bounds(), Some(1964..=2016));
        assert_eq!(StationTable::default().year_bounds(), None);
    }

    #[test]
    fn first_appearance_keeps_file_order() {
        let table = sample_table();
        assert_eq!(
            table.first_appearance(Category::Company),
            vec!["JR Central", "JR West", "JR East", "JR Kyushu", "JR Hokkaido"]
        );
    }
}
