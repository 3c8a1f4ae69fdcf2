use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use super::error::AggregateError;
use super::model::{Category, StationRecord, StationTable};

// ---------------------------------------------------------------------------
// CountTable – key → exact tally
// ---------------------------------------------------------------------------

/// Result of a count-by-key aggregation, ordered by key ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct CountTable<K> {
    entries: Vec<(K, usize)>,
}

impl<K: Ord> CountTable<K> {
    pub fn iter(&self) -> std::slice::Iter<'_, (K, usize)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts; equals the row count of the aggregated table.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// Count for one key, `None` when the key never occurs.
    pub fn get(&self, key: &K) -> Option<usize> {
        self.entries
            .binary_search_by(|(k, _)| k.cmp(key))
            .ok()
            .map(|i| self.entries[i].1)
    }

    /// Entries ordered by count descending. Equal counts stay in key order.
    pub fn sorted_by_count_desc(&self) -> Vec<(K, usize)>
    where
        K: Clone,
    {
        let mut out = self.entries.clone();
        out.sort_by_key(|(_, n)| Reverse(*n));
        out
    }
}

/// Group `table` by `key` and tally the rows of each group.
pub fn count_by<'a, K, F>(table: &'a StationTable, key: F) -> CountTable<K>
where
    K: Ord,
    F: Fn(&'a StationRecord) -> K,
{
    let mut counts: BTreeMap<K, usize> = BTreeMap::new();
    for record in table {
        *counts.entry(key(record)).or_default() += 1;
    }
    CountTable {
        entries: counts.into_iter().collect(),
    }
}

/// Stations per value of a text column.
pub fn count_by_category(table: &StationTable, category: Category) -> CountTable<&str> {
    count_by(table, |r| category.value_of(r))
}

/// Stations per opening year, chronological.
pub fn count_by_year(table: &StationTable) -> CountTable<i32> {
    count_by(table, |r| r.year)
}

/// Number of stations that opened in `year`.
pub fn count_in_year(table: &StationTable, year: i32) -> usize {
    count_by_year(table).get(&year).unwrap_or(0)
}

/// Number of distinct values in a text column.
pub fn distinct_count(table: &StationTable, category: Category) -> usize {
    count_by_category(table, category).len()
}

// ---------------------------------------------------------------------------
// Means
// ---------------------------------------------------------------------------

/// Arithmetic mean of `values`; an empty input is an error, never NaN.
pub fn mean<I>(values: I, column: &'static str) -> Result<f64, AggregateError>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, n) = values
        .into_iter()
        .fold((0.0_f64, 0_usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        return Err(AggregateError::EmptyGroup { column });
    }
    Ok(sum / n as f64)
}

/// Group `table` by `key` and average `value` within each group.
///
/// Output is ordered by key ascending.
pub fn mean_by<'a, K, F, V>(
    table: &'a StationTable,
    key: F,
    value: V,
    column: &'static str,
) -> Result<Vec<(K, f64)>, AggregateError>
where
    K: Ord,
    F: Fn(&'a StationRecord) -> K,
    V: Fn(&StationRecord) -> f64,
{
    let mut groups: BTreeMap<K, Vec<f64>> = BTreeMap::new();
    for record in table {
        groups.entry(key(record)).or_default().push(value(record));
    }
    groups
        .into_iter()
        .map(|(k, values)| Ok((k, mean(values, column)?)))
        .collect()
}

// ---------------------------------------------------------------------------
// Top-N filter
// ---------------------------------------------------------------------------

/// The `n` most frequent keys of a column plus the rows carrying them.
#[derive(Debug, Clone, PartialEq)]
pub struct TopN<'a> {
    /// Retained keys with their counts, highest count first.
    pub ranked: Vec<(&'a str, usize)>,
    /// Rows of the input whose key is retained, in input order.
    pub detail: StationTable,
}

/// Count by `category`, keep the `n` largest groups, restrict rows to them.
///
/// Ties at the n-th place are broken by key ascending.
pub fn top_n_filter(table: &StationTable, category: Category, n: usize) -> TopN<'_> {
    let mut ranked = count_by_category(table, category).sorted_by_count_desc();
    ranked.truncate(n);

    let retained: BTreeSet<&str> = ranked.iter().map(|(k, _)| *k).collect();
    let detail = StationTable::new(
        table
            .iter()
            .filter(|r| retained.contains(category.value_of(r)))
            .cloned()
            .collect(),
    );
    TopN { ranked, detail }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{sample_table, station};
    use crate::data::model::COL_DISTANCE;

    fn companies(names: &[&str]) -> StationTable {
        StationTable::new(
            names
                .iter()
                .map(|c| station("s", "p", c, "l", 2000))
                .collect(),
        )
    }

    #[test]
    fn counts_stations_per_year() {
        let table = StationTable::new(vec![
            station("Tokyo", "Tokyo", "JR Central", "Tokaido", 1964),
            station("Nagoya", "Aichi", "JR Central", "Tokaido", 1964),
            station("Kyoto", "Kyoto", "JR Central", "Tokaido", 1964),
            station("Shin-Kobe", "Hyogo", "JR West", "Sanyo", 1972),
            station("Okayama", "Okayama", "JR West", "Sanyo", 1972),
        ]);
        let counts = count_by_year(&table);
        assert_eq!(counts.iter().copied().collect::<Vec<_>>(), vec![(1964, 3), (1972, 2)]);
    }

    #[test]
    fn counts_stations_per_company_and_keeps_top_one() {
        let table = companies(&["JR Central", "JR Central", "JR East"]);
        let counts = count_by_category(&table, Category::Company);
        assert_eq!(counts.get(&"JR Central"), Some(2));
        assert_eq!(counts.get(&"JR East"), Some(1));
        assert_eq!(counts.len(), 2);

        let top = top_n_filter(&table, Category::Company, 1);
        assert_eq!(top.ranked, vec![("JR Central", 2)]);
        assert_eq!(top.detail.len(), 2);
        assert!(top.detail.iter().all(|r| r.company == "JR Central"));
    }

    #[test]
    fn counts_sum_to_row_count() {
        let table = sample_table();
        for category in [Category::Station, Category::Prefecture, Category::Company, Category::Line] {
            assert_eq!(count_by_category(&table, category).total(), table.len());
        }
        assert_eq!(count_by_year(&table).total(), table.len());
        assert_eq!(count_by_year(&StationTable::default()).total(), 0);
    }

    #[test]
    fn top_n_dominates_excluded_keys() {
        let table = sample_table();
        let counts = count_by_category(&table, Category::Prefecture);
        for n in 0..=counts.len() + 1 {
            let top = top_n_filter(&table, Category::Prefecture, n);
            assert!(top.ranked.len() <= n);

            let min_kept = top.ranked.iter().map(|(_, c)| *c).min().unwrap_or(usize::MAX);
            for (key, count) in counts.iter() {
                if !top.ranked.iter().any(|(k, _)| k == key) {
                    assert!(*count <= min_kept, "{key} ({count}) beats a retained key");
                }
            }
            assert_eq!(
                top.detail.len(),
                top.ranked.iter().map(|(_, c)| c).sum::<usize>()
            );
        }
    }

    #[test]
    fn top_n_breaks_ties_by_key() {
        let table = companies(&["JR West", "JR East", "JR Central"]);
        let top = top_n_filter(&table, Category::Company, 2);
        assert_eq!(top.ranked, vec![("JR Central", 1), ("JR East", 1)]);
    }

    #[test]
    fn mean_by_matches_arithmetic_mean() {
        let table = sample_table();
        let means = mean_by(&table, |r| r.year, |r| r.distance_km, COL_DISTANCE).unwrap();
        for (year, avg) in &means {
            let group: Vec<f64> = table
                .iter()
                .filter(|r| r.year == *year)
                .map(|r| r.distance_km)
                .collect();
            let expected = group.iter().sum::<f64>() / group.len() as f64;
            assert!((avg - expected).abs() < 1e-9);
        }
        assert_eq!(means.len(), count_by_year(&table).len());
    }

    #[test]
    fn mean_of_nothing_is_an_error() {
        assert_eq!(
            mean(Vec::new(), COL_DISTANCE),
            Err(AggregateError::EmptyGroup { column: COL_DISTANCE })
        );
        assert!(mean_by(&StationTable::default(), |r| r.year, |r| r.distance_km, COL_DISTANCE)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn aggregation_is_repeatable() {
        let table = sample_table();
        assert_eq!(
            count_by_category(&table, Category::Line),
            count_by_category(&table, Category::Line)
        );
        assert_eq!(
            top_n_filter(&table, Category::Prefecture, 5),
            top_n_filter(&table, Category::Prefecture, 5)
        );
    }

    #[test]
    fn distinct_and_per_year_counts() {
        let table = sample_table();
        assert_eq!(distinct_count(&table, Category::Line), 5);
        assert_eq!(distinct_count(&table, Category::Company), 5);
        assert_eq!(count_in_year(&table, 2016), 2);
        assert_eq!(count_in_year(&table, 1999), 0);
    }
}
