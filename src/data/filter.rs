use std::ops::RangeInclusive;

use super::model::StationTable;

// ---------------------------------------------------------------------------
// Year-range narrowing
// ---------------------------------------------------------------------------

/// Selected opening-year window, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub from: i32,
    pub to: i32,
}

impl YearRange {
    pub fn new(from: i32, to: i32) -> Self {
        Self { from, to }
    }

    /// The full span of years present in `table`.
    pub fn spanning(table: &StationTable) -> Option<Self> {
        table
            .year_bounds()
            .map(|r| Self::new(*r.start(), *r.end()))
    }

    pub fn contains(&self, year: i32) -> bool {
        self.from <= year && year <= self.to
    }

    /// Clamp both ends into `bounds` and keep `from <= to`.
    pub fn clamped(self, bounds: RangeInclusive<i32>) -> Self {
        let from = self.from.clamp(*bounds.start(), *bounds.end());
        let to = self.to.clamp(from, *bounds.end());
        Self { from, to }
    }

    /// Snap both ends to a `step`-year grid starting at the first year of
    /// `bounds`.  The last year is a snap target too, so the full span stays
    /// selectable when its length is not a multiple of `step`.
    pub fn snapped(self, bounds: RangeInclusive<i32>, step: i32) -> Self {
        let (start, end) = (*bounds.start(), *bounds.end());
        let snap = |year: i32| {
            if step <= 1 {
                return year;
            }
            let steps = (f64::from(year - start) / f64::from(step)).round() as i32;
            let on_grid = (start + steps * step).min(end);
            if end - year < (year - on_grid).abs() {
                end
            } else {
                on_grid
            }
        };
        Self {
            from: snap(self.from),
            to: snap(self.to),
        }
    }
}

/// Return a new table holding only the stations that opened within `range`.
///
/// Row order is preserved. Narrowing twice with the same range is a no-op the
/// second time.
pub fn narrow_by_year(table: &StationTable, range: YearRange) -> StationTable {
    StationTable::new(
        table
            .iter()
            .filter(|r| range.contains(r.year))
            .cloned()
            .collect(),
    )
}
