use crate::models::{DateRange, Observation, ObservationTable};
use tracing::debug;

/// Selects the rows of a table whose calendar day lies within a date range
///
/// Both bounds are inclusive at day granularity: a row dated
/// `2013-03-31 23:00` is kept by a range ending on `2013-03-31`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeFilter {
    range: DateRange,
}

impl RangeFilter {
    pub fn new(range: DateRange) -> Self {
        Self { range }
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Return the matching rows as a view into the table
    ///
    /// The table is sorted by date, so the match is one contiguous run found
    /// by binary search. A reversed range yields an empty view.
    pub fn apply<'a>(&self, table: &'a ObservationTable) -> &'a [Observation] {
        let rows = table.rows();

        let lo = match self.range.start {
            Some(start) => rows.partition_point(|r| r.day() < start),
            None => 0,
        };
        let hi = match self.range.end {
            Some(end) => rows.partition_point(|r| r.day() <= end),
            None => rows.len(),
        };

        let selected = if lo <= hi { &rows[lo..hi] } else { &rows[lo..lo] };

        debug!(
            range = %self.range,
            total = rows.len(),
            selected = selected.len(),
            "applied date range filter"
        );
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn obs(ts: NaiveDateTime, station: &str) -> Observation {
        Observation::builder().date(ts).station(station).build().unwrap()
    }

    /// Four readings a day (00, 06, 12, 18h) from 2013-03-01 to 2013-03-10
    fn hourly_table() -> ObservationTable {
        let start = date(2013, 3, 1).and_hms_opt(0, 0, 0).unwrap();
        let rows = (0..40)
            .map(|i| obs(start + Duration::hours(6 * i), "A"))
            .collect();
        ObservationTable::new(rows)
    }

    #[test]
    fn test_unbounded_filter_is_identity() {
        let table = hourly_table();
        let rows = RangeFilter::default().apply(&table);
        assert_eq!(rows, table.rows());
    }

    #[test]
    fn test_bounded_filter_matches_predicate() {
        let table = hourly_table();
        let range = DateRange::between(date(2013, 3, 3), date(2013, 3, 5));
        let rows = RangeFilter::new(range).apply(&table);

        let expected: Vec<Observation> = table
            .rows()
            .iter()
            .filter(|r| range.contains(r.day()))
            .cloned()
            .collect();

        assert_eq!(rows.len(), 12);
        assert_eq!(rows, expected.as_slice());
        assert!(rows.iter().all(|r| r.day() >= date(2013, 3, 3) && r.day() <= date(2013, 3, 5)));
    }

    #[test]
    fn test_end_bound_includes_whole_day() {
        let table = hourly_table();
        let rows = RangeFilter::new(DateRange::day(date(2013, 3, 10))).apply(&table);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows.last().unwrap().date.to_string(), "2013-03-10 18:00:00");
    }

    #[test]
    fn test_open_bounds() {
        let table = hourly_table();

        let from = RangeFilter::new(DateRange::new(Some(date(2013, 3, 9)), None)).apply(&table);
        assert_eq!(from.len(), 8);

        let until = RangeFilter::new(DateRange::new(None, Some(date(2013, 3, 1)))).apply(&table);
        assert_eq!(until.len(), 4);
    }

    #[test]
    fn test_reversed_range_is_empty() {
        let table = hourly_table();
        let range = DateRange::between(date(2013, 3, 5), date(2013, 3, 3));
        assert!(RangeFilter::new(range).apply(&table).is_empty());
    }

    #[test]
    fn test_range_outside_data_is_empty() {
        let table = hourly_table();
        let range = DateRange::between(date(2015, 1, 1), date(2015, 12, 31));
        assert!(RangeFilter::new(range).apply(&table).is_empty());

        let empty = ObservationTable::default();
        assert!(RangeFilter::default().apply(&empty).is_empty());
    }

    #[test]
    fn test_filter_does_not_mutate_table() {
        let table = hourly_table();
        let before = table.clone();
        let _ = RangeFilter::new(DateRange::day(date(2013, 3, 2))).apply(&table);
        assert_eq!(table, before);
    }
}
