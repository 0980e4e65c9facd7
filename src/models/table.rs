use chrono::NaiveDate;
use std::collections::BTreeSet;

use super::Observation;

/// Time-ordered, immutable collection of observations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationTable {
    rows: Vec<Observation>,
}

impl ObservationTable {
    /// Build a table, sorting rows ascending by date
    ///
    /// The sort is stable, so rows sharing a timestamp keep their input order.
    pub fn new(mut rows: Vec<Observation>) -> Self {
        rows.sort_by_key(|r| r.date);
        Self { rows }
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn min_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|r| r.day())
    }

    pub fn max_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.day())
    }

    pub fn stations(&self) -> BTreeSet<&str> {
        self.rows.iter().map(|r| r.station.as_str()).collect()
    }
}

impl From<Vec<Observation>> for ObservationTable {
    fn from(rows: Vec<Observation>) -> Self {
        Self::new(rows)
    }
}
