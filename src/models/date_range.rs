use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ObservationTable;
use crate::error::{DashboardError, Result};
use crate::utils::constants::DATE_FORMATS;

/// Inclusive calendar-day range; an absent bound leaves that side open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(Some(start), Some(end))
    }

    /// Range covering a single day
    pub fn day(day: NaiveDate) -> Self {
        Self::between(day, day)
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// True when both bounds are set and start lies after end
    pub fn is_reversed(&self) -> bool {
        matches!((self.start, self.end), (Some(s), Some(e)) if s > e)
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start.map_or(true, |s| day >= s) && self.end.map_or(true, |e| day <= e)
    }

    /// Substitute the table's first/last day for absent bounds
    pub fn resolve(&self, table: &ObservationTable) -> Option<(NaiveDate, NaiveDate)> {
        let start = self.start.or_else(|| table.min_date())?;
        let end = self.end.or_else(|| table.max_date())?;
        Some((start, end))
    }

    /// Parse the interactive date control
    ///
    /// Accepted forms: `START END`, `START..END`, `START..`, `..END`, a single
    /// `DATE`, and an empty line or `all` for the full range.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();

        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::default());
        }

        if let Some((start, end)) = trimmed.split_once("..") {
            return Ok(Self::new(parse_bound(start)?, parse_bound(end)?));
        }

        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        match parts.as_slice() {
            [day] => Ok(Self::day(parse_date(day)?)),
            [start, end] => Ok(Self::between(parse_date(start)?, parse_date(end)?)),
            _ => Err(DashboardError::InvalidDateRange(format!(
                "Expected 'START END' or 'START..END', got: '{}'",
                trimmed
            ))),
        }
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fmt_bound = |bound: Option<NaiveDate>| {
            bound.map_or_else(|| "*".to_string(), |d| d.to_string())
        };
        write!(f, "{}..{}", fmt_bound(self.start), fmt_bound(self.end))
    }
}

fn parse_bound(value: &str) -> Result<Option<NaiveDate>> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        parse_date(value).map(Some)
    }
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| DashboardError::InvalidDateRange(format!("Invalid date: '{}'", trimmed)))
}
