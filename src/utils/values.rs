use crate::error::{DashboardError, Result};
use crate::utils::constants::{DATETIME_FORMATS, DATE_FORMATS, MISSING_TOKENS};
use chrono::{NaiveDate, NaiveDateTime};

/// Parse a textual timestamp into a `NaiveDateTime`
///
/// Date-only values are placed at midnight.
///
/// # Examples
/// ```
/// use airq_dashboard::utils::parse_timestamp;
///
/// let ts = parse_timestamp("2013-03-01 14:00:00").unwrap();
/// assert_eq!(ts.to_string(), "2013-03-01 14:00:00");
/// ```
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();

    for format in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(ts);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Parse the `date` cell of a data row, reporting the row on failure
pub fn parse_row_timestamp(value: &str, row: usize) -> Result<NaiveDateTime> {
    parse_timestamp(value).ok_or_else(|| DashboardError::InvalidDate {
        row,
        value: value.to_string(),
    })
}

/// Check whether a cell holds one of the missing-value markers
pub fn is_missing(value: &str) -> bool {
    let trimmed = value.trim();
    MISSING_TOKENS
        .iter()
        .any(|token| trimmed.eq_ignore_ascii_case(token))
}

/// Parse a numeric measurement cell; missing markers and non-finite values become `None`
pub fn parse_measurement(value: &str, column: &str, row: usize) -> Result<Option<f64>> {
    if is_missing(value) {
        return Ok(None);
    }

    let number = value
        .trim()
        .parse::<f64>()
        .map_err(|_| DashboardError::InvalidNumber {
            row,
            column: column.to_string(),
            value: value.to_string(),
        })?;

    Ok(finite_or_none(number))
}

/// Treat NaN and infinities as a missing value
pub fn finite_or_none(value: f64) -> Option<f64> {
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}

/// Parse an optional categorical label; blank cells are missing
pub fn parse_label(value: &str) -> Option<String> {
    if is_missing(value) {
        None
    } else {
        Some(value.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2013, 3, 1)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap();

        assert_eq!(parse_timestamp("2013-03-01 14:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2013-03-01T14:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2013-03-01 14:00"), Some(expected));
        assert_eq!(parse_timestamp(" 2013/03/01 14:00:00 "), Some(expected));
    }

    #[test]
    fn test_parse_date_only_is_midnight() {
        let ts = parse_timestamp("2013-03-01").unwrap();
        assert_eq!(ts.to_string(), "2013-03-01 00:00:00");
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2013-13-01"), None);

        let err = parse_row_timestamp("not a date", 7).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidDate { row: 7, .. }));
    }

    #[test]
    fn test_parse_measurement() {
        assert_eq!(parse_measurement("12.5", "O3", 1).unwrap(), Some(12.5));
        assert_eq!(parse_measurement(" 3 ", "O3", 1).unwrap(), Some(3.0));
        assert_eq!(parse_measurement("", "O3", 1).unwrap(), None);
        assert_eq!(parse_measurement("NA", "O3", 1).unwrap(), None);
        assert_eq!(parse_measurement("NaN", "O3", 1).unwrap(), None);
        assert!(parse_measurement("high", "O3", 4).is_err());
    }

    #[test]
    fn test_infinite_measurement_is_missing() {
        assert_eq!(parse_measurement("inf", "PM10", 2).unwrap(), None);
        assert_eq!(parse_measurement("-Infinity", "PM10", 2).unwrap(), None);
        assert!(parse_measurement("None", "PM10", 2).is_err());
        assert_eq!(finite_or_none(f64::INFINITY), None);
        assert_eq!(finite_or_none(-3.5), Some(-3.5));
    }

    #[test]
    fn test_parse_label() {
        assert_eq!(parse_label(" (0, 10] "), Some("(0, 10]".to_string()));
        assert_eq!(parse_label(""), None);
    }
}
