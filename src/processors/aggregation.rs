use crate::models::{
    CorrelationMatrix, DashboardAggregates, DayType, DayTypePollutants, Measure, Observation,
    StationPollutants, StationWind, TempBinParticulates,
};
use crate::processors::statistics::{correlation_matrix, group_means};
use std::cmp::Ordering;
use std::time::Instant;
use tracing::debug;

/// Variables of the wind/pollutant heatmap
pub const WIND_POLLUTANT_MEASURES: [Measure; 5] = [
    Measure::Wspm,
    Measure::O3,
    Measure::So2,
    Measure::Pm25,
    Measure::Pm10,
];

/// Variables of the particulate/weather heatmap
pub const PARTICULATE_WEATHER_MEASURES: [Measure; 4] =
    [Measure::Pm25, Measure::Pm10, Measure::Temp, Measure::Pres];

/// Descending order with missing values last
fn cmp_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort key placing temperature bins in their numeric order
#[derive(Debug, Clone, PartialEq)]
struct TempBinKey {
    lower: Option<f64>,
    label: String,
}

impl TempBinKey {
    fn new(label: &str) -> Self {
        Self {
            lower: leading_number(label),
            label: label.to_string(),
        }
    }
}

impl Eq for TempBinKey {}

impl PartialOrd for TempBinKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TempBinKey {
    fn cmp(&self, other: &Self) -> Ordering {
        let by_bound = match (self.lower, other.lower) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_bound.then_with(|| self.label.cmp(&other.label))
    }
}

/// First number appearing in a bin label, e.g. `-10` in `(-10, 0]`
///
/// Open edges written as `-inf`/`inf` map to the matching infinity.
fn leading_number(label: &str) -> Option<f64> {
    let bytes = label.as_bytes();
    let is_inf = |i: usize| {
        bytes
            .get(i..i + 3)
            .is_some_and(|s| s.eq_ignore_ascii_case(b"inf"))
    };

    for start in 0..bytes.len() {
        let negative = bytes[start] == b'-';
        let digits = if negative { start + 1 } else { start };

        if is_inf(digits) {
            return Some(if negative {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            });
        }

        if bytes.get(digits).is_some_and(u8::is_ascii_digit) {
            let end = (digits + 1..bytes.len())
                .find(|&i| !(bytes[i].is_ascii_digit() || bytes[i] == b'.'))
                .unwrap_or(bytes.len());
            return label[start..end].trim_end_matches('.').parse().ok();
        }
    }

    None
}

/// Group-by/reduce passes behind every dashboard chart
///
/// Each operation is independent, reads only the rows it is given and never
/// fails: an empty slice produces zero groups.
pub struct AggregationPipeline;

impl AggregationPipeline {
    pub fn new() -> Self {
        Self
    }

    /// Mean O3 and SO2 per station, highest O3 first
    pub fn pollutants_by_station(&self, rows: &[Observation]) -> Vec<StationPollutants> {
        let groups = group_means(rows, |r| Some(r.station.clone()), [Measure::O3, Measure::So2]);

        let mut result: Vec<StationPollutants> = groups
            .into_iter()
            .map(|(station, stats)| StationPollutants {
                station,
                o3: stats.means[0].value(),
                so2: stats.means[1].value(),
                rows: stats.rows,
            })
            .collect();

        // stable: exact ties keep station order
        result.sort_by(|a, b| cmp_desc(a.o3, b.o3).then_with(|| cmp_desc(a.so2, b.so2)));
        result
    }

    /// Mean wind speed per station, windiest first
    pub fn wind_by_station(&self, rows: &[Observation]) -> Vec<StationWind> {
        let groups = group_means(rows, |r| Some(r.station.clone()), [Measure::Wspm]);

        let mut result: Vec<StationWind> = groups
            .into_iter()
            .map(|(station, stats)| StationWind {
                station,
                wspm: stats.means[0].value(),
                rows: stats.rows,
            })
            .collect();

        result.sort_by(|a, b| cmp_desc(a.wspm, b.wspm));
        result
    }

    pub fn wind_pollutant_correlation(&self, rows: &[Observation]) -> CorrelationMatrix {
        correlation_matrix(rows, &WIND_POLLUTANT_MEASURES)
    }

    pub fn particulate_weather_correlation(&self, rows: &[Observation]) -> CorrelationMatrix {
        correlation_matrix(rows, &PARTICULATE_WEATHER_MEASURES)
    }

    /// Mean O3 and SO2 per (station, day type), ordered by station then weekday first
    pub fn pollutants_by_day_type(&self, rows: &[Observation]) -> Vec<DayTypePollutants> {
        let groups = group_means(
            rows,
            |r| Some((r.station.clone(), DayType::from_date(r.day()))),
            [Measure::O3, Measure::So2],
        );

        groups
            .into_iter()
            .map(|((station, day_type), stats)| DayTypePollutants {
                station,
                day_type,
                o3: stats.means[0].value(),
                so2: stats.means[1].value(),
                rows: stats.rows,
            })
            .collect()
    }

    /// Mean PM2.5 and PM10 per temperature bin, coldest bin first
    pub fn particulates_by_temp_bin(&self, rows: &[Observation]) -> Vec<TempBinParticulates> {
        let groups = group_means(
            rows,
            |r| r.temp_bin.as_deref().map(TempBinKey::new),
            [Measure::Pm25, Measure::Pm10],
        );

        groups
            .into_iter()
            .map(|(key, stats)| TempBinParticulates {
                temp_bin: key.label,
                pm25: stats.means[0].value(),
                pm10: stats.means[1].value(),
                rows: stats.rows,
            })
            .collect()
    }

    /// Run every aggregation over the same rows
    pub fn run(&self, rows: &[Observation]) -> DashboardAggregates {
        let started = Instant::now();

        let aggregates = DashboardAggregates {
            pollutants_by_station: self.pollutants_by_station(rows),
            wind_by_station: self.wind_by_station(rows),
            wind_pollutant_correlation: self.wind_pollutant_correlation(rows),
            pollutants_by_day_type: self.pollutants_by_day_type(rows),
            particulate_weather_correlation: self.particulate_weather_correlation(rows),
            particulates_by_temp_bin: self.particulates_by_temp_bin(rows),
        };

        debug!(
            rows = rows.len(),
            stations = aggregates.pollutants_by_station.len(),
            temp_bins = aggregates.particulates_by_temp_bin.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "aggregation pipeline finished"
        );
        aggregates
    }
}

impl Default for AggregationPipeline {
    fn default() -> Self {
        Self::new()
    }
}
