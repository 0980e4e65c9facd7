use crate::models::{Measure, Observation, ObservationTable};
use crate::processors::Mean;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug)]
pub struct DatasetStatistics {
    pub total_records: usize,
    pub stations: Vec<String>,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub measures: Vec<MeasureStats>,
    pub temp_bins: usize,
    pub missing_temp_bins: usize,
}

#[derive(Debug)]
pub struct MeasureStats {
    pub measure: Measure,
    pub present: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

impl MeasureStats {
    pub fn missing_percentage(&self) -> f64 {
        let total = self.present + self.missing;
        if total == 0 {
            0.0
        } else {
            (self.missing as f64 / total as f64) * 100.0
        }
    }
}

/// Describes what a loaded dataset contains
pub struct DatasetAnalyzer;

impl DatasetAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, table: &ObservationTable) -> DatasetStatistics {
        self.calculate_statistics(table.rows())
    }

    fn calculate_statistics(&self, records: &[Observation]) -> DatasetStatistics {
        let mut stations = BTreeSet::new();
        let mut temp_bins = BTreeSet::new();
        let mut missing_temp_bins = 0;
        let mut min_date: Option<NaiveDate> = None;
        let mut max_date: Option<NaiveDate> = None;
        let mut accumulators: BTreeMap<Measure, (Mean, f64, f64)> = Measure::ALL
            .iter()
            .map(|m| (*m, (Mean::default(), f64::INFINITY, f64::NEG_INFINITY)))
            .collect();

        for record in records {
            stations.insert(record.station.as_str());

            let day = record.day();
            min_date = Some(min_date.map_or(day, |d| d.min(day)));
            max_date = Some(max_date.map_or(day, |d| d.max(day)));

            match &record.temp_bin {
                Some(bin) => {
                    temp_bins.insert(bin.as_str());
                }
                None => missing_temp_bins += 1,
            }

            for (measure, (mean, min, max)) in accumulators.iter_mut() {
                let value = record.value(*measure);
                mean.push(value);
                if let Some(v) = value {
                    *min = min.min(v);
                    *max = max.max(v);
                }
            }
        }

        let measures = accumulators
            .into_iter()
            .map(|(measure, (mean, min, max))| {
                let present = mean.count();
                MeasureStats {
                    measure,
                    present,
                    missing: records.len() - present,
                    min: (present > 0).then_some(min),
                    max: (present > 0).then_some(max),
                    mean: mean.value(),
                }
            })
            .collect();

        DatasetStatistics {
            total_records: records.len(),
            stations: stations.into_iter().map(str::to_string).collect(),
            date_range: min_date.zip(max_date),
            measures,
            temp_bins: temp_bins.len(),
            missing_temp_bins,
        }
    }
}

impl Default for DatasetAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn fmt_value(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.1}", v))
}

impl DatasetStatistics {
    pub fn summary(&self) -> String {
        let coverage = match self.date_range {
            Some((start, end)) => format!(
                "{} to {} ({} days)",
                start,
                end,
                end.signed_duration_since(start).num_days() + 1
            ),
            None => "No records".to_string(),
        };

        format!(
            "Records: {} total\n\
            Stations: {} ({})\n\
            Date Range: {}\n\
            Temperature Bins: {} distinct, {} rows without bin",
            self.total_records,
            self.stations.len(),
            self.stations.join(", "),
            coverage,
            self.temp_bins,
            self.missing_temp_bins
        )
    }

    pub fn detailed_summary(&self) -> String {
        let lines: Vec<String> = self
            .measures
            .iter()
            .map(|m| {
                format!(
                    "- {:<6} min={:>8} mean={:>8} max={:>8} missing={} ({:.1}%)",
                    m.measure.column_name(),
                    fmt_value(m.min),
                    fmt_value(m.mean),
                    fmt_value(m.max),
                    m.missing,
                    m.missing_percentage()
                )
            })
            .collect();

        format!("{}\n\nMeasurements:\n{}", self.summary(), lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(day: u32, station: &str, o3: Option<f64>, bin: Option<&str>) -> Observation {
        Observation::builder()
            .day(NaiveDate::from_ymd_opt(2013, 3, day).unwrap())
            .station(station)
            .measure(Measure::O3, o3)
            .temp_bin(bin.map(str::to_string))
            .build()
            .unwrap()
    }

    #[test]
    fn test_dataset_statistics() {
        let table = ObservationTable::new(vec![
            record(3, "Wanliu", Some(30.0), Some("(0, 10]")),
            record(1, "Gucheng", Some(10.0), Some("(0, 10]")),
            record(2, "Wanliu", None, None),
        ]);

        let stats = DatasetAnalyzer::new().analyze(&table);

        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.stations, vec!["Gucheng", "Wanliu"]);
        assert_eq!(
            stats.date_range,
            Some((
                NaiveDate::from_ymd_opt(2013, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2013, 3, 3).unwrap()
            ))
        );
        assert_eq!(stats.temp_bins, 1);
        assert_eq!(stats.missing_temp_bins, 1);

        let o3 = stats
            .measures
            .iter()
            .find(|m| m.measure == Measure::O3)
            .unwrap();
        assert_eq!(o3.present, 2);
        assert_eq!(o3.missing, 1);
        assert_eq!(o3.min, Some(10.0));
        assert_eq!(o3.max, Some(30.0));
        assert_eq!(o3.mean, Some(20.0));

        let pres = stats
            .measures
            .iter()
            .find(|m| m.measure == Measure::Pres)
            .unwrap();
        assert_eq!(pres.min, None);
        assert_eq!(pres.missing_percentage(), 100.0);

        assert!(stats.summary().contains("2013-03-01 to 2013-03-03 (3 days)"));
        assert!(stats.detailed_summary().contains("O3"));
    }

    #[test]
    fn test_empty_dataset() {
        let stats = DatasetAnalyzer::new().analyze(&ObservationTable::default());
        assert_eq!(stats.total_records, 0);
        assert_eq!(stats.date_range, None);
        assert!(stats.summary().contains("No records"));
    }
}
