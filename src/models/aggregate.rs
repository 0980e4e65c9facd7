use serde::{Deserialize, Serialize};

use super::{DayType, Measure};

/// Mean O3 and SO2 for one station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationPollutants {
    pub station: String,
    pub o3: Option<f64>,
    pub so2: Option<f64>,
    pub rows: usize,
}

/// Mean wind speed for one station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationWind {
    pub station: String,
    pub wspm: Option<f64>,
    pub rows: usize,
}

/// Mean O3 and SO2 for one station on weekdays or weekends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTypePollutants {
    pub station: String,
    pub day_type: DayType,
    pub o3: Option<f64>,
    pub so2: Option<f64>,
    pub rows: usize,
}

/// Mean particulate levels within one temperature bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempBinParticulates {
    pub temp_bin: String,
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub rows: usize,
}

/// Pairwise Pearson correlation between a fixed set of measures
///
/// `None` marks an undefined coefficient (fewer than two paired values or a
/// constant column).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub variables: Vec<Measure>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn get(&self, a: Measure, b: Measure) -> Option<f64> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        self.values[i][j]
    }

    pub fn index_of(&self, measure: Measure) -> Option<usize> {
        self.variables.iter().position(|m| *m == measure)
    }

    /// True when no coefficient could be computed
    pub fn is_undefined(&self) -> bool {
        self.values.iter().flatten().all(Option::is_none)
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.len()).all(|i| (0..self.len()).all(|j| self.values[i][j] == self.values[j][i]))
    }

    pub fn labels(&self) -> Vec<String> {
        self.variables
            .iter()
            .map(|m| m.column_name().to_string())
            .collect()
    }
}

/// Every aggregate computed for one date-range selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardAggregates {
    pub pollutants_by_station: Vec<StationPollutants>,
    pub wind_by_station: Vec<StationWind>,
    pub wind_pollutant_correlation: CorrelationMatrix,
    pub pollutants_by_day_type: Vec<DayTypePollutants>,
    pub particulate_weather_correlation: CorrelationMatrix,
    pub particulates_by_temp_bin: Vec<TempBinParticulates>,
}

impl DashboardAggregates {
    /// True when no grouped aggregate has any group
    pub fn is_empty(&self) -> bool {
        self.pollutants_by_station.is_empty()
            && self.wind_by_station.is_empty()
            && self.pollutants_by_day_type.is_empty()
            && self.particulates_by_temp_bin.is_empty()
    }
}
