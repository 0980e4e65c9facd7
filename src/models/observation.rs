use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::utils::constants::{
    COL_O3, COL_PM10, COL_PM25, COL_PRES, COL_SO2, COL_TEMP, COL_WSPM, DAY_TYPE_WEEKDAY,
    DAY_TYPE_WEEKEND, WEEKEND_START_INDEX,
};

/// One hourly measurement record for a monitoring station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDateTime,
    pub station: String,

    // Pollutant concentrations (μg/m³)
    pub o3: Option<f64>,
    pub so2: Option<f64>,
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,

    // Weather (wind m/s, temperature °C, pressure hPa)
    pub wspm: Option<f64>,
    pub temp: Option<f64>,
    pub pres: Option<f64>,

    pub temp_bin: Option<String>,
}

impl Observation {
    pub fn builder() -> ObservationBuilder {
        ObservationBuilder::new()
    }

    /// Calendar day of the measurement
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    pub fn day_type(&self) -> DayType {
        DayType::from_date(self.day())
    }

    pub fn value(&self, measure: Measure) -> Option<f64> {
        match measure {
            Measure::O3 => self.o3,
            Measure::So2 => self.so2,
            Measure::Pm25 => self.pm25,
            Measure::Pm10 => self.pm10,
            Measure::Wspm => self.wspm,
            Measure::Temp => self.temp,
            Measure::Pres => self.pres,
        }
    }
}

/// Numeric columns of the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Measure {
    O3,
    So2,
    Pm25,
    Pm10,
    Wspm,
    Temp,
    Pres,
}

impl Measure {
    pub const ALL: [Measure; 7] = [
        Measure::O3,
        Measure::So2,
        Measure::Pm25,
        Measure::Pm10,
        Measure::Wspm,
        Measure::Temp,
        Measure::Pres,
    ];

    /// Column header used in the dataset file
    pub fn column_name(&self) -> &'static str {
        match self {
            Measure::O3 => COL_O3,
            Measure::So2 => COL_SO2,
            Measure::Pm25 => COL_PM25,
            Measure::Pm10 => COL_PM10,
            Measure::Wspm => COL_WSPM,
            Measure::Temp => COL_TEMP,
            Measure::Pres => COL_PRES,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Measure::O3 => "O₃",
            Measure::So2 => "SO₂",
            Measure::Pm25 => "PM2.5",
            Measure::Pm10 => "PM10",
            Measure::Wspm => "WSPM",
            Measure::Temp => "TEMP",
            Measure::Pres => "PRES",
        }
    }
}

impl std::fmt::Display for Measure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    Weekday,
    Weekend,
}

impl DayType {
    /// Saturday and Sunday are weekend days
    pub fn from_date(date: NaiveDate) -> Self {
        if date.weekday().num_days_from_monday() >= WEEKEND_START_INDEX {
            DayType::Weekend
        } else {
            DayType::Weekday
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayType::Weekday => DAY_TYPE_WEEKDAY,
            DayType::Weekend => DAY_TYPE_WEEKEND,
        }
    }
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Default)]
pub struct ObservationBuilder {
    date: Option<NaiveDateTime>,
    station: Option<String>,
    o3: Option<f64>,
    so2: Option<f64>,
    pm25: Option<f64>,
    pm10: Option<f64>,
    wspm: Option<f64>,
    temp: Option<f64>,
    pres: Option<f64>,
    temp_bin: Option<String>,
}

impl ObservationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self
    }

    /// Set the date at midnight
    pub fn day(mut self, day: NaiveDate) -> Self {
        self.date = day.and_hms_opt(0, 0, 0);
        self
    }

    pub fn station(mut self, station: impl Into<String>) -> Self {
        self.station = Some(station.into());
        self
    }

    /// Set a measurement; `None` marks it missing
    pub fn measure(mut self, measure: Measure, value: Option<f64>) -> Self {
        let slot = match measure {
            Measure::O3 => &mut self.o3,
            Measure::So2 => &mut self.so2,
            Measure::Pm25 => &mut self.pm25,
            Measure::Pm10 => &mut self.pm10,
            Measure::Wspm => &mut self.wspm,
            Measure::Temp => &mut self.temp,
            Measure::Pres => &mut self.pres,
        };
        *slot = value;
        self
    }

    pub fn pollutants(self, o3: f64, so2: f64) -> Self {
        self.measure(Measure::O3, Some(o3))
            .measure(Measure::So2, Some(so2))
    }

    pub fn particulates(self, pm25: f64, pm10: f64) -> Self {
        self.measure(Measure::Pm25, Some(pm25))
            .measure(Measure::Pm10, Some(pm10))
    }

    pub fn weather(self, wspm: f64, temp: f64, pres: f64) -> Self {
        self.measure(Measure::Wspm, Some(wspm))
            .measure(Measure::Temp, Some(temp))
            .measure(Measure::Pres, Some(pres))
    }

    pub fn temp_bin(mut self, temp_bin: Option<String>) -> Self {
        self.temp_bin = temp_bin;
        self
    }

    pub fn build(self) -> Result<Observation> {
        Ok(Observation {
            date: self
                .date
                .ok_or_else(|| DashboardError::MissingData("date".to_string()))?,
            station: self
                .station
                .ok_or_else(|| DashboardError::MissingData("station".to_string()))?,
            o3: self.o3,
            so2: self.so2,
            pm25: self.pm25,
            pm10: self.pm10,
            wspm: self.wspm,
            temp: self.temp,
            pres: self.pres,
            temp_bin: self.temp_bin,
        })
    }
}
