use serde::Serialize;

use crate::models::{CorrelationMatrix, DashboardAggregates, DayType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    GroupedBar,
    Heatmap,
    Line,
}

/// The fixed set of charts shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Question {
    PollutantsByStation,
    WindByStation,
    WindPollutantCorrelation,
    DayTypeO3,
    DayTypeSo2,
    ParticulateWeatherCorrelation,
    ParticulatesByTemperature,
}

impl Question {
    /// Rendering order
    pub const ALL: [Question; 7] = [
        Question::PollutantsByStation,
        Question::WindByStation,
        Question::WindPollutantCorrelation,
        Question::DayTypeO3,
        Question::DayTypeSo2,
        Question::ParticulateWeatherCorrelation,
        Question::ParticulatesByTemperature,
    ];

    pub fn spec(&self) -> ChartSpec {
        match self {
            Question::PollutantsByStation => ChartSpec {
                kind: ChartKind::GroupedBar,
                title: "Average O₃ and SO₂ per Station",
                x_label: "Station",
                y_label: "Average concentration (μg/m³)",
            },
            Question::WindByStation => ChartSpec {
                kind: ChartKind::Bar,
                title: "Average Wind Speed (WSPM) per Station",
                x_label: "Station",
                y_label: "WSPM (m/s)",
            },
            Question::WindPollutantCorrelation => ChartSpec {
                kind: ChartKind::Heatmap,
                title: "Correlation of WSPM with Pollutants (O3, SO2, PM2.5, PM10)",
                x_label: "",
                y_label: "",
            },
            Question::DayTypeO3 => ChartSpec {
                kind: ChartKind::GroupedBar,
                title: "Average O₃ per Station: Weekend vs Weekday",
                x_label: "Station",
                y_label: "Average O₃ (μg/m³)",
            },
            Question::DayTypeSo2 => ChartSpec {
                kind: ChartKind::GroupedBar,
                title: "Average SO₂ per Station: Weekend vs Weekday",
                x_label: "Station",
                y_label: "Average SO₂ (μg/m³)",
            },
            Question::ParticulateWeatherCorrelation => ChartSpec {
                kind: ChartKind::Heatmap,
                title: "Correlation between Particulates and Weather",
                x_label: "",
                y_label: "",
            },
            Question::ParticulatesByTemperature => ChartSpec {
                kind: ChartKind::Line,
                title: "Average PM2.5 and PM10 by Temperature Range",
                x_label: "Temperature range (°C)",
                y_label: "Concentration (μg/m³)",
            },
        }
    }

    /// Reduce the aggregates to the data this chart draws
    pub fn data(&self, aggregates: &DashboardAggregates) -> ChartData {
        match self {
            Question::PollutantsByStation => {
                let rows = &aggregates.pollutants_by_station;
                ChartData::Categorical {
                    categories: rows.iter().map(|r| r.station.clone()).collect(),
                    series: vec![
                        Series::new("O₃", rows.iter().map(|r| r.o3).collect()),
                        Series::new("SO₂", rows.iter().map(|r| r.so2).collect()),
                    ],
                }
            }
            Question::WindByStation => {
                let rows = &aggregates.wind_by_station;
                ChartData::Categorical {
                    categories: rows.iter().map(|r| r.station.clone()).collect(),
                    series: vec![Series::new("WSPM", rows.iter().map(|r| r.wspm).collect())],
                }
            }
            Question::WindPollutantCorrelation => {
                ChartData::from_matrix(&aggregates.wind_pollutant_correlation)
            }
            Question::DayTypeO3 => day_type_chart(aggregates, |r| r.o3),
            Question::DayTypeSo2 => day_type_chart(aggregates, |r| r.so2),
            Question::ParticulateWeatherCorrelation => {
                ChartData::from_matrix(&aggregates.particulate_weather_correlation)
            }
            Question::ParticulatesByTemperature => {
                let rows = &aggregates.particulates_by_temp_bin;
                ChartData::Categorical {
                    categories: rows.iter().map(|r| r.temp_bin.clone()).collect(),
                    series: vec![
                        Series::new("PM2.5", rows.iter().map(|r| r.pm25).collect()),
                        Series::new("PM10", rows.iter().map(|r| r.pm10).collect()),
                    ],
                }
            }
        }
    }
}

/// Stations on the x axis, one series per day type
fn day_type_chart<F>(aggregates: &DashboardAggregates, value: F) -> ChartData
where
    F: Fn(&crate::models::DayTypePollutants) -> Option<f64>,
{
    let rows = &aggregates.pollutants_by_day_type;

    let mut categories: Vec<String> = rows.iter().map(|r| r.station.clone()).collect();
    categories.dedup();

    let series = [DayType::Weekday, DayType::Weekend]
        .into_iter()
        .map(|day_type| {
            let values = categories
                .iter()
                .map(|station| {
                    rows.iter()
                        .find(|r| &r.station == station && r.day_type == day_type)
                        .and_then(&value)
                })
                .collect();
            Series::new(day_type.label(), values)
        })
        .collect();

    ChartData::Categorical { categories, series }
}

/// Fixed labelling of a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl Series {
    pub fn new(name: &str, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.to_string(),
            values,
        }
    }
}

/// Fully reduced values handed to a renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartData {
    Categorical {
        categories: Vec<String>,
        series: Vec<Series>,
    },
    Matrix {
        labels: Vec<String>,
        values: Vec<Vec<Option<f64>>>,
    },
}

impl ChartData {
    pub fn from_matrix(matrix: &CorrelationMatrix) -> Self {
        ChartData::Matrix {
            labels: matrix.labels(),
            values: matrix.values.clone(),
        }
    }

    /// True when there is nothing to draw
    pub fn is_empty(&self) -> bool {
        match self {
            ChartData::Categorical { categories, .. } => categories.is_empty(),
            ChartData::Matrix { values, .. } => values.iter().flatten().all(Option::is_none),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub question: Question,
    pub spec: ChartSpec,
    pub data: ChartData,
}

impl Chart {
    pub fn build(question: Question, aggregates: &DashboardAggregates) -> Self {
        Self {
            question,
            spec: question.spec(),
            data: question.data(aggregates),
        }
    }
}
