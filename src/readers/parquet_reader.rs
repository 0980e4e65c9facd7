use crate::error::{DashboardError, Result};
use crate::models::{Measure, Observation};
use crate::utils::constants::{COL_DATE, COL_STATION, COL_TEMP_BIN, DEFAULT_PARQUET_BATCH_SIZE};
use crate::utils::values::{finite_or_none, parse_label, parse_row_timestamp};
use arrow::array::{Array, ArrayRef, Date32Array, Float64Array, StringArray, TimestampMicrosecondArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, TimeUnit};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDateTime;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Reads observations from an Apache Parquet file
pub struct ParquetObservationReader {
    batch_size: usize,
}

impl ParquetObservationReader {
    pub fn new() -> Self {
        Self {
            batch_size: DEFAULT_PARQUET_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Read all observations, in file order
    pub fn read_observations(&self, path: &Path) -> Result<Vec<Observation>> {
        let file = File::open(path)?;
        let parquet_reader = ParquetRecordBatchReaderBuilder::try_new(file)?
            .with_batch_size(self.batch_size)
            .build()?;

        let mut observations = Vec::new();

        for batch_result in parquet_reader {
            let batch = batch_result?;
            let offset = observations.len();
            self.read_batch(&batch, offset, &mut observations)?;
        }

        debug!(rows = observations.len(), "parsed Parquet observations");
        Ok(observations)
    }

    /// Convert one record batch; `offset` is the number of rows already read
    fn read_batch(
        &self,
        batch: &RecordBatch,
        offset: usize,
        out: &mut Vec<Observation>,
    ) -> Result<()> {
        let dates = read_dates(batch, offset)?;

        let stations = column_as(batch, COL_STATION, &DataType::Utf8)?;
        let stations = downcast::<StringArray>(&stations, COL_STATION)?;

        let temp_bins = column_as(batch, COL_TEMP_BIN, &DataType::Utf8)?;
        let temp_bins = downcast::<StringArray>(&temp_bins, COL_TEMP_BIN)?;

        let measure_arrays = Measure::ALL
            .iter()
            .map(|m| column_as(batch, m.column_name(), &DataType::Float64).map(|a| (*m, a)))
            .collect::<Result<Vec<_>>>()?;
        let measures = measure_arrays
            .iter()
            .map(|(m, array)| downcast::<Float64Array>(array, m.column_name()).map(|a| (*m, a)))
            .collect::<Result<Vec<_>>>()?;

        for (i, date) in dates.into_iter().enumerate() {
            let row = offset + i + 1;

            if stations.is_null(i) {
                return Err(DashboardError::MissingData(format!(
                    "station at row {}",
                    row
                )));
            }

            let temp_bin = if temp_bins.is_null(i) {
                None
            } else {
                parse_label(temp_bins.value(i))
            };

            let mut builder = Observation::builder()
                .date(date)
                .station(stations.value(i).trim())
                .temp_bin(temp_bin);

            for (measure, values) in &measures {
                let value = if values.is_null(i) {
                    None
                } else {
                    finite_or_none(values.value(i))
                };
                builder = builder.measure(*measure, value);
            }

            out.push(builder.build()?);
        }

        Ok(())
    }
}

impl Default for ParquetObservationReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetch a column by name and cast it to the requested type
fn column_as(batch: &RecordBatch, name: &str, data_type: &DataType) -> Result<ArrayRef> {
    let schema = batch.schema();
    let (idx, _) = schema
        .column_with_name(name)
        .ok_or_else(|| DashboardError::MissingColumn(name.to_string()))?;
    Ok(cast(batch.column(idx), data_type)?)
}

fn downcast<'a, T: 'static>(array: &'a ArrayRef, name: &str) -> Result<&'a T> {
    array.as_any().downcast_ref::<T>().ok_or_else(|| {
        DashboardError::InvalidFormat(format!("Invalid {} column type", name))
    })
}

/// Decode the date column from text, date or timestamp storage
fn read_dates(batch: &RecordBatch, offset: usize) -> Result<Vec<NaiveDateTime>> {
    let schema = batch.schema();
    let (idx, field) = schema
        .column_with_name(COL_DATE)
        .map(|(idx, field)| (idx, field.data_type().clone()))
        .ok_or_else(|| DashboardError::MissingColumn(COL_DATE.to_string()))?;
    let column = batch.column(idx);

    let null_date = |i: usize| DashboardError::InvalidDate {
        row: offset + i + 1,
        value: "null".to_string(),
    };

    match field {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => {
            let array = cast(column, &DataType::Utf8)?;
            let strings = downcast::<StringArray>(&array, COL_DATE)?;
            (0..strings.len())
                .map(|i| {
                    if strings.is_null(i) {
                        Err(null_date(i))
                    } else {
                        parse_row_timestamp(strings.value(i), offset + i + 1)
                    }
                })
                .collect()
        }
        DataType::Timestamp(_, _) => {
            let array = cast(column, &DataType::Timestamp(TimeUnit::Microsecond, None))?;
            let stamps = downcast::<TimestampMicrosecondArray>(&array, COL_DATE)?;
            (0..stamps.len())
                .map(|i| {
                    if stamps.is_null(i) {
                        return Err(null_date(i));
                    }
                    stamps.value_as_datetime(i).ok_or_else(|| null_date(i))
                })
                .collect()
        }
        DataType::Date32 | DataType::Date64 => {
            let array = cast(column, &DataType::Date32)?;
            let days = downcast::<Date32Array>(&array, COL_DATE)?;
            (0..days.len())
                .map(|i| {
                    if days.is_null(i) {
                        return Err(null_date(i));
                    }
                    days.value_as_date(i)
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                        .ok_or_else(|| null_date(i))
                })
                .collect()
        }
        other => Err(DashboardError::InvalidFormat(format!(
            "Unsupported date column type: {}",
            other
        ))),
    }
}
