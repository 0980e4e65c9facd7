use crate::error::{DashboardError, Result};
use crate::models::{Measure, Observation};
use crate::utils::constants::{COL_DATE, COL_STATION, COL_TEMP_BIN, DEFAULT_BUFFER_SIZE};
use crate::utils::values::{parse_label, parse_measurement, parse_row_timestamp};
use csv::StringRecord;
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Positions of the required columns within a header row
#[derive(Debug, Clone)]
pub(crate) struct ColumnIndex {
    date: usize,
    station: usize,
    temp_bin: usize,
    measures: Vec<(Measure, usize)>,
}

impl ColumnIndex {
    pub(crate) fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| DashboardError::MissingColumn(name.to_string()))
        };

        let measures = Measure::ALL
            .iter()
            .map(|m| find(m.column_name()).map(|idx| (*m, idx)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            date: find(COL_DATE)?,
            station: find(COL_STATION)?,
            temp_bin: find(COL_TEMP_BIN)?,
            measures,
        })
    }
}

/// Reads observations from a delimited text file
pub struct ObservationReader {
    delimiter: u8,
    use_mmap: bool,
}

impl ObservationReader {
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            use_mmap: false,
        }
    }

    pub fn with_mmap(use_mmap: bool) -> Self {
        Self {
            delimiter: b',',
            use_mmap,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Read all observations from a file, in file order
    pub fn read_observations(&self, path: &Path) -> Result<Vec<Observation>> {
        if self.use_mmap {
            self.read_observations_mmap(path)
        } else {
            let file = File::open(path)?;
            self.read_from(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file))
        }
    }

    /// Read observations using memory-mapped I/O for large files
    fn read_observations_mmap(&self, path: &Path) -> Result<Vec<Observation>> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        self.read_from(&mmap[..])
    }

    /// Read observations from any byte source with a header row
    pub fn read_from<R: Read>(&self, source: R) -> Result<Vec<Observation>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(false)
            .from_reader(source);

        let columns = ColumnIndex::from_headers(reader.headers()?)?;
        let mut observations = Vec::new();

        for (idx, record_result) in reader.records().enumerate() {
            let record = record_result?;
            observations.push(self.parse_record(&record, &columns, idx + 1)?);
        }

        debug!(rows = observations.len(), "parsed CSV observations");
        Ok(observations)
    }

    /// Parse a single data row (`row` is 1-based, header excluded)
    fn parse_record(
        &self,
        record: &StringRecord,
        columns: &ColumnIndex,
        row: usize,
    ) -> Result<Observation> {
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let mut builder = Observation::builder()
            .date(parse_row_timestamp(field(columns.date), row)?)
            .station(field(columns.station).trim())
            .temp_bin(parse_label(field(columns.temp_bin)));

        for (measure, idx) in &columns.measures {
            let value = parse_measurement(field(*idx), measure.column_name(), row)?;
            builder = builder.measure(*measure, value);
        }

        builder.build()
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "No,year,PM2.5,PM10,SO2,O3,TEMP,PRES,WSPM,station,date,temp_bin";

    #[test]
    fn test_read_observations_file() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "{}", HEADER)?;
        writeln!(
            temp_file,
            "1,2013,4.0,4.0,4.0,77.0,-0.7,1023.0,4.4,Aotizhongxin,2013-03-01 00:00:00,\"(-10, 0]\""
        )?;
        writeln!(
            temp_file,
            "2,2013,8.0,8.0,NA,,1.2,1023.2,4.7,Changping,2013-03-01 01:00:00,\"(0, 10]\""
        )?;

        let reader = ObservationReader::new();
        let rows = reader.read_observations(temp_file.path())?;

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].station, "Aotizhongxin");
        assert_eq!(rows[0].o3, Some(77.0));
        assert_eq!(rows[0].pm25, Some(4.0));
        assert_eq!(rows[0].temp, Some(-0.7));
        assert_eq!(rows[0].temp_bin.as_deref(), Some("(-10, 0]"));
        assert_eq!(rows[1].so2, None);
        assert_eq!(rows[1].o3, None);
        assert_eq!(rows[1].date.to_string(), "2013-03-01 01:00:00");

        Ok(())
    }

    #[test]
    fn test_mmap_matches_buffered() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "{}", HEADER)?;
        writeln!(
            temp_file,
            "1,2013,4.0,4.0,4.0,77.0,-0.7,1023.0,4.4,Dingling,2013-03-01,"
        )?;

        let buffered = ObservationReader::new().read_observations(temp_file.path())?;
        let mapped = ObservationReader::with_mmap(true).read_observations(temp_file.path())?;

        assert_eq!(buffered, mapped);
        assert_eq!(mapped[0].temp_bin, None);
        Ok(())
    }

    #[test]
    fn test_missing_column_is_reported() {
        let data = "date,station,O3,SO2,PM2.5,PM10,WSPM,TEMP,temp_bin\n";
        let err = ObservationReader::new().read_from(data.as_bytes()).unwrap_err();

        assert!(matches!(err, DashboardError::MissingColumn(ref c) if c == "PRES"));
    }

    #[test]
    fn test_missing_date_column_is_reported() {
        let data = "station,O3,SO2,PM2.5,PM10,WSPM,TEMP,PRES,temp_bin\n";
        let err = ObservationReader::new().read_from(data.as_bytes()).unwrap_err();

        assert!(matches!(err, DashboardError::MissingColumn(ref c) if c == "date"));
    }

    #[test]
    fn test_unparseable_date_is_reported() {
        let data = "date,station,O3,SO2,PM2.5,PM10,WSPM,TEMP,PRES,temp_bin\n\
                    2013-03-01,A,1,1,1,1,1,1,1,x\n\
                    someday,A,1,1,1,1,1,1,1,x\n";
        let err = ObservationReader::new().read_from(data.as_bytes()).unwrap_err();

        assert!(matches!(err, DashboardError::InvalidDate { row: 2, .. }));
    }

    #[test]
    fn test_semicolon_delimiter() -> Result<()> {
        let data = "date;station;O3;SO2;PM2.5;PM10;WSPM;TEMP;PRES;temp_bin\n\
                    2013-03-01;A;1;2;3;4;5;6;7;x\n";
        let rows = ObservationReader::new()
            .with_delimiter(b';')
            .read_from(data.as_bytes())?;

        assert_eq!(rows[0].so2, Some(2.0));
        assert_eq!(rows[0].pres, Some(7.0));
        Ok(())
    }
}
