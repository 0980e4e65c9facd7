use crate::error::{DashboardError, Result};
use crate::models::ObservationTable;
use crate::readers::{ObservationReader, ParquetObservationReader};
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Source format of a dataset file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Csv,
    Parquet,
}

impl DatasetFormat {
    /// Detect the format from the file extension; no extension means CSV
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("csv")
            .to_ascii_lowercase();

        match ext.as_str() {
            "csv" | "txt" => Ok(DatasetFormat::Csv),
            "parquet" | "pq" => Ok(DatasetFormat::Parquet),
            other => Err(DashboardError::InvalidFormat(format!(
                "Unsupported dataset extension: .{}",
                other
            ))),
        }
    }
}

/// Loads a dataset file into a time-ordered observation table
pub struct DatasetLoader {
    use_mmap: bool,
}

impl DatasetLoader {
    pub fn new() -> Self {
        Self { use_mmap: false }
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    pub fn load(&self, path: &Path) -> Result<ObservationTable> {
        let started = Instant::now();
        let format = DatasetFormat::from_path(path)?;

        let rows = match format {
            DatasetFormat::Csv => ObservationReader::with_mmap(self.use_mmap).read_observations(path)?,
            DatasetFormat::Parquet => ParquetObservationReader::new().read_observations(path)?,
        };

        let table = ObservationTable::new(rows);
        info!(
            path = %path.display(),
            ?format,
            rows = table.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "dataset loaded"
        );

        Ok(table)
    }
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_format_detection() {
        assert_eq!(
            DatasetFormat::from_path(Path::new("all_data.csv")).unwrap(),
            DatasetFormat::Csv
        );
        assert_eq!(
            DatasetFormat::from_path(Path::new("all_data.PARQUET")).unwrap(),
            DatasetFormat::Parquet
        );
        assert_eq!(
            DatasetFormat::from_path(Path::new("all_data")).unwrap(),
            DatasetFormat::Csv
        );
        assert!(DatasetFormat::from_path(Path::new("all_data.xlsx")).is_err());
    }

    #[test]
    fn test_load_sorts_rows() -> Result<()> {
        let mut temp_file = Builder::new().suffix(".csv").tempfile()?;
        writeln!(temp_file, "date,station,O3,SO2,PM2.5,PM10,WSPM,TEMP,PRES,temp_bin")?;
        writeln!(temp_file, "2013-03-03 00:00:00,B,1,1,1,1,1,1,1,x")?;
        writeln!(temp_file, "2013-03-01 00:00:00,A,1,1,1,1,1,1,1,x")?;
        writeln!(temp_file, "2013-03-02 00:00:00,C,1,1,1,1,1,1,1,x")?;

        let table = DatasetLoader::new().load(temp_file.path())?;
        let stations: Vec<&str> = table.rows().iter().map(|r| r.station.as_str()).collect();

        assert_eq!(stations, vec!["A", "C", "B"]);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = DatasetLoader::new()
            .load(Path::new("/nonexistent/all_data.csv"))
            .unwrap_err();
        assert!(matches!(err, DashboardError::Io(_)));
    }
}
