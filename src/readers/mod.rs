pub mod csv_reader;
pub mod dataset_loader;
pub mod parquet_reader;

pub use csv_reader::ObservationReader;
pub use dataset_loader::{DatasetFormat, DatasetLoader};
pub use parquet_reader::ParquetObservationReader;
