pub mod dataset_analyzer;

pub use dataset_analyzer::{DatasetAnalyzer, DatasetStatistics, MeasureStats};
