pub mod aggregation;
pub mod range_filter;
pub mod statistics;

pub use aggregation::{AggregationPipeline, PARTICULATE_WEATHER_MEASURES, WIND_POLLUTANT_MEASURES};
pub use range_filter::RangeFilter;
pub use statistics::{correlation_matrix, group_means, pearson, GroupStats, Mean};
