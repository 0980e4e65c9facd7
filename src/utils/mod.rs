pub mod constants;
pub mod progress;
pub mod values;

pub use constants::*;
pub use progress::ProgressReporter;
pub use values::{parse_measurement, parse_timestamp};
