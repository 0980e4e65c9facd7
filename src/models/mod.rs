pub mod aggregate;
pub mod date_range;
pub mod observation;
pub mod table;

pub use aggregate::{
    CorrelationMatrix, DashboardAggregates, DayTypePollutants, StationPollutants, StationWind,
    TempBinParticulates,
};
pub use date_range::DateRange;
pub use observation::{DayType, Measure, Observation, ObservationBuilder};
pub use table::ObservationTable;
