pub mod observation;
pub mod schema;
pub mod summary;

pub use observation::{
    CleanDataset, CleanObservation, CoercedObservation, ContinuousValues, IndicatorValues,
    RawTable, Season, TimestampedObservation,
};
pub use schema::{ColumnPresence, ContinuousColumn, IndicatorColumn, SchemaBinding};
pub use summary::{ClimateSummary, RainfallSeries, TemperatureSummary};
