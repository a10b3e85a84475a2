pub mod chart;
pub mod error;
pub mod loader;
pub mod series;

pub use error::DataError;
pub use loader::{load, load_series, SampleMatrix};
pub use series::{ComparisonDataset, ComparisonSide, Operation, OperationSeries, Orientation};
