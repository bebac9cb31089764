//! Birth cohort data structures and CSV loading

mod data;
pub mod loader;

pub use data::{BirthCohort, BirthSeries, DecayRule};
pub use loader::{load_series, load_series_from_reader};
