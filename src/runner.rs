//! Projection runner for batch runs over one extended series
//!
//! Loads and extends the birth series once, then allows running many
//! projections with different bucket configurations without re-reading
//! the CSV file. The series is never mutated after construction, so
//! scenario batches can share it across threads.

use rayon::prelude::*;

use crate::cohort::{loader, BirthSeries, DecayRule};
use crate::error::DemographyError;
use crate::projection::{AgeBucketConfig, ProjectionEngine, YearlyAverageAge, YearlyGroupCounts};

/// Pre-extended series runner for efficient batch projections
///
/// # Example
/// ```ignore
/// let runner = ProjectionRunner::from_csv_path("born.csv", 2100, &DecayRule::default())?;
///
/// for retire_age in [50, 60] {
///     let buckets = AgeBucketConfig::new(20, retire_age, 79)?;
///     let rows = runner.run_groups(buckets, 2023, 2100)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ProjectionRunner {
    series: BirthSeries,
}

impl ProjectionRunner {
    /// Create a runner from an already loaded (and extended) series
    pub fn new(series: BirthSeries) -> Self {
        Self { series }
    }

    /// Load a series from CSV and extend it through `till_year`
    pub fn from_csv_path<P: AsRef<std::path::Path>>(
        path: P,
        till_year: i32,
        rule: &DecayRule,
    ) -> Result<Self, DemographyError> {
        let mut series = loader::load_series(path)?;
        series.extend_to(till_year, rule)?;
        Ok(Self { series })
    }

    /// The extended series snapshot
    pub fn series(&self) -> &BirthSeries {
        &self.series
    }

    /// Run one group projection over `[start_year, end_year)`
    pub fn run_groups(
        &self,
        buckets: AgeBucketConfig,
        start_year: i32,
        end_year: i32,
    ) -> Result<Vec<YearlyGroupCounts>, DemographyError> {
        ProjectionEngine::new(buckets).compute_group_series(&self.series, start_year, end_year)
    }

    /// Run one average-age projection over `[start_year, end_year)`
    pub fn run_average_age(
        &self,
        death_age: i32,
        start_year: i32,
        end_year: i32,
    ) -> Result<Vec<YearlyAverageAge>, DemographyError> {
        let buckets = AgeBucketConfig::new(0, 0, death_age)?;
        ProjectionEngine::new(buckets).compute_average_age_series(
            &self.series,
            start_year,
            end_year,
        )
    }

    /// Run group projections for several bucket configurations in parallel
    ///
    /// Results are returned in the same order as `configs`.
    pub fn run_group_scenarios(
        &self,
        configs: &[AgeBucketConfig],
        start_year: i32,
        end_year: i32,
    ) -> Result<Vec<Vec<YearlyGroupCounts>>, DemographyError> {
        configs
            .par_iter()
            .map(|buckets| self.run_groups(*buckets, start_year, end_year))
            .collect()
    }
}
