//! Core projection queries over an immutable birth series
//!
//! All queries borrow the series read-only and keep derived ages as
//! per-call locals, so repeated calls with identical arguments yield
//! identical results.

use super::series::{YearlyAverageAge, YearlyGroupCounts};
use crate::cohort::BirthSeries;
use crate::error::DemographyError;

/// Age thresholds that carve the population into social buckets
///
/// Children are `[0, worker_age)`, workers `[worker_age, retire_age)`,
/// the elderly `[retire_age, death_age - 1)`. `death_age` is the
/// exclusive upper bound on countable age. There is no default for
/// `retire_age`; callers supply all three thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeBucketConfig {
    pub worker_age: i32,
    pub retire_age: i32,
    pub death_age: i32,
}

impl AgeBucketConfig {
    /// Build a validated config; fails unless
    /// `0 <= worker_age <= retire_age <= death_age`
    pub fn new(worker_age: i32, retire_age: i32, death_age: i32) -> Result<Self, DemographyError> {
        let config = Self {
            worker_age,
            retire_age,
            death_age,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the threshold ordering invariant
    pub fn validate(&self) -> Result<(), DemographyError> {
        if self.worker_age < 0 || self.worker_age > self.retire_age || self.retire_age > self.death_age
        {
            return Err(DemographyError::InvalidRange(format!(
                "age thresholds must satisfy 0 <= worker ({}) <= retire ({}) <= death ({})",
                self.worker_age, self.retire_age, self.death_age
            )));
        }
        Ok(())
    }
}

/// Sum of births over cohorts aged within `[age_low, age_high)` in `query_year`
///
/// A cohort born in year `y` has age `query_year - y`. Cohorts born after
/// the query year (negative age) and cohorts at or past `death_age` are
/// excluded; the death-age cap applies even when `age_high` reaches past
/// it. Returns `0.0` when no cohorts qualify.
pub fn count_in_age_range(
    series: &BirthSeries,
    age_low: i32,
    age_high: i32,
    query_year: i32,
    death_age: i32,
) -> Result<f64, DemographyError> {
    if age_low > age_high {
        return Err(DemographyError::InvalidRange(format!(
            "age_low ({age_low}) exceeds age_high ({age_high})"
        )));
    }

    let sum = series
        .cohorts()
        .iter()
        .map(|c| (query_year - c.year, c.births))
        .filter(|&(age, _)| age >= 0 && age >= age_low && age < age_high && age < death_age)
        .map(|(_, births)| births)
        .sum();
    Ok(sum)
}

/// Birth-weighted mean age over cohorts with `0 <= age < death_age`
///
/// Fails with `DivisionUndefined` when the qualifying birth total is
/// zero; the undefined case is never reported as `0` or `NaN`.
pub fn average_age(
    series: &BirthSeries,
    query_year: i32,
    death_age: i32,
) -> Result<f64, DemographyError> {
    let mut weighted_sum = 0.0;
    let mut total = 0.0;

    for c in series.cohorts() {
        let age = query_year - c.year;
        if age >= 0 && age < death_age {
            weighted_sum += c.births * age as f64;
            total += c.births;
        }
    }

    if total == 0.0 {
        return Err(DemographyError::DivisionUndefined { year: query_year });
    }
    Ok(weighted_sum / total)
}

/// Projection engine for one set of age-bucket thresholds
pub struct ProjectionEngine {
    buckets: AgeBucketConfig,
}

impl ProjectionEngine {
    /// Create an engine with the given bucket thresholds
    pub fn new(buckets: AgeBucketConfig) -> Self {
        Self { buckets }
    }

    pub fn buckets(&self) -> &AgeBucketConfig {
        &self.buckets
    }

    /// Compute group counts for each year in `[start_year, end_year)`
    ///
    /// The `total` and `old` bands run to `death_age - 1`, one year short
    /// of the death-age cutoff applied inside [`count_in_age_range`], so
    /// the oldest countable cohort is excluded from them while still
    /// contributing to [`average_age`].
    pub fn compute_group_series(
        &self,
        series: &BirthSeries,
        start_year: i32,
        end_year: i32,
    ) -> Result<Vec<YearlyGroupCounts>, DemographyError> {
        self.buckets.validate()?;
        let b = self.buckets;

        let mut rows = Vec::with_capacity(end_year.saturating_sub(start_year).max(0) as usize);
        for year in start_year..end_year {
            let total = count_in_age_range(series, 0, b.death_age - 1, year, b.death_age)?;
            let old = count_in_age_range(series, b.retire_age, b.death_age - 1, year, b.death_age)?;
            let worker = count_in_age_range(series, b.worker_age, b.retire_age, year, b.death_age)?;
            let children = count_in_age_range(series, 0, b.worker_age, year, b.death_age)?;

            rows.push(YearlyGroupCounts {
                year,
                total,
                worker,
                children,
                old,
            });
        }
        Ok(rows)
    }

    /// Compute the average age for each year in `[start_year, end_year)`
    ///
    /// A year with no qualifying population aborts the computation with
    /// `DivisionUndefined`.
    pub fn compute_average_age_series(
        &self,
        series: &BirthSeries,
        start_year: i32,
        end_year: i32,
    ) -> Result<Vec<YearlyAverageAge>, DemographyError> {
        self.buckets.validate()?;

        let mut rows = Vec::with_capacity(end_year.saturating_sub(start_year).max(0) as usize);
        for year in start_year..end_year {
            let avg = average_age(series, year, self.buckets.death_age)?;
            rows.push(YearlyAverageAge {
                year,
                average_age: avg,
            });
        }
        Ok(rows)
    }
}
