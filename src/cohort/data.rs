//! Birth series storage and decay extension

use serde::{Deserialize, Serialize};

use crate::error::DemographyError;

/// Number of people born in a single calendar year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirthCohort {
    pub year: i32,
    pub births: f64,
}

/// Rule for synthesizing future birth counts from the last known value
///
/// Each synthetic year is `max(previous * factor, floor)`. Once the series
/// drops to the floor it stays there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayRule {
    pub factor: f64,
    pub floor: f64,
}

impl Default for DecayRule {
    fn default() -> Self {
        Self {
            factor: 0.95,
            floor: 500.0,
        }
    }
}

/// Birth counts indexed by year, ordered by strictly increasing year
///
/// The series is the sole owner of its cohort data. Projection queries
/// borrow it immutably; the only mutation after construction is
/// [`extend_to`](BirthSeries::extend_to), which appends synthetic future
/// cohorts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BirthSeries {
    cohorts: Vec<BirthCohort>,
}

impl BirthSeries {
    /// Build a series from `(year, births)` pairs
    ///
    /// Input order does not matter; the series is sorted by year. Fails
    /// with `MalformedInput` on a duplicate year or a negative or
    /// non-finite birth count.
    pub fn from_rows<I>(rows: I) -> Result<Self, DemographyError>
    where
        I: IntoIterator<Item = (i32, f64)>,
    {
        let mut cohorts: Vec<BirthCohort> = rows
            .into_iter()
            .map(|(year, births)| BirthCohort { year, births })
            .collect();

        for c in &cohorts {
            if !c.births.is_finite() {
                return Err(DemographyError::MalformedInput(format!(
                    "non-numeric birth count for year {}",
                    c.year
                )));
            }
            if c.births < 0.0 {
                return Err(DemographyError::MalformedInput(format!(
                    "negative birth count {} for year {}",
                    c.births, c.year
                )));
            }
        }

        cohorts.sort_by_key(|c| c.year);
        for pair in cohorts.windows(2) {
            if pair[0].year == pair[1].year {
                return Err(DemographyError::MalformedInput(format!(
                    "duplicate year {}",
                    pair[0].year
                )));
            }
        }

        Ok(Self { cohorts })
    }

    /// All cohorts in increasing year order
    pub fn cohorts(&self) -> &[BirthCohort] {
        &self.cohorts
    }

    /// Birth count recorded for a year, if present
    pub fn births_in(&self, year: i32) -> Option<f64> {
        self.cohorts
            .binary_search_by_key(&year, |c| c.year)
            .ok()
            .map(|i| self.cohorts[i].births)
    }

    /// Latest year present in the series
    pub fn latest_year(&self) -> Result<i32, DemographyError> {
        self.cohorts
            .last()
            .map(|c| c.year)
            .ok_or(DemographyError::EmptySeries)
    }

    /// Earliest year present in the series
    pub fn earliest_year(&self) -> Result<i32, DemographyError> {
        self.cohorts
            .first()
            .map(|c| c.year)
            .ok_or(DemographyError::EmptySeries)
    }

    pub fn len(&self) -> usize {
        self.cohorts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cohorts.is_empty()
    }

    /// Extend the series through `till_year` inclusive under a decay rule
    ///
    /// Appends one synthetic cohort per missing year, each derived from
    /// the previous year's value. Idempotent: a `till_year` at or below
    /// the current latest year leaves the series unchanged, and a later
    /// call appends only the missing tail, continuing the decay from the
    /// series's true latest value.
    pub fn extend_to(&mut self, till_year: i32, rule: &DecayRule) -> Result<(), DemographyError> {
        let last = self.cohorts.last().ok_or(DemographyError::EmptySeries)?;
        let latest_year = last.year;
        let mut prev = last.births;

        if till_year <= latest_year {
            return Ok(());
        }

        self.cohorts.reserve((till_year - latest_year) as usize);
        for year in latest_year + 1..=till_year {
            prev = (prev * rule.factor).max(rule.floor);
            self.cohorts.push(BirthCohort { year, births: prev });
        }
        Ok(())
    }
}
