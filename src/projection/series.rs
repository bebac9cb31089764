//! Per-year projection output rows

use serde::{Deserialize, Serialize};

/// Birth-weighted mean age of the living population in one year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyAverageAge {
    pub year: i32,
    pub average_age: f64,
}

/// Age-bucket population counts for one year
///
/// Counts are birth-count aggregates, so they carry the unit of the input
/// series (e.g. tens of thousands of people).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyGroupCounts {
    pub year: i32,
    pub total: f64,
    pub worker: f64,
    pub children: f64,
    pub old: f64,
}

impl YearlyGroupCounts {
    /// Working-age share of the total, `None` when the total is zero
    pub fn worker_rate(&self) -> Option<f64> {
        self.rate(self.worker)
    }

    /// Children share of the total, `None` when the total is zero
    pub fn children_rate(&self) -> Option<f64> {
        self.rate(self.children)
    }

    /// Elderly share of the total, `None` when the total is zero
    pub fn old_rate(&self) -> Option<f64> {
        self.rate(self.old)
    }

    fn rate(&self, count: f64) -> Option<f64> {
        if self.total == 0.0 {
            None
        } else {
            Some(count / self.total)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rates() {
        let row = YearlyGroupCounts {
            year: 2030,
            total: 200.0,
            worker: 100.0,
            children: 60.0,
            old: 40.0,
        };

        assert_relative_eq!(row.worker_rate().unwrap(), 0.5);
        assert_relative_eq!(row.children_rate().unwrap(), 0.3);
        assert_relative_eq!(row.old_rate().unwrap(), 0.2);
    }

    #[test]
    fn test_rates_undefined_when_total_is_zero() {
        let row = YearlyGroupCounts {
            year: 2030,
            total: 0.0,
            worker: 0.0,
            children: 0.0,
            old: 0.0,
        };

        assert_eq!(row.worker_rate(), None);
        assert_eq!(row.children_rate(), None);
        assert_eq!(row.old_rate(), None);
    }
}
