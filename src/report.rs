//! Report selection and tabular output for projection results
//!
//! Presentation layer over the projection rows: year-stride sampling plus
//! CSV and JSON writers. Rendering-library concerns live in [`crate::chart`].

use std::io::Write;

use serde::Serialize;

use crate::error::DemographyError;
use crate::projection::{YearlyAverageAge, YearlyGroupCounts};

/// A projection row keyed by calendar year
pub trait YearRow {
    fn year(&self) -> i32;
}

impl YearRow for YearlyAverageAge {
    fn year(&self) -> i32 {
        self.year
    }
}

impl YearRow for YearlyGroupCounts {
    fn year(&self) -> i32 {
        self.year
    }
}

/// Keep rows whose calendar year is a multiple of `stride`
///
/// A stride of 5 selects years like 2025, 2030, 2035. A stride at or
/// below 1 keeps every row.
pub fn sample_stride<T: YearRow + Clone>(rows: &[T], stride: i32) -> Vec<T> {
    if stride <= 1 {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|r| r.year() % stride == 0)
        .cloned()
        .collect()
}

#[derive(Serialize)]
struct AverageAgeRecord {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "AverageAge")]
    average_age: f64,
}

#[derive(Serialize)]
struct GroupRecord {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Total")]
    total: f64,
    #[serde(rename = "Worker")]
    worker: f64,
    #[serde(rename = "Children")]
    children: f64,
    #[serde(rename = "Old")]
    old: f64,
    #[serde(rename = "WorkerRate")]
    worker_rate: Option<f64>,
    #[serde(rename = "ChildrenRate")]
    children_rate: Option<f64>,
    #[serde(rename = "OldRate")]
    old_rate: Option<f64>,
}

/// Write `Year,AverageAge` rows as CSV
pub fn write_average_age_csv<W: Write>(
    writer: W,
    rows: &[YearlyAverageAge],
) -> Result<(), DemographyError> {
    let mut w = csv::Writer::from_writer(writer);
    for r in rows {
        w.serialize(AverageAgeRecord {
            year: r.year,
            average_age: r.average_age,
        })?;
    }
    w.flush()?;
    Ok(())
}

/// Write group counts and shares as CSV
///
/// An undefined rate (zero total) serializes as an empty cell rather
/// than `0`.
pub fn write_group_csv<W: Write>(
    writer: W,
    rows: &[YearlyGroupCounts],
) -> Result<(), DemographyError> {
    let mut w = csv::Writer::from_writer(writer);
    for r in rows {
        w.serialize(GroupRecord {
            year: r.year,
            total: r.total,
            worker: r.worker,
            children: r.children,
            old: r.old,
            worker_rate: r.worker_rate(),
            children_rate: r.children_rate(),
            old_rate: r.old_rate(),
        })?;
    }
    w.flush()?;
    Ok(())
}

/// Both derived tables of one projection run
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionReport {
    pub average_age: Vec<YearlyAverageAge>,
    pub groups: Vec<YearlyGroupCounts>,
}

/// Write the full report as pretty-printed JSON
pub fn write_report_json<W: Write>(
    writer: W,
    report: &ProjectionReport,
) -> Result<(), DemographyError> {
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_row(year: i32, total: f64) -> YearlyGroupCounts {
        YearlyGroupCounts {
            year,
            total,
            worker: total / 2.0,
            children: total / 4.0,
            old: total / 4.0,
        }
    }

    #[test]
    fn test_sample_stride_keeps_multiples() {
        let rows: Vec<YearlyGroupCounts> = (2023..2040).map(|y| group_row(y, 100.0)).collect();
        let sampled = sample_stride(&rows, 5);

        let years: Vec<i32> = sampled.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2025, 2030, 2035]);
    }

    #[test]
    fn test_sample_stride_one_keeps_everything() {
        let rows: Vec<YearlyGroupCounts> = (2023..2028).map(|y| group_row(y, 100.0)).collect();
        assert_eq!(sample_stride(&rows, 1).len(), rows.len());
        assert_eq!(sample_stride(&rows, 0).len(), rows.len());
    }

    #[test]
    fn test_average_age_csv_output() {
        let rows = vec![
            YearlyAverageAge {
                year: 2025,
                average_age: 41.5,
            },
            YearlyAverageAge {
                year: 2030,
                average_age: 43.25,
            },
        ];

        let mut buf = Vec::new();
        write_average_age_csv(&mut buf, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text, "Year,AverageAge\n2025,41.5\n2030,43.25\n");
    }

    #[test]
    fn test_group_csv_leaves_undefined_rates_empty() {
        let rows = vec![YearlyGroupCounts {
            year: 2030,
            total: 0.0,
            worker: 0.0,
            children: 0.0,
            old: 0.0,
        }];

        let mut buf = Vec::new();
        write_group_csv(&mut buf, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Year,Total,Worker,Children,Old,WorkerRate,ChildrenRate,OldRate"
        );
        assert_eq!(lines.next().unwrap(), "2030,0.0,0.0,0.0,0.0,,,");
    }

    #[test]
    fn test_report_json_round_trip() {
        let report = ProjectionReport {
            average_age: vec![YearlyAverageAge {
                year: 2025,
                average_age: 40.0,
            }],
            groups: vec![group_row(2025, 400.0)],
        };

        let mut buf = Vec::new();
        write_report_json(&mut buf, &report).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["average_age"][0]["year"], 2025);
        assert_eq!(value["groups"][0]["total"], 400.0);
    }
}
