//! Line-chart rendering for projection output
//!
//! Renders the three summary charts as 1200x800 PNG files using the
//! [`plotters`] bitmap backend, which works in headless environments
//! without system font dependencies.

use std::path::Path;

use plotters::prelude::*;
use thiserror::Error;

use crate::projection::{YearlyAverageAge, YearlyGroupCounts};

/// Errors that can occur during chart generation
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, ChartError>;

const AVERAGE_COLOR: RGBColor = RED;
const TOTAL_COLOR: RGBColor = BLACK;
const WORKER_COLOR: RGBColor = BLUE;
const CHILDREN_COLOR: RGBColor = GREEN;
const OLD_COLOR: RGBColor = RGBColor(255, 140, 0);

/// One named line on a chart
struct LabeledSeries {
    label: &'static str,
    color: RGBColor,
    points: Vec<(f64, f64)>,
}

/// Average age vs. year
pub fn render_average_age_chart(rows: &[YearlyAverageAge], output_path: &Path) -> Result<()> {
    let points: Vec<(f64, f64)> = rows
        .iter()
        .map(|r| (r.year as f64, r.average_age))
        .collect();

    render_line_chart(
        output_path,
        "Population Average Age",
        "Age (years)",
        None,
        &[LabeledSeries {
            label: "Average age",
            color: AVERAGE_COLOR,
            points,
        }],
    )
}

/// Absolute population per age bucket vs. year
pub fn render_group_counts_chart(rows: &[YearlyGroupCounts], output_path: &Path) -> Result<()> {
    let series = [
        LabeledSeries {
            label: "Total",
            color: TOTAL_COLOR,
            points: rows.iter().map(|r| (r.year as f64, r.total)).collect(),
        },
        LabeledSeries {
            label: "Workers",
            color: WORKER_COLOR,
            points: rows.iter().map(|r| (r.year as f64, r.worker)).collect(),
        },
        LabeledSeries {
            label: "Children",
            color: CHILDREN_COLOR,
            points: rows.iter().map(|r| (r.year as f64, r.children)).collect(),
        },
        LabeledSeries {
            label: "Elderly",
            color: OLD_COLOR,
            points: rows.iter().map(|r| (r.year as f64, r.old)).collect(),
        },
    ];

    render_line_chart(
        output_path,
        "Projected Population by Age Group",
        "Population",
        None,
        &series,
    )
}

/// Each bucket's share of the total vs. year, y-axis fixed to [0, 1]
///
/// Years whose rates are undefined (zero total) are skipped, not plotted
/// as zero.
pub fn render_group_rates_chart(rows: &[YearlyGroupCounts], output_path: &Path) -> Result<()> {
    let rate_points = |rate: fn(&YearlyGroupCounts) -> Option<f64>| -> Vec<(f64, f64)> {
        rows.iter()
            .filter_map(|r| rate(r).map(|v| (r.year as f64, v)))
            .collect()
    };

    let series = [
        LabeledSeries {
            label: "Workers",
            color: WORKER_COLOR,
            points: rate_points(YearlyGroupCounts::worker_rate),
        },
        LabeledSeries {
            label: "Children",
            color: CHILDREN_COLOR,
            points: rate_points(YearlyGroupCounts::children_rate),
        },
        LabeledSeries {
            label: "Elderly",
            color: OLD_COLOR,
            points: rate_points(YearlyGroupCounts::old_rate),
        },
    ];

    render_line_chart(
        output_path,
        "Projected Population Structure",
        "Share of total",
        Some((0.0, 1.0)),
        &series,
    )
}

/// Draw one or more labeled line series with markers and a legend box
fn render_line_chart(
    output_path: &Path,
    title: &str,
    y_desc: &str,
    fixed_y_range: Option<(f64, f64)>,
    series: &[LabeledSeries],
) -> Result<()> {
    if series.iter().all(|s| s.points.is_empty()) {
        return Err(ChartError::InvalidData(
            "no data points to plot".to_string(),
        ));
    }

    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for s in series {
        for &(x, y) in &s.points {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    }
    if x_min >= x_max {
        x_max = x_min + 1.0;
    }

    let (y_lo, y_hi) = match fixed_y_range {
        Some(range) => range,
        None => {
            let pad = ((y_max - y_min) * 0.05).max(1.0);
            ((y_min - pad).max(0.0), y_max + pad)
        }
    };

    let root = BitMapBackend::new(output_path, (1200, 800));
    let drawing_area = root.into_drawing_area();

    drawing_area
        .fill(&WHITE)
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&drawing_area)
        .caption(title, ("sans-serif", 40))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(85)
        .build_cartesian_2d(x_min..x_max, y_lo..y_hi)
        .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc(y_desc)
        .x_label_formatter(&|x| format!("{:.0}", x.round()))
        .x_label_style(("sans-serif", 25))
        .y_label_style(("sans-serif", 25))
        .label_style(("sans-serif", 25))
        .draw()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    for s in series {
        if s.points.is_empty() {
            continue;
        }
        let color = s.color;
        chart
            .draw_series(LineSeries::new(
                s.points.iter().cloned(),
                color.stroke_width(2),
            ))
            .map_err(|e| ChartError::Drawing(e.to_string()))?
            .label(s.label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
        chart
            .draw_series(s.points.iter().map(|&p| Circle::new(p, 4, color.filled())))
            .map_err(|e| ChartError::Drawing(e.to_string()))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 25))
        .draw()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    drawing_area
        .present()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn group_rows() -> Vec<YearlyGroupCounts> {
        (0..5)
            .map(|i| YearlyGroupCounts {
                year: 2025 + i * 5,
                total: 1000.0 - 50.0 * i as f64,
                worker: 500.0 - 30.0 * i as f64,
                children: 200.0,
                old: 300.0 + 20.0 * i as f64,
            })
            .collect()
    }

    #[test]
    fn test_average_age_chart_rejects_empty_input() {
        let path = std::env::temp_dir().join("avg_age_empty.png");
        let result = render_average_age_chart(&[], &path);
        assert!(matches!(result, Err(ChartError::InvalidData(_))));
    }

    #[test]
    fn test_rates_chart_rejects_all_undefined_rates() {
        let rows = vec![YearlyGroupCounts {
            year: 2030,
            total: 0.0,
            worker: 0.0,
            children: 0.0,
            old: 0.0,
        }];
        let path = std::env::temp_dir().join("rates_empty.png");
        let result = render_group_rates_chart(&rows, &path);
        assert!(matches!(result, Err(ChartError::InvalidData(_))));
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn test_render_all_charts() {
        let dir = std::env::temp_dir().join("demography_chart_tests");
        fs::create_dir_all(&dir).unwrap();

        let ages: Vec<YearlyAverageAge> = (0..5)
            .map(|i| YearlyAverageAge {
                year: 2025 + i * 5,
                average_age: 40.0 + i as f64,
            })
            .collect();
        let groups = group_rows();

        render_average_age_chart(&ages, &dir.join("average_age.png")).unwrap();
        render_group_counts_chart(&groups, &dir.join("group_counts.png")).unwrap();
        render_group_rates_chart(&groups, &dir.join("group_rates.png")).unwrap();

        assert!(dir.join("average_age.png").exists());
        assert!(dir.join("group_counts.png").exists());
        assert!(dir.join("group_rates.png").exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
