//! Demographic System CLI
//!
//! Loads a `Year,Born` CSV, extends the birth series to the projection
//! horizon, and writes the derived tables and charts.

use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use demographic_system::{
    chart,
    cohort::{self, DecayRule},
    report::{self, ProjectionReport},
    AgeBucketConfig, ProjectionEngine,
};

#[derive(Parser, Debug)]
#[command(
    name = "demographic_system",
    about = "Project population age structure from annual birth counts"
)]
struct Args {
    /// Input CSV with Year,Born columns
    #[arg(long, default_value = "born.csv")]
    input: PathBuf,

    /// Last year of the projection horizon (inclusive for extension)
    #[arg(long, default_value_t = 2100)]
    till_year: i32,

    /// First year of the reported series
    #[arg(long, default_value_t = 2023)]
    start_year: i32,

    /// Age at which people enter the workforce
    #[arg(long, default_value_t = 20)]
    worker_age: i32,

    /// Age at which workers retire
    #[arg(long, default_value_t = 50)]
    retire_age: i32,

    /// Exclusive upper bound on countable age
    #[arg(long, default_value_t = 79)]
    death_age: i32,

    /// Year-over-year decay factor for synthetic future births
    #[arg(long, default_value_t = 0.95)]
    decay_factor: f64,

    /// Lower bound for synthetic future births
    #[arg(long, default_value_t = 500.0)]
    floor: f64,

    /// Report every Nth calendar year
    #[arg(long, default_value_t = 5)]
    stride: i32,

    /// Directory for CSV, JSON, and chart output
    #[arg(long, default_value = "output")]
    out_dir: PathBuf,

    /// Skip PNG chart rendering
    #[arg(long)]
    no_charts: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut series = cohort::load_series(&args.input)
        .with_context(|| format!("failed to load birth data from {}", args.input.display()))?;
    log::info!(
        "loaded {} cohorts, years {}..={}",
        series.len(),
        series.earliest_year()?,
        series.latest_year()?
    );

    let rule = DecayRule {
        factor: args.decay_factor,
        floor: args.floor,
    };
    series.extend_to(args.till_year, &rule)?;
    log::info!("extended series through {}", args.till_year);

    let buckets = AgeBucketConfig::new(args.worker_age, args.retire_age, args.death_age)?;
    let engine = ProjectionEngine::new(buckets);

    let average_age = engine.compute_average_age_series(&series, args.start_year, args.till_year)?;
    let groups = engine.compute_group_series(&series, args.start_year, args.till_year)?;
    log::info!("computed {} projection years", groups.len());

    let sampled_ages = report::sample_stride(&average_age, args.stride);
    let sampled_groups = report::sample_stride(&groups, args.stride);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create {}", args.out_dir.display()))?;

    let age_csv = args.out_dir.join("average_age.csv");
    report::write_average_age_csv(File::create(&age_csv)?, &sampled_ages)?;

    let group_csv = args.out_dir.join("groups.csv");
    report::write_group_csv(File::create(&group_csv)?, &sampled_groups)?;

    let report_json = args.out_dir.join("report.json");
    report::write_report_json(
        File::create(&report_json)?,
        &ProjectionReport {
            average_age: sampled_ages.clone(),
            groups: sampled_groups.clone(),
        },
    )?;

    if !args.no_charts {
        chart::render_average_age_chart(&sampled_ages, &args.out_dir.join("average_age.png"))?;
        chart::render_group_counts_chart(&sampled_groups, &args.out_dir.join("group_counts.png"))?;
        chart::render_group_rates_chart(&sampled_groups, &args.out_dir.join("group_rates.png"))?;
        log::info!("charts written to {}", args.out_dir.display());
    }

    println!("Demographic System v0.1.0");
    println!("=========================\n");
    println!(
        "Projection {}..{} (worker {}, retire {}, death {})\n",
        args.start_year, args.till_year, args.worker_age, args.retire_age, args.death_age
    );
    println!(
        "{:>6} {:>10} {:>12} {:>12} {:>12} {:>12}",
        "Year", "AvgAge", "Total", "Worker", "Children", "Old"
    );
    println!("{}", "-".repeat(70));
    for (age_row, group_row) in sampled_ages.iter().zip(&sampled_groups) {
        println!(
            "{:>6} {:>10.2} {:>12.1} {:>12.1} {:>12.1} {:>12.1}",
            group_row.year,
            age_row.average_age,
            group_row.total,
            group_row.worker,
            group_row.children,
            group_row.old
        );
    }

    println!("\nTables written to: {}", args.out_dir.display());
    Ok(())
}
