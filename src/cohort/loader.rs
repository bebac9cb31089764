//! Load birth counts from a `Year,Born` CSV file

use std::path::Path;

use csv::{ReaderBuilder, Trim};

use super::BirthSeries;
use crate::error::DemographyError;

/// Raw CSV row matching the `Year,Born` columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Born")]
    born: f64,
}

fn read_series<R: std::io::Read>(
    mut reader: csv::Reader<R>,
) -> Result<BirthSeries, DemographyError> {
    let mut rows = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow =
            result.map_err(|e| DemographyError::MalformedInput(e.to_string()))?;
        rows.push((row.year, row.born));
    }

    BirthSeries::from_rows(rows)
}

/// Load a birth series from a CSV file
///
/// Whitespace around header names and values is tolerated.
pub fn load_series<P: AsRef<Path>>(path: P) -> Result<BirthSeries, DemographyError> {
    let reader = ReaderBuilder::new().trim(Trim::All).from_path(path)?;
    read_series(reader)
}

/// Load a birth series from any reader (e.g., string buffer, network stream)
pub fn load_series_from_reader<R: std::io::Read>(reader: R) -> Result<BirthSeries, DemographyError> {
    let csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    read_series(csv_reader)
}
