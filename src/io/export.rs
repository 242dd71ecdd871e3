//! Export batch results to CSV and JSON.
//!
//! The CSV output is the canonical result table: a `#` column comment line,
//! then one data line per input row, ten comma-separated fields. It stays
//! joinable row-for-row with the input table even when records failed.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::batch::BatchOutput;
use crate::domain::ResultTable;
use crate::error::{AppError, ErrorKind};

const RESULT_HEADER: &str =
    "# sample id, latitude, longitude, age, age min, age_max, palat, palat min, palat max, plate id";

/// Write the result table to a CSV file.
pub fn write_results(path: &Path, results: &ResultTable) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(
            ErrorKind::Load,
            format!("Failed to create result CSV '{}': {e}", path.display()),
        )
    })?;
    write_results_to(&mut file, results)
}

/// Write the result table to any writer.
///
/// Degree-valued fields are fixed-point at 5 decimals; ages and the plate id
/// are plain integers. Fails with a State error when no computation has
/// produced a row yet.
pub fn write_results_to(out: &mut impl Write, results: &ResultTable) -> Result<(), AppError> {
    if results.is_empty() {
        return Err(AppError::new(
            ErrorKind::State,
            "No paleolatitude results to write - run a computation first.",
        ));
    }

    writeln!(out, "{RESULT_HEADER}").map_err(write_err)?;
    for entry in results.entries() {
        writeln!(
            out,
            "{},{:.5},{:.5},{},{},{},{:.5},{:.5},{:.5},{}",
            entry.sample_id,
            entry.latitude,
            entry.longitude,
            entry.age,
            entry.age_min,
            entry.age_max,
            entry.palat,
            entry.palat_min,
            entry.palat_max,
            entry.computed_using_plate_id,
        )
        .map_err(write_err)?;
    }

    Ok(())
}

/// Write the full batch output (results + per-record diagnostics) as JSON.
pub fn write_results_json(path: &Path, output: &BatchOutput) -> Result<(), AppError> {
    if output.results.is_empty() {
        return Err(AppError::new(
            ErrorKind::State,
            "No paleolatitude results to write - run a computation first.",
        ));
    }

    let file = File::create(path).map_err(|e| {
        AppError::new(
            ErrorKind::Load,
            format!("Failed to create result JSON '{}': {e}", path.display()),
        )
    })?;
    serde_json::to_writer_pretty(file, output)
        .map_err(|e| AppError::new(ErrorKind::Load, format!("Failed to write result JSON: {e}")))
}

fn write_err(e: std::io::Error) -> AppError {
    AppError::new(ErrorKind::Load, format!("Failed to write result CSV: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EulerPoleEntry, PaleoLatitudeResult, ResultEntry, FAILED_PLATE_ID};

    fn entry(sample_id: &str, age: u32) -> EulerPoleEntry {
        EulerPoleEntry {
            sample_id: sample_id.to_string(),
            latitude: 12.34567,
            longitude: -45.67891,
            age,
            age_min: age.saturating_sub(5),
            age_max: age + 5,
        }
    }

    fn success_row(sample_id: &str, age: u32, palat: f64) -> ResultEntry {
        ResultEntry::success(
            &entry(sample_id, age),
            &PaleoLatitudeResult {
                palat,
                palat_min: palat - 1.5,
                palat_max: palat + 1.5,
                computed_using_plate_id: 101,
            },
        )
    }

    #[test]
    fn empty_table_is_a_state_error() {
        let mut buf = Vec::new();
        let err = write_results_to(&mut buf, &ResultTable::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::State);
        assert!(buf.is_empty());
    }

    #[test]
    fn header_names_the_ten_columns() {
        let mut table = ResultTable::new();
        table.push(success_row("101", 60, -31.25));

        let mut buf = Vec::new();
        write_results_to(&mut buf, &table).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let header = text.lines().next().unwrap();
        assert!(header.starts_with('#'));
        assert_eq!(header.matches(',').count(), 9, "{header}");
    }

    #[test]
    fn round_trip_preserves_values_to_five_decimals() {
        let mut table = ResultTable::new();
        table.push(success_row("101", 60, -31.2512345));
        table.push(success_row("102", 120, 7.0000049));

        let mut buf = Vec::new();
        write_results_to(&mut buf, &table).unwrap();
        let text = String::from_utf8(buf).unwrap();

        for (line, expected) in text.lines().skip(1).zip(table.entries()) {
            let fields: Vec<&str> = line.split(',').collect();
            assert_eq!(fields.len(), 10);
            assert_eq!(fields[0], expected.sample_id);

            let lat: f64 = fields[1].parse().unwrap();
            let lon: f64 = fields[2].parse().unwrap();
            let palat: f64 = fields[6].parse().unwrap();
            let palat_min: f64 = fields[7].parse().unwrap();
            let palat_max: f64 = fields[8].parse().unwrap();
            assert!((lat - expected.latitude).abs() <= 1e-5);
            assert!((lon - expected.longitude).abs() <= 1e-5);
            assert!((palat - expected.palat).abs() <= 1e-5);
            assert!((palat_min - expected.palat_min).abs() <= 1e-5);
            assert!((palat_max - expected.palat_max).abs() <= 1e-5);

            let age: u32 = fields[3].parse().unwrap();
            assert_eq!(age, expected.age);
            let plate: u32 = fields[9].parse().unwrap();
            assert_eq!(plate, expected.computed_using_plate_id);
        }
    }

    #[test]
    fn failed_rows_serialize_the_sentinel() {
        let mut table = ResultTable::new();
        table.push(ResultEntry::failed(&entry("404", 80)));

        let mut buf = Vec::new();
        write_results_to(&mut buf, &table).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let line = text.lines().nth(1).unwrap();
        let fields: Vec<&str> = line.split(',').collect();

        assert_eq!(fields[9], FAILED_PLATE_ID.to_string());
        for palat_field in &fields[6..9] {
            let value: f64 = palat_field.parse().unwrap();
            assert!(value.is_nan(), "expected NaN, got {palat_field}");
        }
    }
}
