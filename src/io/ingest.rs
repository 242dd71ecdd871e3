//! Model-table CSV parsing.
//!
//! This module turns an Euler-pole model CSV (a file path or in-memory text)
//! into typed [`EulerPoleEntry`] rows.
//!
//! Design goals:
//! - **Strict schema**: exactly six columns per row (sample id, latitude,
//!   longitude, age, age min, age max); anything else fails the whole load
//! - **No header row assumed**; `#` comment lines are skipped
//! - **Fail fast**: a half-parsed model table is worse than no table, so the
//!   first malformed row aborts the load with a line-numbered error
//! - **Separation of concerns**: no age queries or batch logic here

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::EulerPoleEntry;
use crate::error::{AppError, ErrorKind};

/// Parse a model table from a file path.
pub fn parse_file(path: &Path) -> Result<Vec<EulerPoleEntry>, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            ErrorKind::Load,
            format!("Failed to open model table '{}': {e}", path.display()),
        )
    })?;
    parse_reader(file)
}

/// Parse a model table from in-memory text.
///
/// Literal two-character `\n` escape sequences are normalized to real
/// newlines first; single-line escaped snippets are common when a table is
/// passed through shells or form fields.
pub fn parse_text(text: &str) -> Result<Vec<EulerPoleEntry>, AppError> {
    let normalized = text.replace("\\n", "\n");
    parse_reader(normalized.as_bytes())
}

fn parse_reader<R: Read>(source: R) -> Result<Vec<EulerPoleEntry>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(source);

    let mut entries = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| {
            AppError::new(ErrorKind::Load, format!("Malformed model table: {e}"))
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        entries.push(parse_record(&record, line)?);
    }
    Ok(entries)
}

fn parse_record(record: &StringRecord, line: u64) -> Result<EulerPoleEntry, AppError> {
    if record.len() != 6 {
        return Err(AppError::new(
            ErrorKind::Load,
            format!(
                "Line {line}: expected 6 columns (sample id, latitude, longitude, age, age min, age max), found {}.",
                record.len()
            ),
        ));
    }

    Ok(EulerPoleEntry {
        sample_id: record[0].to_string(),
        latitude: parse_degrees(&record[1], "latitude", line)?,
        longitude: parse_degrees(&record[2], "longitude", line)?,
        age: parse_age(&record[3], "age", line)?,
        age_min: parse_age(&record[4], "age min", line)?,
        age_max: parse_age(&record[5], "age max", line)?,
    })
}

fn parse_degrees(raw: &str, column: &str, line: u64) -> Result<f64, AppError> {
    raw.parse().map_err(|_| {
        AppError::new(
            ErrorKind::Load,
            format!("Line {line}: invalid {column} value '{raw}'."),
        )
    })
}

fn parse_age(raw: &str, column: &str, line: u64) -> Result<u32, AppError> {
    raw.parse().map_err(|_| {
        AppError::new(
            ErrorKind::Load,
            format!("Line {line}: invalid {column} value '{raw}' (expected a non-negative integer Myr)."),
        )
    })
}
