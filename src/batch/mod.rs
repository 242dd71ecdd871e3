//! Batch reconstruction driver.
//!
//! Runs the reconstruction engine over every table entry and collects the
//! rows into a [`ResultTable`], with two guarantees:
//!
//! - exactly one result row per input row, in input order, for any N ≥ 0
//! - a failing record yields a sentinel row (NaN paleolatitudes, plate id
//!   [`FAILED_PLATE_ID`]), never an aborted batch
//!
//! The per-record step returns its outcome as a value; engine errors are
//! converted here and do not propagate past this module.
//!
//! [`FAILED_PLATE_ID`]: crate::domain::FAILED_PLATE_ID

use rayon::prelude::*;
use serde::Serialize;

use crate::data::EulerPoleTable;
use crate::domain::{
    BatchOptions, EulerPoleEntry, ReconstructionParameters, ResultEntry, ResultTable,
};
use crate::engine::ReconstructionEngine;

/// Diagnostic for one failed record.
#[derive(Debug, Clone, Serialize)]
pub struct RecordError {
    /// Zero-based input row index.
    pub index: usize,
    pub sample_id: String,
    pub message: String,
}

/// Output of a batch run: the result table plus per-record diagnostics.
///
/// `record_errors` is reporting detail only; the failure already shows up
/// as a sentinel row at the same index in `results`.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutput {
    pub results: ResultTable,
    pub record_errors: Vec<RecordError>,
}

impl BatchOutput {
    pub fn n_ok(&self) -> usize {
        self.results.len() - self.record_errors.len()
    }

    pub fn n_failed(&self) -> usize {
        self.record_errors.len()
    }
}

/// Run the engine over every table entry.
///
/// Sequential by default; with `options.parallel` the records are computed
/// across threads and reassembled in input order, with failure isolation
/// identical to the sequential path. Record computations share nothing but
/// the read-only table. An empty table yields an empty result table.
pub fn compute<E>(table: &EulerPoleTable, engine: &E, options: &BatchOptions) -> BatchOutput
where
    E: ReconstructionEngine + ?Sized,
{
    let entries = table.all_entries();

    let outcomes: Vec<(ResultEntry, Option<RecordError>)> = if options.parallel {
        entries
            .par_iter()
            .enumerate()
            .map(|(index, entry)| compute_record(engine, entry, index))
            .collect()
    } else {
        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| compute_record(engine, entry, index))
            .collect()
    };

    let mut results = ResultTable::new();
    let mut record_errors = Vec::new();
    for (row, error) in outcomes {
        results.push(row);
        if let Some(error) = error {
            record_errors.push(error);
        }
    }

    BatchOutput {
        results,
        record_errors,
    }
}

/// The isolated per-record step. Failure comes back as a value.
fn compute_record<E>(
    engine: &E,
    entry: &EulerPoleEntry,
    index: usize,
) -> (ResultEntry, Option<RecordError>)
where
    E: ReconstructionEngine + ?Sized,
{
    let params = ReconstructionParameters::from_entry(entry);
    match engine.reconstruct(&params) {
        Ok(result) => (ResultEntry::success(entry, &result), None),
        Err(error) => (
            ResultEntry::failed(entry),
            Some(RecordError {
                index,
                sample_id: entry.sample_id.clone(),
                message: error.to_string(),
            }),
        ),
    }
}
