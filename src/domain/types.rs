//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - held in-memory by the table and the batch driver
//! - exported to CSV/JSON
//! - reloaded later for joins against the input table

use serde::{Deserialize, Serialize};

/// Plate id written to a result row whose reconstruction failed.
///
/// Published rotation models use ids well below 1000, so 1001 can never
/// collide with a genuine plate. A row carrying this id (together with NaN
/// paleolatitude fields) marks a failed record without a separate status
/// column, keeping the output joinable row-for-row with the input.
pub const FAILED_PLATE_ID: u32 = 1001;

/// One row of an Euler-pole model table.
///
/// Rows are created once at load time and never mutated; the owning table
/// keeps them in load order, which is not guaranteed to be sorted by age.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EulerPoleEntry {
    /// Sample identifier. Not unique: published model tables repeat it per
    /// reconstruction age, and it carries the numeric plate id.
    pub sample_id: String,
    /// Pole latitude in decimal degrees.
    pub latitude: f64,
    /// Pole longitude in decimal degrees.
    pub longitude: f64,
    /// Reconstruction age in Myr.
    pub age: u32,
    /// Lower bound of the age estimate in Myr.
    pub age_min: u32,
    /// Upper bound of the age estimate in Myr.
    pub age_max: u32,
}

impl EulerPoleEntry {
    /// Plate association for this row.
    ///
    /// Model tables carry the plate id in the sample-id column; rows whose
    /// sample id is not numeric have no plate association and are invisible
    /// to plate-filtered queries (they still take part in batch computation).
    pub fn plate_id(&self) -> Option<u32> {
        self.sample_id.trim().parse().ok()
    }
}

/// Per-record inputs handed to the reconstruction engine.
///
/// Built fresh from one [`EulerPoleEntry`] per reconstruction call and not
/// retained afterwards.
#[derive(Debug, Clone)]
pub struct ReconstructionParameters {
    /// Sample id of the source row (plate hint for engines that need one).
    pub sample_id: String,
    pub site_latitude: f64,
    pub site_longitude: f64,
    pub age: u32,
    pub age_min: u32,
    pub age_max: u32,
}

impl ReconstructionParameters {
    pub fn from_entry(entry: &EulerPoleEntry) -> Self {
        Self {
            sample_id: entry.sample_id.clone(),
            site_latitude: entry.latitude,
            site_longitude: entry.longitude,
            age: entry.age,
            age_min: entry.age_min,
            age_max: entry.age_max,
        }
    }
}

/// A computed paleolatitude estimate with uncertainty bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaleoLatitudeResult {
    /// Reconstructed latitude at the nominal age, decimal degrees.
    pub palat: f64,
    pub palat_min: f64,
    pub palat_max: f64,
    /// Plate frame the engine actually used; may differ from any input hint.
    pub computed_using_plate_id: u32,
}

/// One output row: the source fields copied verbatim plus the engine result
/// (or the failure sentinel).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultEntry {
    pub sample_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub age: u32,
    pub age_min: u32,
    pub age_max: u32,
    pub palat: f64,
    pub palat_min: f64,
    pub palat_max: f64,
    pub computed_using_plate_id: u32,
}

impl ResultEntry {
    /// Success row: source fields plus the engine's result.
    pub fn success(entry: &EulerPoleEntry, result: &PaleoLatitudeResult) -> Self {
        Self {
            sample_id: entry.sample_id.clone(),
            latitude: entry.latitude,
            longitude: entry.longitude,
            age: entry.age,
            age_min: entry.age_min,
            age_max: entry.age_max,
            palat: result.palat,
            palat_min: result.palat_min,
            palat_max: result.palat_max,
            computed_using_plate_id: result.computed_using_plate_id,
        }
    }

    /// Sentinel row for a failed reconstruction: NaN paleolatitude fields and
    /// [`FAILED_PLATE_ID`].
    pub fn failed(entry: &EulerPoleEntry) -> Self {
        Self {
            sample_id: entry.sample_id.clone(),
            latitude: entry.latitude,
            longitude: entry.longitude,
            age: entry.age,
            age_min: entry.age_min,
            age_max: entry.age_max,
            palat: f64::NAN,
            palat_min: f64::NAN,
            palat_max: f64::NAN,
            computed_using_plate_id: FAILED_PLATE_ID,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.computed_using_plate_id == FAILED_PLATE_ID
    }
}

/// Ordered result rows, exactly one per input row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultTable {
    entries: Vec<ResultEntry>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<ResultEntry>) -> Self {
        Self { entries }
    }

    pub fn push(&mut self, entry: ResultEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ResultEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Options controlling a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Fan records out across threads. Result rows are reassembled in input
    /// order, and per-record failure isolation is identical to the
    /// sequential path.
    pub parallel: bool,
}

/// Summary stats about a loaded table (for reports).
#[derive(Debug, Clone)]
pub struct TableStats {
    pub n_entries: usize,
    pub n_plates: usize,
    pub age_min: u32,
    pub age_max: u32,
}
