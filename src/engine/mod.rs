//! Reconstruction engine boundary.
//!
//! The geophysical reconstruction itself lives behind this seam; the batch
//! driver only sees the trait. A per-record failure travels back as an
//! [`EngineError`] value that the driver converts into a sentinel output row
//! before continuing, so no engine error ever crosses the batch boundary as
//! control flow.

use crate::domain::{PaleoLatitudeResult, ReconstructionParameters};

pub mod drift;

pub use drift::*;

/// A single-record reconstruction failure.
///
/// Deliberately not an `AppError`: it is recovered locally by the driver and
/// never surfaces to the caller of a batch run.
#[derive(Debug, Clone)]
pub struct EngineError {
    message: String,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EngineError {}

/// Per-site paleolatitude reconstruction.
///
/// Implementations must be safe for concurrent independent invocations: the
/// driver may fan records out across threads, each call receiving its own
/// freshly built parameters.
pub trait ReconstructionEngine: Send + Sync {
    fn reconstruct(
        &self,
        params: &ReconstructionParameters,
    ) -> Result<PaleoLatitudeResult, EngineError>;
}
