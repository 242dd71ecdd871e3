//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - Euler-pole model rows (`EulerPoleEntry`)
//! - per-record engine inputs/outputs (`ReconstructionParameters`, `PaleoLatitudeResult`)
//! - batch outputs (`ResultEntry`, `ResultTable`)

pub mod types;

pub use types::*;
