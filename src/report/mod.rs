//! Reporting utilities: run summaries and table inspection output.

pub mod format;

pub use format::*;
