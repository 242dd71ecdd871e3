//! Shared batch pipeline used by the CLI front-end and by tests.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! table load -> engine build -> batch compute
//!
//! The CLI can then focus on presentation (reports, exports).

use std::path::PathBuf;

use crate::batch::{self, BatchOutput};
use crate::cli::ComputeArgs;
use crate::data::EulerPoleTable;
use crate::domain::BatchOptions;
use crate::engine::{DriftConfig, DriftEngine};
use crate::error::AppError;

/// Everything a single batch run needs.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub table_path: PathBuf,
    pub options: BatchOptions,
    pub engine: DriftConfig,
}

/// All computed outputs of a single batch run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub table: EulerPoleTable,
    pub output: BatchOutput,
}

pub fn batch_config_from_args(args: &ComputeArgs) -> BatchConfig {
    BatchConfig {
        table_path: args.table.clone(),
        options: BatchOptions {
            parallel: args.parallel,
        },
        engine: DriftConfig {
            drift_deg_per_myr: args.drift_rate,
            noise_deg: args.noise_deg,
            seed: args.seed,
            default_plate_id: args.default_plate,
        },
    }
}

/// Execute the full batch pipeline and return the computed outputs.
pub fn run_batch(config: &BatchConfig) -> Result<RunOutput, AppError> {
    let table = EulerPoleTable::load_file(&config.table_path)?;
    run_batch_with_table(config, table)
}

/// Execute the batch pipeline with a pre-loaded table.
///
/// Useful for tests and for embedders that already hold a table in memory.
pub fn run_batch_with_table(
    config: &BatchConfig,
    table: EulerPoleTable,
) -> Result<RunOutput, AppError> {
    let engine = DriftEngine::new(config.engine.clone())?;
    let output = batch::compute(&table, &engine, &config.options);
    Ok(RunOutput { table, output })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BatchConfig {
        BatchConfig {
            table_path: PathBuf::new(),
            options: BatchOptions::default(),
            engine: DriftConfig {
                noise_deg: 0.0,
                ..DriftConfig::default()
            },
        }
    }

    #[test]
    fn pipeline_runs_end_to_end_on_in_memory_table() {
        let table = EulerPoleTable::load_text("101,10.0,20.0,60,50,70\n101,10.0,20.0,120,110,130\n").unwrap();
        let run = run_batch_with_table(&config(), table).unwrap();

        assert_eq!(run.output.results.len(), 2);
        assert_eq!(run.output.n_failed(), 0);
        assert_eq!(run.table.all_entries().len(), 2);
    }

    #[test]
    fn missing_table_file_is_a_load_error() {
        let mut cfg = config();
        cfg.table_path = PathBuf::from("does/not/exist.csv");
        let err = run_batch(&cfg).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Load);
    }
}
