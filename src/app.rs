//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads (or downloads) the model table
//! - drives the reconstruction batch
//! - prints reports
//! - writes exports

use clap::Parser;

use crate::cli::{AgesArgs, Command, ComputeArgs, FetchArgs, PlatesArgs};
use crate::data::{EulerPoleTable, ModelClient};
use crate::error::{AppError, ErrorKind};

pub mod pipeline;

/// Entry point for the `paleolat` binary.
pub fn run() -> Result<(), AppError> {
    // We want `paleolat -t table.csv` to behave like `paleolat compute ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the short invocation.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Compute(args) => handle_compute(args),
        Command::Ages(args) => handle_ages(args),
        Command::Plates(args) => handle_plates(args),
        Command::Fetch(args) => handle_fetch(args),
    }
}

fn handle_compute(args: ComputeArgs) -> Result<(), AppError> {
    let config = pipeline::batch_config_from_args(&args);
    let run = pipeline::run_batch(&config)?;

    match &args.output {
        Some(path) => {
            crate::io::export::write_results(path, &run.output.results)?;
            if !args.quiet {
                println!(
                    "{}",
                    crate::report::format_run_summary(&run.table, &run.output, &config.options)
                );
                println!("Results written to {}", path.display());
            }
        }
        None => {
            // Keep stdout machine-readable when no output file was given.
            let mut stdout = std::io::stdout().lock();
            crate::io::export::write_results_to(&mut stdout, &run.output.results)?;
        }
    }

    if let Some(path) = &args.json {
        crate::io::export::write_results_json(path, &run.output)?;
    }

    Ok(())
}

fn handle_ages(args: AgesArgs) -> Result<(), AppError> {
    if args.min_age > args.max_age {
        return Err(AppError::new(
            ErrorKind::Load,
            format!("Invalid age window: min {} > max {}.", args.min_age, args.max_age),
        ));
    }

    let table = EulerPoleTable::load_file(&args.table)?;
    let ages = table.relevant_ages(args.plate, args.min_age, args.max_age);
    print!(
        "{}",
        crate::report::format_relevant_ages(args.plate, args.min_age, args.max_age, &ages)
    );
    Ok(())
}

fn handle_plates(args: PlatesArgs) -> Result<(), AppError> {
    let table = EulerPoleTable::load_file(&args.table)?;
    print!("{}", crate::report::format_plate_listing(&table));
    Ok(())
}

fn handle_fetch(args: FetchArgs) -> Result<(), AppError> {
    let client = match args.url {
        Some(url) => ModelClient::new(url),
        None => ModelClient::from_env()?,
    };

    client.fetch_model_to(&args.output)?;
    println!("Model table from {} written to {}", client.url(), args.output.display());
    Ok(())
}

/// Rewrite argv so `paleolat` defaults to `paleolat compute`.
///
/// Rules:
/// - `paleolat -t x.csv ...`       -> `paleolat compute -t x.csv ...`
/// - `paleolat --help/--version`   -> unchanged (show top-level help/version)
/// - `paleolat <subcommand> ...`   -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        // Bare `paleolat` falls through to clap's missing-subcommand help.
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "compute" | "ages" | "plates" | "fetch");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "compute flags".
    if arg1.starts_with('-') {
        argv.insert(1, "compute".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
