//! Command-line parsing for the paleolatitude batch tool.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the table/driver code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "paleolat",
    version,
    about = "Batch paleolatitude reconstruction over Euler-pole model tables"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the reconstruction batch and write the result table.
    Compute(ComputeArgs),
    /// Print the ages needed to interpolate within an age window.
    Ages(AgesArgs),
    /// List the plate ids present in a model table.
    Plates(PlatesArgs),
    /// Download a published Euler-pole model table.
    Fetch(FetchArgs),
}

/// Options for a batch run.
#[derive(Debug, Parser, Clone)]
pub struct ComputeArgs {
    /// Euler-pole model table (CSV: sample id, latitude, longitude, age,
    /// age min, age max).
    #[arg(short = 't', long)]
    pub table: PathBuf,

    /// Write the result table CSV here. Without it, the CSV goes to stdout
    /// and the run summary is suppressed.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Also export the batch output (results + diagnostics) as JSON.
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Fan records out across threads (result order is unchanged).
    #[arg(long)]
    pub parallel: bool,

    /// Random seed for the drift engine's noise.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Latitudinal drift applied per Myr (degrees).
    #[arg(long, default_value_t = 0.25)]
    pub drift_rate: f64,

    /// Standard deviation of per-record noise (degrees). 0 disables noise.
    #[arg(long, default_value_t = 1.5)]
    pub noise_deg: f64,

    /// Plate id reported for samples without a numeric plate id.
    #[arg(long, default_value_t = 701)]
    pub default_plate: u32,

    /// Suppress the run summary (exports only).
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

/// Options for a relevant-age query.
#[derive(Debug, Parser)]
pub struct AgesArgs {
    /// Euler-pole model table.
    #[arg(short = 't', long)]
    pub table: PathBuf,

    /// Plate id to query.
    #[arg(short = 'p', long)]
    pub plate: u32,

    /// Window start (Myr).
    #[arg(long)]
    pub min_age: u32,

    /// Window end (Myr).
    #[arg(long)]
    pub max_age: u32,
}

/// Options for the plate listing.
#[derive(Debug, Parser)]
pub struct PlatesArgs {
    /// Euler-pole model table.
    #[arg(short = 't', long)]
    pub table: PathBuf,
}

/// Options for downloading a model table.
#[derive(Debug, Parser)]
pub struct FetchArgs {
    /// Model URL. Defaults to PALEOLAT_MODEL_URL from the environment (.env).
    #[arg(long)]
    pub url: Option<String>,

    /// Write the downloaded table here.
    #[arg(short = 'o', long)]
    pub output: PathBuf,
}
