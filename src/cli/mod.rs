//! Command-line parsing for the line fitter / point generator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fitting/synthesis code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::GeneratorKind;

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "bestfit", version, about = "Line of best fit + synthetic point generator")]
pub struct Cli {
    /// Enable debug-level logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit a line to a point file, report residuals, and write `gen_<file>`.
    ///
    /// Without `--file`, asks for the file name interactively.
    Fit(FitArgs),
}

/// Options for fitting and generation.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Point file (x in the first column, y in the second).
    #[arg(short = 'f', long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Treat the first row as data instead of a header.
    #[arg(long)]
    pub no_header: bool,

    /// Field delimiter (single ASCII character).
    #[arg(short = 'd', long, default_value_t = ',')]
    pub delimiter: char,

    /// Synthetic generation strategy.
    #[arg(short = 'g', long, value_enum, env = "BESTFIT_GENERATOR", default_value_t = GeneratorKind::Resampling)]
    pub generator: GeneratorKind,

    /// Number of synthetic points (defaults to the number of input points).
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Random seed; omit for a fresh seed (printed so the run can be replayed).
    #[arg(long, env = "BESTFIT_SEED")]
    pub seed: Option<u64>,

    /// Number of x-bins used to localize residual resampling.
    #[arg(long, default_value_t = 10)]
    pub bins: usize,

    /// Rejection-sampling attempts per synthetic point before giving up.
    #[arg(long, default_value_t = 10_000)]
    pub max_attempts: usize,

    /// Kernel bandwidth for `--generator kde`.
    #[arg(long, default_value_t = 2.0)]
    pub bandwidth: f64,

    /// Output CSV (defaults to `gen_<input file name>` next to the input).
    #[arg(short = 'o', long, value_name = "CSV")]
    pub output: Option<PathBuf>,

    /// Export a JSON run summary (line, errors, seed, output path).
    #[arg(long = "export-summary", value_name = "JSON")]
    pub export_summary: Option<PathBuf>,

    /// Skip the incremental fit trace (every 10th point) in the report.
    #[arg(long)]
    pub no_trace: bool,

    /// Render an ASCII plot of source and synthetic points.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}
