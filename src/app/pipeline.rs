//! Shared "fit pipeline" logic.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest -> incremental fit -> residuals -> synthesis
//!
//! The CLI then focuses on presentation and file output.

use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::domain::{FittedLine, RunConfig};
use crate::error::AppError;
use crate::fit::{Estimate, fit_with_trace};
use crate::io::{IngestedData, InputSpec, load_points, output_path_for};
use crate::math::closed_form_line;
use crate::report::{ResidualReport, analyze};
use crate::synth::{Synthesis, SynthesisInput, SynthesisOptions, synthesize};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    pub estimate: Estimate,
    /// One-shot OLS solution, for comparison with the incremental estimate.
    pub closed_form: Option<FittedLine>,
    pub residuals: ResidualReport,
    pub synthesis: Synthesis,
    /// Seed actually used (drawn fresh when the config has none).
    pub seed: u64,
    pub output_path: PathBuf,
}

/// Execute the full pipeline, reading points from `config.input_path`.
pub fn run_fit(config: &RunConfig) -> Result<RunOutput, AppError> {
    let spec = InputSpec {
        has_header: config.has_header,
        delimiter: config.delimiter,
    };
    let ingest = load_points(&config.input_path, &spec)?;

    run_fit_with_points(config, ingest)
}

/// Execute the pipeline on already-loaded points.
pub fn run_fit_with_points(config: &RunConfig, ingest: IngestedData) -> Result<RunOutput, AppError> {
    let estimate = fit_with_trace(&ingest.points)?;
    let closed_form = closed_form_line(&ingest.points);
    let residuals = analyze(&ingest.points, &estimate.line)?;
    info!(
        slope = estimate.line.slope,
        intercept = estimate.line.intercept,
        rmse = residuals.rmse,
        "fitted line"
    );

    let seed = config.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let count = config.count.unwrap_or(ingest.points.len());
    info!(seed, count, generator = ?config.generator, "generating synthetic points");

    let input = SynthesisInput {
        points: &ingest.points,
        line: estimate.line,
        residuals: &residuals.residuals,
        rmse: residuals.rmse,
    };
    let opts = SynthesisOptions {
        bin_count: config.bin_count,
        max_attempts: config.max_attempts,
        kde_bandwidth: config.kde_bandwidth,
    };
    let synthesis = synthesize(config.generator, &input, count, &opts, &mut rng)?;

    let output_path = config
        .output_path
        .clone()
        .unwrap_or_else(|| output_path_for(&ingest.source));

    Ok(RunOutput {
        ingest,
        estimate,
        closed_form,
        residuals,
        synthesis,
        seed,
        output_path,
    })
}
