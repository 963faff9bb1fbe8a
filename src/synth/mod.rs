//! Synthetic point generation.
//!
//! Three strategies share one entry point, [`synthesize`], selected by
//! [`GeneratorKind`]:
//!
//! - `Resampling` (default): x-binned residual resampling + bias correction
//! - `Gaussian`: normal residuals scaled by RMSE + bias correction
//! - `Kde`: 2-D kernel density sampling of the raw points
//!
//! Every strategy takes its randomness from the caller's RNG, so a seeded
//! generator reproduces a run exactly.

use rand::Rng;

use crate::domain::{FittedLine, GeneratorKind, PointSet, Residual, SyntheticPointSet};
use crate::error::FitError;

pub mod bias;
pub mod bins;
pub mod gaussian;
pub mod kde;
pub mod resampling;

/// Everything the generators may draw on.
#[derive(Debug, Clone, Copy)]
pub struct SynthesisInput<'a> {
    pub points: &'a PointSet,
    pub line: FittedLine,
    /// Aligned with `points`.
    pub residuals: &'a [Residual],
    pub rmse: f64,
}

/// Tuning knobs for the generators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesisOptions {
    /// Number of x-bins for residual resampling.
    pub bin_count: usize,
    /// Rejection-sampling cap per generated point.
    pub max_attempts: usize,
    /// Kernel bandwidth for the density generator.
    pub kde_bandwidth: f64,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            bin_count: 10,
            max_attempts: 10_000,
            kde_bandwidth: 2.0,
        }
    }
}

/// Generator output.
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub points: SyntheticPointSet,
    /// Error added to each point before bias correction, in generation order.
    pub errors: Vec<f64>,
    /// Amount removed per correction step (`error_sum / count`).
    pub bias_correction: f64,
}

/// Generate `count` synthetic points with the chosen strategy.
pub fn synthesize<R: Rng + ?Sized>(
    kind: GeneratorKind,
    input: &SynthesisInput<'_>,
    count: usize,
    opts: &SynthesisOptions,
    rng: &mut R,
) -> Result<Synthesis, FitError> {
    match kind {
        GeneratorKind::Resampling => resampling::synthesize(input, count, opts, rng),
        GeneratorKind::Gaussian => gaussian::synthesize(input, count, rng),
        GeneratorKind::Kde => kde::synthesize(input, count, opts.kde_bandwidth, rng),
    }
}

pub(crate) fn ensure_count(count: usize) -> Result<(), FitError> {
    if count == 0 {
        return Err(FitError::InvalidArgument(
            "synthetic point count must be > 0".to_string(),
        ));
    }
    Ok(())
}
