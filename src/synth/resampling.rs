//! Residual-resampling generator.
//!
//! For each synthetic point:
//! 1. draw `x` uniformly over the observed x-range
//! 2. find the x-bin covering `x` (see [`ErrorBins::locate`])
//! 3. pick two residuals `r1`, `r2` from that bin and combine them with two
//!    standard normal draws: `error = r1·z1·(x / width) + r2·z2`
//! 4. reject and redraw while `error` falls outside the observed residual range
//! 5. `y = slope·x + intercept + error`
//!
//! The first term scales with the position of `x` in the range, so the spread of
//! generated errors follows the spread of observed errors along x.
//!
//! Rejection sampling is capped at `max_attempts` per point; running out is a
//! [`FitError::SynthesisStalled`].

use rand::Rng;
use rand_distr::StandardNormal;
use tracing::{debug, warn};

use crate::domain::Point;
use crate::error::FitError;
use crate::synth::bias;
use crate::synth::bins::{ErrorBins, ErrorPair};
use crate::synth::{Synthesis, SynthesisInput, SynthesisOptions, ensure_count};

/// Attempts after which a single point is reported as slow.
const SLOW_ATTEMPTS: usize = 1_000;

pub fn synthesize<R: Rng + ?Sized>(
    input: &SynthesisInput<'_>,
    count: usize,
    opts: &SynthesisOptions,
    rng: &mut R,
) -> Result<Synthesis, FitError> {
    ensure_count(count)?;
    if opts.max_attempts == 0 {
        return Err(FitError::InvalidArgument("max attempts must be > 0".to_string()));
    }

    let bins = ErrorBins::new(input.points, input.residuals, opts.bin_count)?;
    let (x_lo, x_hi) = bins.x_range();
    let width = x_hi - x_lo;
    if !(width > 0.0) {
        return Err(FitError::DegenerateInput(
            "x range has zero width; nothing to sample from".to_string(),
        ));
    }
    if !width.is_finite() {
        return Err(FitError::DegenerateInput(format!(
            "x range [{x_lo:e}, {x_hi:e}] is too wide to sample uniformly"
        )));
    }
    let error_range = bins.error_range();
    debug!(
        bins = bins.bins().len(),
        min_error = error_range.0,
        max_error = error_range.1,
        "resampling residuals"
    );

    let mut points = Vec::with_capacity(count);
    let mut errors = Vec::with_capacity(count);
    let mut error_sum = 0.0;

    for index in 0..count {
        let x = rng.gen_range(x_lo..=x_hi);
        let bin = bins.bin_pairs(bins.locate(x));

        let (error, attempts) = draw_error(rng, bin, x / width, error_range, opts.max_attempts)
            .ok_or(FitError::SynthesisStalled {
                index,
                attempts: opts.max_attempts,
            })?;
        if attempts >= SLOW_ATTEMPTS {
            warn!(index, attempts, x, "rejection sampling needed many attempts");
        }

        error_sum += error;
        points.push(Point::new(x, input.line.predict(x) + error));
        errors.push(error);
    }

    let bias_correction = error_sum / count as f64;
    bias::redistribute(&mut points, bias_correction, rng);

    Ok(Synthesis {
        points,
        errors,
        bias_correction,
    })
}

/// Draw one acceptable residual from `bin`, returning it with the attempt count.
fn draw_error<R: Rng + ?Sized>(
    rng: &mut R,
    bin: &[ErrorPair],
    scale: f64,
    (min_error, max_error): (f64, f64),
    max_attempts: usize,
) -> Option<(f64, usize)> {
    for attempt in 1..=max_attempts {
        let r1 = bin[rng.gen_range(0..bin.len())].residual;
        let z1: f64 = rng.sample(StandardNormal);
        let r2 = bin[rng.gen_range(0..bin.len())].residual;
        let z2: f64 = rng.sample(StandardNormal);

        let error = r1 * z1 * scale + r2 * z2;
        if error >= min_error && error <= max_error {
            return Some((error, attempt));
        }
    }
    None
}
