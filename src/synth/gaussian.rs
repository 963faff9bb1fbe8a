//! Gaussian-residual generator.
//!
//! Instead of resampling observed residuals, each error is drawn from a normal
//! distribution with the fit's RMSE as standard deviation, scaled by the
//! position of `x` in the range:
//!
//! ```text
//! error = N(0, rmse) · 2·x / width
//! ```
//!
//! There is no rejection step. The same positional bias correction as the
//! resampling generator is applied afterwards.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::domain::Point;
use crate::error::FitError;
use crate::synth::{Synthesis, SynthesisInput, bias, ensure_count};

pub fn synthesize<R: Rng + ?Sized>(
    input: &SynthesisInput<'_>,
    count: usize,
    rng: &mut R,
) -> Result<Synthesis, FitError> {
    ensure_count(count)?;

    let (x_lo, x_hi) = input.points.x_range().ok_or(FitError::InsufficientData {
        needed: 1,
        got: 0,
    })?;
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

    let normal = Normal::new(0.0, input.rmse)
        .map_err(|e| FitError::InvalidArgument(format!("residual spread {}: {e}", input.rmse)))?;

    let mut points = Vec::with_capacity(count);
    let mut errors = Vec::with_capacity(count);
    let mut error_sum = 0.0;

    for _ in 0..count {
        let x = rng.gen_range(x_lo..=x_hi);
        let error = normal.sample(rng) * 2.0 * x / width;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FittedLine, PointSet};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn zero_rmse_stays_on_the_line() {
        let points = PointSet::from_pairs(&[(1.0, 3.0), (2.0, 5.0), (3.0, 7.0)]);
        let line = FittedLine::new(2.0, 1.0);
        let input = SynthesisInput {
            points: &points,
            line,
            residuals: &[0.0, 0.0, 0.0],
            rmse: 0.0,
        };
        let mut rng = StdRng::seed_from_u64(5);
        let out = synthesize(&input, 12, &mut rng).unwrap();
        assert_eq!(out.points.len(), 12);
        for p in &out.points {
            assert!((1.0..=3.0).contains(&p.x));
            assert!((p.y - line.predict(p.x)).abs() < 1e-12);
        }
    }

    #[test]
    fn negative_spread_is_rejected() {
        let points = PointSet::from_pairs(&[(1.0, 3.0), (2.0, 5.0)]);
        let input = SynthesisInput {
            points: &points,
            line: FittedLine::new(2.0, 1.0),
            residuals: &[0.0, 0.0],
            rmse: -1.0,
        };
        let mut rng = StdRng::seed_from_u64(5);
        assert!(matches!(
            synthesize(&input, 2, &mut rng),
            Err(FitError::InvalidArgument(_))
        ));
    }

    #[test]
    fn overflowing_x_range_is_degenerate() {
        let points = PointSet::from_pairs(&[(-1e308, 0.0), (0.0, 0.0), (1e308, 0.0)]);
        let input = SynthesisInput {
            points: &points,
            line: FittedLine::new(0.0, 0.0),
            residuals: &[0.0, 0.0, 0.0],
            rmse: 0.0,
        };
        let mut rng = StdRng::seed_from_u64(5);
        assert!(matches!(
            synthesize(&input, 3, &mut rng),
            Err(FitError::DegenerateInput(_))
        ));
    }
}
