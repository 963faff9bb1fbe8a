//! Incremental least-squares line estimator.
//!
//! Given the full point set we:
//! - compute `x̄` and `ȳ` up front (two-pass mean)
//! - walk the points in input order, accumulating
//!   `Sxy = Σ (x - x̄)(y - ȳ)` and `Sxx = Σ (x - x̄)^2`
//! - recompute `slope = Sxy / Sxx` and `intercept = ȳ - x̄·slope` after every point
//!
//! Because the recomputation always uses the cumulative sums, the final line is
//! the ordinary least squares solution whatever the input order; the
//! intermediate lines only feed the diagnostic trace.

use tracing::debug;

use crate::domain::{FittedLine, PointSet};
use crate::error::FitError;

/// A trace step is recorded for every `TRACE_EVERY`-th point (0, 10, 20, ...).
pub const TRACE_EVERY: usize = 10;

/// One diagnostic step of the incremental fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceStep {
    /// Index of the point in input order.
    pub index: usize,
    /// `y_i - (slope·x_i + intercept)` under the line just updated with point `i`.
    pub residual: f64,
    /// Previous slope minus current slope.
    pub slope_delta: f64,
    /// Previous intercept minus current intercept.
    pub intercept_delta: f64,
}

/// Output of the incremental fit.
#[derive(Debug, Clone)]
pub struct Estimate {
    pub line: FittedLine,
    pub trace: Vec<TraceStep>,
}

/// Fit the best line through `points`.
pub fn fit(points: &PointSet) -> Result<FittedLine, FitError> {
    fit_with_trace(points).map(|est| est.line)
}

/// Fit the best line through `points`, keeping the per-step trace.
pub fn fit_with_trace(points: &PointSet) -> Result<Estimate, FitError> {
    let n = points.len();
    if n < 2 {
        return Err(FitError::InsufficientData { needed: 2, got: n });
    }

    let (x_sum, y_sum) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    let x_mean = x_sum / n as f64;
    let y_mean = y_sum / n as f64;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut slope = 0.0;
    let mut intercept = 0.0;
    let mut trace = Vec::with_capacity(n / TRACE_EVERY + 1);

    for (i, p) in points.iter().enumerate() {
        let (old_slope, old_intercept) = (slope, intercept);
        let dx = p.x - x_mean;
        sxy += dx * (p.y - y_mean);
        sxx += dx * dx;

        // Every x seen so far sits on the mean: keep the previous line.
        if sxx > 0.0 {
            slope = sxy / sxx;
            intercept = y_mean - x_mean * slope;
        }

        if i % TRACE_EVERY == 0 {
            let step = TraceStep {
                index: i,
                residual: p.y - (slope * p.x + intercept),
                slope_delta: old_slope - slope,
                intercept_delta: old_intercept - intercept,
            };
            debug!(
                index = step.index,
                residual = step.residual,
                slope_delta = step.slope_delta,
                intercept_delta = step.intercept_delta,
                "incremental fit step"
            );
            trace.push(step);
        }
    }

    if sxx <= 0.0 || all_x_equal(points) {
        return Err(FitError::DegenerateInput(
            "all x values are identical; the least-squares slope is undefined".to_string(),
        ));
    }

    Ok(Estimate {
        line: FittedLine::new(slope, intercept),
        trace,
    })
}

fn all_x_equal(points: &PointSet) -> bool {
    let mut iter = points.iter();
    let Some(first) = iter.next() else {
        return true;
    };
    iter.all(|p| p.x == first.x)
}
