//! Closed-form least squares, used as a reference for the incremental estimator.
//!
//! The incremental estimator in `fit::estimator` is the one the pipeline
//! reports. This module solves the same problem in one shot:
//!
//! ```text
//! minimize Σ (y_i - (b0 + b1 x_i))^2
//! ```
//!
//! Implementation choices:
//! - We build the `N x 2` design matrix `[1, x_i]` and solve with SVD, which
//!   handles tall systems (nalgebra's `QR::solve` expects square ones).
//! - A rank-deficient design (all `x` identical) yields `None` instead of a
//!   minimum-norm answer, so callers can tell "no unique line" apart.

use nalgebra::{DMatrix, DVector};

use crate::domain::{FittedLine, PointSet};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Rank check first: SVD happily returns a minimum-norm solution for
    // singular systems, which is not what we want here.
    if svd.rank(1e-12) < x.ncols() {
        return None;
    }

    for &tol in &[1e-12, 1e-10, 1e-8] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Closed-form OLS line through `points`.
///
/// Returns `None` for fewer than two points or zero x-variance.
pub fn closed_form_line(points: &PointSet) -> Option<FittedLine> {
    let n = points.len();
    if n < 2 {
        return None;
    }

    let mut design = Vec::with_capacity(n * 2);
    for p in points {
        design.push(1.0);
        design.push(p.x);
    }
    let x = DMatrix::from_row_slice(n, 2, &design);
    let y = DVector::from_iterator(n, points.iter().map(|p| p.y));

    let beta = solve_least_squares(&x, &y)?;
    Some(FittedLine::new(beta[1], beta[0]))
}
