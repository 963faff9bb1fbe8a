//! Residuals and aggregate error of a fitted line.

use crate::domain::{FittedLine, PointSet, Residual};
use crate::error::FitError;

/// Per-point residuals plus aggregate error, aligned with the source points.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidualReport {
    /// `residuals[i]` belongs to point `i` of the analyzed set.
    pub residuals: Vec<Residual>,
    /// Sum of squared residuals ("total squared loss").
    pub sse: f64,
    /// `sqrt(sse / N)`.
    pub rmse: f64,
}

impl ResidualReport {
    /// `(min, max)` residual.
    pub fn range(&self) -> Option<(f64, f64)> {
        residual_range(&self.residuals)
    }
}

/// Compute residuals of `points` against `line`.
pub fn analyze(points: &PointSet, line: &FittedLine) -> Result<ResidualReport, FitError> {
    if points.is_empty() {
        return Err(FitError::InsufficientData { needed: 1, got: 0 });
    }

    let residuals: Vec<Residual> = points.iter().map(|p| line.residual(p)).collect();
    let sse: f64 = residuals.iter().map(|r| r * r).sum();
    let rmse = (sse / residuals.len() as f64).sqrt();

    Ok(ResidualReport { residuals, sse, rmse })
}

/// `(min, max)` of a residual slice, or `None` if it is empty.
pub fn residual_range(residuals: &[Residual]) -> Option<(f64, f64)> {
    let first = *residuals.first()?;
    Some(
        residuals
            .iter()
            .fold((first, first), |(lo, hi), &r| (lo.min(r), hi.max(r))),
    )
}
