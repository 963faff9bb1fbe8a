//! Residuals binned by x.
//!
//! The resampling generator draws residuals "local" to a generated `x`. To do
//! that we pair every residual with its point's `x`, sort the pairs by `x`, and
//! cut the sorted sequence into contiguous bins.
//!
//! Bin layout for `N` pairs and `B` bins:
//! - `size = N / B` (real-valued)
//! - bin `k` (1-based) spans sorted indices `[floor(size·(k-1)), floor(size·k))`,
//!   with the last bin always ending at `N`
//! - when `size < 1` (fewer pairs than bins) a single bin spans everything

use crate::domain::{PointSet, Residual};
use crate::error::FitError;

/// A residual together with the `x` of the point it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorPair {
    pub x: f64,
    pub residual: Residual,
}

/// Half-open index range `[start, end)` into the x-sorted pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorBin {
    pub start: usize,
    pub end: usize,
}

impl ErrorBin {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

#[derive(Debug, Clone)]
pub struct ErrorBins {
    pairs: Vec<ErrorPair>,
    bins: Vec<ErrorBin>,
    min_error: f64,
    max_error: f64,
}

impl ErrorBins {
    /// Pair, sort and bin `residuals` by the `x` of the matching point.
    pub fn new(points: &PointSet, residuals: &[Residual], bin_count: usize) -> Result<Self, FitError> {
        if residuals.is_empty() {
            return Err(FitError::InsufficientData { needed: 1, got: 0 });
        }
        if residuals.len() != points.len() {
            return Err(FitError::InvalidArgument(format!(
                "{} residuals for {} points; residuals must align with points",
                residuals.len(),
                points.len()
            )));
        }
        if bin_count == 0 {
            return Err(FitError::InvalidArgument("bin count must be > 0".to_string()));
        }

        let mut pairs: Vec<ErrorPair> = points
            .iter()
            .zip(residuals)
            .map(|(p, &residual)| ErrorPair { x: p.x, residual })
            .collect();
        // `sort_by` is stable: equal x keep their input order.
        pairs.sort_by(|a, b| a.x.total_cmp(&b.x));

        let first = residuals[0];
        let (min_error, max_error) = residuals
            .iter()
            .fold((first, first), |(lo, hi), &r| (lo.min(r), hi.max(r)));

        let bins = layout(pairs.len(), bin_count);

        Ok(Self {
            pairs,
            bins,
            min_error,
            max_error,
        })
    }

    pub fn pairs(&self) -> &[ErrorPair] {
        &self.pairs
    }

    pub fn bins(&self) -> &[ErrorBin] {
        &self.bins
    }

    /// `(min x, max x)` over all pairs.
    pub fn x_range(&self) -> (f64, f64) {
        (self.pairs[0].x, self.pairs[self.pairs.len() - 1].x)
    }

    /// `(min residual, max residual)` over all pairs.
    pub fn error_range(&self) -> (f64, f64) {
        (self.min_error, self.max_error)
    }

    /// Index of the first bin whose upper x-boundary is at or after `x`.
    ///
    /// The upper boundary of a bin is the `x` of its last pair. The scan is
    /// linear so ties resolve to the earliest bin.
    pub fn locate(&self, x: f64) -> usize {
        self.bins
            .iter()
            .position(|b| x <= self.pairs[b.end - 1].x)
            .unwrap_or(self.bins.len() - 1)
    }

    /// The pairs inside bin `idx`.
    pub fn bin_pairs(&self, idx: usize) -> &[ErrorPair] {
        let bin = self.bins[idx];
        &self.pairs[bin.start..bin.end]
    }
}

fn layout(n: usize, bin_count: usize) -> Vec<ErrorBin> {
    let size = n as f64 / bin_count as f64;
    if size < 1.0 {
        return vec![ErrorBin { start: 0, end: n }];
    }

    let mut bins = Vec::with_capacity(bin_count);
    let mut start = 0;
    for k in 1..=bin_count {
        let end = if k == bin_count {
            n
        } else {
            ((size * k as f64).floor() as usize).min(n)
        };
        if end > start {
            bins.push(ErrorBin { start, end });
            start = end;
        }
    }
    bins
}
