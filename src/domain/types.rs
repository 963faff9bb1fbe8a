//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting and synthesis
//! - exported to CSV/JSON
//! - rebuilt cheaply in tests

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A single `(x, y)` observation. Both coordinates are finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Observed minus predicted `y` for one point.
pub type Residual = f64;

/// Generated points, owned by the caller once returned.
pub type SyntheticPointSet = Vec<Point>;

/// Ordered observations, in input order.
///
/// Created once from input and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        Self::new(pairs.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// `(min x, max x)`, or `None` for an empty set.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        self.stats().map(|s| (s.x_min, s.x_max))
    }

    pub fn stats(&self) -> Option<DatasetStats> {
        DatasetStats::compute(&self.points)
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// The model `y = slope·x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FittedLine {
    pub slope: f64,
    pub intercept: f64,
}

impl FittedLine {
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    pub fn residual(&self, p: &Point) -> Residual {
        p.y - self.predict(p.x)
    }
}

/// Summary stats about a set of points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub n_points: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl DatasetStats {
    pub fn compute(points: &[Point]) -> Option<Self> {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;

        for p in points {
            x_min = x_min.min(p.x);
            x_max = x_max.max(p.x);
            y_min = y_min.min(p.y);
            y_max = y_max.max(p.y);
        }

        if !x_min.is_finite() || !x_max.is_finite() || !y_min.is_finite() || !y_max.is_finite() {
            return None;
        }

        Some(Self {
            n_points: points.len(),
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }
}

/// Which synthesis strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    /// Resample observed residuals locally by x-bin (default).
    Resampling,
    /// Draw residuals from a normal distribution scaled by RMSE and position.
    Gaussian,
    /// Sample points from a 2-D kernel density estimate of the input.
    Kde,
}

impl GeneratorKind {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            GeneratorKind::Resampling => "resampled residuals",
            GeneratorKind::Gaussian => "gaussian residuals",
            GeneratorKind::Kde => "kernel density",
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input_path: PathBuf,
    pub has_header: bool,
    pub delimiter: u8,

    pub generator: GeneratorKind,
    /// Number of synthetic points; `None` means "as many as the input has".
    pub count: Option<usize>,
    /// RNG seed; `None` draws a fresh seed (which is then reported).
    pub seed: Option<u64>,

    pub bin_count: usize,
    pub max_attempts: usize,
    pub kde_bandwidth: f64,

    pub output_path: Option<PathBuf>,
    pub export_summary: Option<PathBuf>,

    pub trace: bool,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
}

/// A saved run summary (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummaryFile {
    pub tool: String,
    pub generated_at: String,
    pub source: PathBuf,
    pub n_points: usize,
    pub line: FittedLine,
    pub closed_form: Option<FittedLine>,
    pub sse: f64,
    pub rmse: f64,
    pub generator: GeneratorKind,
    pub seed: u64,
    pub synthetic_count: usize,
    pub output: PathBuf,
}
