//! Kernel-density generator.
//!
//! This generator ignores the fitted line. It estimates the joint density of the
//! input points with a 2-D Gaussian kernel, evaluates it on a regular
//! `GRID_SIZE x GRID_SIZE` grid spanning the observed x and y ranges, and draws
//! grid cells with probability proportional to their density:
//!
//! - pick a row (x value) by inverse CDF over row totals
//! - pick a column (y value) by inverse CDF within that row
//!
//! Generated points therefore sit on grid coordinates. Kernel normalization is
//! irrelevant for sampling, so only `exp(-d²/2h²)` is summed.

use rand::Rng;

use crate::domain::{Point, PointSet};
use crate::error::FitError;
use crate::synth::{Synthesis, SynthesisInput, ensure_count};

/// Grid resolution along each axis.
pub const GRID_SIZE: usize = 100;

pub fn synthesize<R: Rng + ?Sized>(
    input: &SynthesisInput<'_>,
    count: usize,
    bandwidth: f64,
    rng: &mut R,
) -> Result<Synthesis, FitError> {
    ensure_count(count)?;
    if !(bandwidth.is_finite() && bandwidth > 0.0) {
        return Err(FitError::InvalidArgument(format!(
            "kernel bandwidth must be finite and > 0 (got {bandwidth})"
        )));
    }

    let grid = DensityGrid::estimate(input.points, bandwidth)?;

    let mut points = Vec::with_capacity(count);
    let mut errors = Vec::with_capacity(count);
    for _ in 0..count {
        let u = rng.r#gen::<f64>() * grid.total();
        let p = grid.cell_at(u);
        errors.push(input.line.residual(&p));
        points.push(p);
    }

    Ok(Synthesis {
        points,
        errors,
        bias_correction: 0.0,
    })
}

/// Kernel density evaluated on a regular grid.
#[derive(Debug, Clone)]
pub struct DensityGrid {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Row-major: `density[i * GRID_SIZE + j]` is the density at `(xs[i], ys[j])`.
    density: Vec<f64>,
    /// Cumulative row totals.
    row_cdf: Vec<f64>,
}

impl DensityGrid {
    pub fn estimate(points: &PointSet, bandwidth: f64) -> Result<Self, FitError> {
        let stats = points
            .stats()
            .ok_or(FitError::InsufficientData { needed: 1, got: 0 })?;

        let xs = linspace(stats.x_min, stats.x_max, GRID_SIZE);
        let ys = linspace(stats.y_min, stats.y_max, GRID_SIZE);
        let inv_two_h2 = 1.0 / (2.0 * bandwidth * bandwidth);

        let mut density = Vec::with_capacity(GRID_SIZE * GRID_SIZE);
        let mut row_cdf = Vec::with_capacity(GRID_SIZE);
        let mut running = 0.0;
        for &gx in &xs {
            for &gy in &ys {
                let z: f64 = points
                    .iter()
                    .map(|p| {
                        let d2 = (gx - p.x).powi(2) + (gy - p.y).powi(2);
                        (-d2 * inv_two_h2).exp()
                    })
                    .sum();
                running += z;
                density.push(z);
            }
            row_cdf.push(running);
        }

        if !(running.is_finite() && running > 0.0) {
            return Err(FitError::DegenerateInput(
                "kernel density vanishes on the sampling grid; try a larger bandwidth".to_string(),
            ));
        }

        Ok(Self {
            xs,
            ys,
            density,
            row_cdf,
        })
    }

    pub fn total(&self) -> f64 {
        self.row_cdf[self.row_cdf.len() - 1]
    }

    /// Grid point whose cumulative density first reaches `u` (`0 <= u <= total`).
    pub fn cell_at(&self, u: f64) -> Point {
        let row = self.row_cdf.partition_point(|&c| c < u).min(GRID_SIZE - 1);
        let mut remaining = if row > 0 { u - self.row_cdf[row - 1] } else { u };

        let cells = &self.density[row * GRID_SIZE..(row + 1) * GRID_SIZE];
        let mut col = GRID_SIZE - 1;
        for (j, &z) in cells.iter().enumerate() {
            if remaining <= z {
                col = j;
                break;
            }
            remaining -= z;
        }

        Point::new(self.xs[row], self.ys[col])
    }
}

fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    let n = n.max(2);
    (0..n)
        .map(|i| lo + (hi - lo) * i as f64 / (n as f64 - 1.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FittedLine;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn samples_land_on_grid_within_bounds() {
        let points = PointSet::from_pairs(&[(0.0, 0.0), (1.0, 2.0), (2.0, 4.5), (3.0, 5.5), (4.0, 8.0)]);
        let input = SynthesisInput {
            points: &points,
            line: FittedLine::new(2.0, 0.0),
            residuals: &[0.0, 0.0, 0.5, -0.5, 0.0],
            rmse: 0.3,
        };
        let mut rng = StdRng::seed_from_u64(11);
        let out = synthesize(&input, 50, 2.0, &mut rng).unwrap();
        assert_eq!(out.points.len(), 50);
        for p in &out.points {
            assert!((0.0..=4.0).contains(&p.x));
            assert!((0.0..=8.0).contains(&p.y));
        }
    }

    #[test]
    fn cell_lookup_hits_both_ends() {
        let points = PointSet::from_pairs(&[(0.0, 0.0), (10.0, 10.0)]);
        let grid = DensityGrid::estimate(&points, 1.0).unwrap();
        assert_eq!(grid.cell_at(0.0), Point::new(0.0, 0.0));
        assert_eq!(grid.cell_at(grid.total()), Point::new(10.0, 10.0));
    }

    #[test]
    fn bad_bandwidth_is_rejected() {
        let points = PointSet::from_pairs(&[(0.0, 0.0), (1.0, 1.0)]);
        let input = SynthesisInput {
            points: &points,
            line: FittedLine::new(1.0, 0.0),
            residuals: &[0.0, 0.0],
            rmse: 0.0,
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            synthesize(&input, 1, 0.0, &mut rng),
            Err(FitError::InvalidArgument(_))
        ));
    }
}
