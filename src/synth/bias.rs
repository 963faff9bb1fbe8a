//! Positional bias correction.
//!
//! After generation the synthetic residuals rarely average to zero. The net
//! bias `error_sum / count` is removed `count` times, each time from one point
//! chosen by position in the generated sequence (not by `x`):
//!
//! ```text
//! e     ~ Exp(1), capped at 5
//! s     ~ uniform {-1, +1}
//! index = trunc(count/2 - count/10 · (5 - e) · s)
//! ```
//!
//! Small `e` is the common case and lands near either end of the sequence;
//! `e = 5` lands in the middle. The raw index can reach `count` (or dip just
//! below zero through rounding), so it is clamped into `[0, count)`.

use rand::Rng;
use rand_distr::Exp1;

use crate::domain::Point;

/// Upper cap applied to the exponential draw.
pub const MAX_DRAW: f64 = 5.0;

/// Subtract `error_piece` from `points.len()` positionally-biased picks.
pub fn redistribute<R: Rng + ?Sized>(points: &mut [Point], error_piece: f64, rng: &mut R) {
    let count = points.len();
    if count == 0 {
        return;
    }
    for _ in 0..count {
        let draw: f64 = rng.sample::<f64, _>(Exp1).min(MAX_DRAW);
        let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        points[correction_index(count, draw, sign)].y -= error_piece;
    }
}

/// Index hit by one correction step, clamped into `[0, count)`.
///
/// `count` must be non-zero.
pub fn correction_index(count: usize, draw: f64, sign: f64) -> usize {
    let n = count as f64;
    let raw = (n / 2.0 - n / 10.0 * (MAX_DRAW - draw) * sign).trunc();
    if raw <= 0.0 {
        0
    } else {
        (raw as usize).min(count - 1)
    }
}
