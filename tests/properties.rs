use approx::relative_eq;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use bestfit::domain::{GeneratorKind, PointSet};
use bestfit::fit::fit;
use bestfit::report::analyze;
use bestfit::synth::{SynthesisInput, SynthesisOptions, synthesize};

fn point_sets() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-50i32..50, -100.0f64..100.0), 3..60)
        .prop_map(|raw| raw.into_iter().map(|(x, y)| (x as f64, y)).collect())
        .prop_filter("needs two distinct x values", |pairs: &Vec<(f64, f64)>| {
            pairs.iter().any(|p| p.0 != pairs[0].0)
        })
}

proptest! {
    #[test]
    fn fit_ignores_input_order(pairs in point_sets()) {
        let forward = fit(&PointSet::from_pairs(&pairs)).unwrap();
        let mut reversed_pairs = pairs.clone();
        reversed_pairs.reverse();
        let reversed = fit(&PointSet::from_pairs(&reversed_pairs)).unwrap();

        prop_assert!(relative_eq!(forward.slope, reversed.slope, epsilon = 1e-9, max_relative = 1e-9));
        prop_assert!(relative_eq!(forward.intercept, reversed.intercept, epsilon = 1e-9, max_relative = 1e-9));
    }

    #[test]
    fn residuals_sum_to_zero(pairs in point_sets()) {
        let points = PointSet::from_pairs(&pairs);
        let line = fit(&points).unwrap();
        let report = analyze(&points, &line).unwrap();

        let sum: f64 = report.residuals.iter().sum();
        let scale: f64 = 1.0 + pairs.iter().map(|p| p.1.abs() + (line.slope * p.0).abs()).sum::<f64>();
        prop_assert!(sum.abs() <= 1e-9 * scale, "sum = {sum}");
        prop_assert!(relative_eq!(report.rmse, (report.sse / pairs.len() as f64).sqrt(), max_relative = 1e-12));
    }

    #[test]
    fn residual_sum_matches_line_identity(pairs in point_sets()) {
        let points = PointSet::from_pairs(&pairs);
        let line = fit(&points).unwrap();
        let report = analyze(&points, &line).unwrap();

        let n = pairs.len() as f64;
        let sum_x: f64 = pairs.iter().map(|p| p.0).sum();
        let sum_y: f64 = pairs.iter().map(|p| p.1).sum();
        let lhs: f64 = report.residuals.iter().sum();
        let rhs = sum_y - line.slope * sum_x - n * line.intercept;

        let scale: f64 = 1.0 + pairs.iter().map(|p| p.1.abs() + (line.slope * p.0).abs()).sum::<f64>();
        prop_assert!((lhs - rhs).abs() <= 1e-9 * scale, "lhs = {lhs}, rhs = {rhs}");
    }

    #[test]
    fn resampled_points_stay_in_x_range(pairs in point_sets(), seed in any::<u64>(), count in 1usize..40) {
        let points = PointSet::from_pairs(&pairs);
        let line = fit(&points).unwrap();
        let report = analyze(&points, &line).unwrap();
        let input = SynthesisInput {
            points: &points,
            line,
            residuals: &report.residuals,
            rmse: report.rmse,
        };
        let (x_min, x_max) = points.x_range().unwrap();
        let lo = report.residuals.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = report.residuals.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let mut rng = StdRng::seed_from_u64(seed);
        let out = synthesize(GeneratorKind::Resampling, &input, count, &SynthesisOptions::default(), &mut rng);
        prop_assert!(out.is_ok(), "{:?}", out);
        let out = out.unwrap();

        prop_assert_eq!(out.points.len(), count);
        prop_assert_eq!(out.errors.len(), count);
        prop_assert!(out.points.iter().all(|p| p.x >= x_min && p.x <= x_max));
        prop_assert!(out.errors.iter().all(|&e| e >= lo && e <= hi), "errors outside [{lo}, {hi}]");
    }
}
