//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/synthesis code stays clean and testable
//! - output changes are localized

use crate::app::pipeline::RunOutput;
use crate::domain::RunConfig;
use crate::fit::TraceStep;

/// Format the full run summary (dataset stats + fit + generation details).
pub fn format_run_summary(run: &RunOutput, config: &RunConfig) -> String {
    let mut out = String::new();

    out.push_str("=== bestfit - line of best fit + synthetic points ===\n");
    out.push_str(&format!("Input: {}\n", run.ingest.source.display()));
    if let Some(stats) = &run.ingest.stats {
        out.push_str(&format!(
            "Points: n={} | x=[{:.4}, {:.4}] | y=[{:.4}, {:.4}]\n",
            stats.n_points, stats.x_min, stats.x_max, stats.y_min, stats.y_max
        ));
    }

    if config.trace {
        out.push('\n');
        out.push_str(&format_trace(&run.estimate.trace));
    }

    out.push_str(&format!("\nTotal squared loss: {:.6}\n", run.residuals.sse));
    out.push_str(&format!("RMSE: {:.6}\n", run.residuals.rmse));
    if let Some((lo, hi)) = run.residuals.range() {
        out.push_str(&format!("Residual range: [{lo:.6}, {hi:.6}]\n"));
    }

    out.push_str(&format!("\nSlope: {:.5}\n", run.estimate.line.slope));
    out.push_str(&format!("Intercept: {:.5}\n", run.estimate.line.intercept));
    if let Some(cf) = &run.closed_form {
        out.push_str(&format!(
            "Closed-form check: |dslope|={:.3e} |dintercept|={:.3e}\n",
            (cf.slope - run.estimate.line.slope).abs(),
            (cf.intercept - run.estimate.line.intercept).abs(),
        ));
    }

    out.push_str(&format!(
        "\nGenerator: {} | seed={} | count={} | bias correction={:.6}\n",
        config.generator.display_name(),
        run.seed,
        run.synthesis.points.len(),
        run.synthesis.bias_correction,
    ));

    out
}

/// Format the every-10th-point trace of the incremental fit.
pub fn format_trace(trace: &[TraceStep]) -> String {
    let mut out = String::from("Loss of every 10th point (observed - predicted):\n");
    out.push_str(&format!(
        "{:>6}  {:>14}  {:>14}  {:>14}\n",
        "point", "residual", "slope loss", "intercept loss"
    ));
    for step in trace {
        out.push_str(&format!(
            "{:>6}  {:>14.6}  {:>14.6}  {:>14.6}\n",
            step.index, step.residual, step.slope_delta, step.intercept_delta
        ));
    }
    out
}
