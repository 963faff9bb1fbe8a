//! Run summary JSON.
//!
//! The summary is the portable record of one run:
//! - the fitted line (plus the closed-form cross-check)
//! - aggregate error (SSE / RMSE)
//! - how the synthetic points were generated (strategy, seed, count, output)
//!
//! With the seed and the source file, the run can be replayed exactly.

use std::fs::File;
use std::path::Path;

use chrono::Local;

use crate::app::pipeline::RunOutput;
use crate::domain::{RunConfig, RunSummaryFile};
use crate::error::AppError;

/// Assemble the summary for a finished run.
pub fn build_summary(run: &RunOutput, config: &RunConfig) -> RunSummaryFile {
    RunSummaryFile {
        tool: "bestfit".to_string(),
        generated_at: Local::now().to_rfc3339(),
        source: run.ingest.source.clone(),
        n_points: run.ingest.points.len(),
        line: run.estimate.line,
        closed_form: run.closed_form,
        sse: run.residuals.sse,
        rmse: run.residuals.rmse,
        generator: config.generator,
        seed: run.seed,
        synthetic_count: run.synthesis.points.len(),
        output: run.output_path.clone(),
    }
}

/// Write a summary JSON file.
pub fn write_summary_json(path: &Path, summary: &RunSummaryFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create summary JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, summary)
        .map_err(|e| AppError::new(4, format!("Failed to write summary JSON: {e}")))?;

    Ok(())
}
