//! Export synthetic points to CSV.
//!
//! The output is deliberately plain (`x,y` header, six decimals) so it can be
//! fed straight back into `bestfit` or a spreadsheet.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::Point;
use crate::error::AppError;

/// Prefix added to the input file name to form the default output name.
pub const OUTPUT_PREFIX: &str = "gen_";

/// `dir/points.csv` -> `dir/gen_points.csv`.
pub fn output_path_for(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "points.csv".to_string());
    input.with_file_name(format!("{OUTPUT_PREFIX}{name}"))
}

/// Write points to a CSV file at `path`.
pub fn write_points_csv(path: &Path, points: &[Point]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create output CSV '{}': {e}", path.display())))?;

    write_points(BufWriter::new(file), points)
        .map_err(|e| AppError::new(2, format!("Failed to write output CSV '{}': {e}", path.display())))?;

    info!(path = %path.display(), points = points.len(), "wrote generated points");
    Ok(())
}

/// Write the `x,y` table to any writer.
pub fn write_points<W: Write>(mut out: W, points: &[Point]) -> std::io::Result<()> {
    writeln!(out, "x,y")?;
    for p in points {
        writeln!(out, "{:.6},{:.6}", p.x, p.y)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_gets_prefix_in_same_dir() {
        assert_eq!(
            output_path_for(Path::new("data/run1/points.csv")),
            PathBuf::from("data/run1/gen_points.csv")
        );
        assert_eq!(output_path_for(Path::new("pts.csv")), PathBuf::from("gen_pts.csv"));
    }

    #[test]
    fn rows_use_six_decimals() {
        let mut buf = Vec::new();
        write_points(&mut buf, &[Point::new(1.0, -2.5), Point::new(0.1234567, 3.0)]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "x,y\n1.000000,-2.500000\n0.123457,3.000000\n");
    }
}
