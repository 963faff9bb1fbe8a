//! Delimited-text ingest.
//!
//! This module turns a point file into a `PointSet`.
//!
//! Schema (explicit, no sniffing):
//! - an optional header row, controlled by `InputSpec::has_header`
//! - lines starting with `#` are comments
//! - every other record needs at least two fields; the first two must parse as
//!   finite numbers `(x, y)`, extra fields are ignored
//!
//! A record that fails any of these is a `MalformedRecord` carrying its line
//! number. Nothing is skipped silently and no default values are substituted.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use tracing::{info, warn};

use crate::domain::{DatasetStats, Point, PointSet};
use crate::error::{AppError, FitError};

/// How to read the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSpec {
    pub has_header: bool,
    pub delimiter: u8,
}

impl Default for InputSpec {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: b',',
        }
    }
}

/// Ingest output: points in file order plus summary stats.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub source: PathBuf,
    pub points: PointSet,
    pub stats: Option<DatasetStats>,
}

/// Open `path` and read its points.
pub fn load_points(path: &Path, spec: &InputSpec) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open '{}': {e}", path.display())))?;

    let points = read_points(file, spec)?;
    let stats = points.stats();
    info!(path = %path.display(), points = points.len(), "loaded points");

    Ok(IngestedData {
        source: path.to_path_buf(),
        points,
        stats,
    })
}

/// Read points from any delimited-text source.
pub fn read_points<R: Read>(reader: R, spec: &InputSpec) -> Result<PointSet, FitError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(spec.has_header)
        .delimiter(spec.delimiter)
        .comment(Some(b'#'))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    if spec.has_header {
        let headers = reader.headers().map_err(|e| csv_error(&e))?;
        if looks_numeric(headers) {
            warn!(
                header = ?headers,
                "header row parses as a point; it is skipped (use --no-header to keep it)"
            );
        }
    }

    let mut points = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| csv_error(&e))?;
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(idx as u64 + 1);
        points.push(parse_point(&record, line)?);
    }

    Ok(PointSet::new(points))
}

fn parse_point(record: &StringRecord, line: u64) -> Result<Point, FitError> {
    if record.len() < 2 {
        return Err(FitError::MalformedRecord {
            line,
            message: format!("expected at least 2 fields (x, y), found {}", record.len()),
        });
    }
    let x = parse_coord(&record[0], "x", line)?;
    let y = parse_coord(&record[1], "y", line)?;
    Ok(Point::new(x, y))
}

fn parse_coord(raw: &str, name: &str, line: u64) -> Result<f64, FitError> {
    let v = raw.parse::<f64>().map_err(|_| FitError::MalformedRecord {
        line,
        message: format!("invalid {name} value '{raw}'"),
    })?;
    if !v.is_finite() {
        return Err(FitError::MalformedRecord {
            line,
            message: format!("{name} value '{raw}' is not finite"),
        });
    }
    Ok(v)
}

fn looks_numeric(headers: &StringRecord) -> bool {
    headers.len() >= 2 && parse_point(headers, 1).is_ok()
}

fn csv_error(err: &csv::Error) -> FitError {
    FitError::MalformedRecord {
        line: err.position().map(|p| p.line()).unwrap_or(0),
        message: format!("CSV parse error: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_points_after_header_and_comments() {
        let text = "x,y\n# calibration run\n1,2\n -3.5 , 4e1 \n\n2,7,extra\n";
        let points = read_points(text.as_bytes(), &InputSpec::default()).unwrap();
        assert_eq!(
            points.as_slice(),
            &[Point::new(1.0, 2.0), Point::new(-3.5, 40.0), Point::new(2.0, 7.0)]
        );
    }

    #[test]
    fn headerless_semicolon_input() {
        let spec = InputSpec {
            has_header: false,
            delimiter: b';',
        };
        let points = read_points("0;1\n1;3\n".as_bytes(), &spec).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points.as_slice()[1], Point::new(1.0, 3.0));
    }

    #[test]
    fn bad_number_reports_its_line() {
        let text = "x,y\n1,2\n3,abc\n";
        let err = read_points(text.as_bytes(), &InputSpec::default()).unwrap_err();
        match err {
            FitError::MalformedRecord { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("invalid y value 'abc'"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn short_and_non_finite_records_are_rejected() {
        let err = read_points("x,y\n5\n".as_bytes(), &InputSpec::default()).unwrap_err();
        assert!(matches!(err, FitError::MalformedRecord { line: 2, .. }));

        let err = read_points("x,y\nNaN,1\n".as_bytes(), &InputSpec::default()).unwrap_err();
        assert!(matches!(err, FitError::MalformedRecord { line: 2, .. }));
    }
}
