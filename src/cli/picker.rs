//! Interactive point-file prompt.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the prompt provides the "run `bestfit` and type a file name" UX
//!
//! Names without `.csv` get it appended. A missing file is reported and the
//! prompt repeats; `q` (or end of input) cancels.

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Default directory recursion depth for finding CSV files.
const DEFAULT_SEARCH_DEPTH: usize = 2;

/// Discover CSV files and print them as a numbered list.
pub fn show_csv_files() -> Vec<PathBuf> {
    let files = discover_csv_files();
    if !files.is_empty() {
        println!("Found {} CSV file(s):", files.len());
        for (idx, path) in files.iter().enumerate() {
            println!("{:>3}) {}", idx + 1, pretty_path(path));
        }
    }
    files
}

/// The prompt itself, over arbitrary input/output.
pub fn prompt_loop<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    listed: &[PathBuf],
) -> Result<PathBuf, AppError> {
    loop {
        write!(out, "Enter the name of the file with points (q to quit): ")
            .and_then(|_| out.flush())
            .map_err(|e| AppError::new(2, format!("Failed to write prompt: {e}")))?;

        let mut line = String::new();
        let bytes = input
            .read_line(&mut line)
            .map_err(|e| AppError::new(2, format!("Failed to read input: {e}")))?;
        if bytes == 0 {
            return Err(AppError::new(
                2,
                "No input received. Provide a point file with `bestfit fit -f <file.csv>`.",
            ));
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Err(AppError::new(2, "Canceled."));
        }
        if line.is_empty() {
            continue;
        }

        if let Ok(choice) = line.parse::<usize>() {
            if (1..=listed.len()).contains(&choice) {
                return Ok(listed[choice - 1].clone());
            }
        }

        match validate_points_path(&with_csv_extension(line)) {
            Ok(path) => return Ok(path),
            Err(_) => {
                writeln!(out, "Could not find file in directory.\nPlease enter a valid filename.")
                    .map_err(|e| AppError::new(2, format!("Failed to write prompt: {e}")))?;
            }
        }
    }
}

/// Append `.csv` unless the name already mentions it.
pub fn with_csv_extension(name: &str) -> PathBuf {
    if name.to_ascii_lowercase().contains(".csv") {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{name}.csv"))
    }
}

/// Validate the provided path points to an existing file.
pub fn validate_points_path(path: &Path) -> Result<PathBuf, AppError> {
    if !path.exists() {
        return Err(AppError::new(2, format!("File not found: {}", path.display())));
    }
    if path.is_dir() {
        return Err(AppError::new(
            2,
            format!("Expected a file, got a directory: {}", path.display()),
        ));
    }
    Ok(path.to_path_buf())
}

/// Discover `*.csv` files under the current directory (deterministic order).
///
/// Generated `gen_*` files are left out of the listing.
pub fn discover_csv_files() -> Vec<PathBuf> {
    let mut out = Vec::new();
    find_csv_files(Path::new("."), 0, DEFAULT_SEARCH_DEPTH, &mut out);
    out.sort_by(|a, b| pretty_path(a).cmp(&pretty_path(b)));
    out
}

fn find_csv_files(root: &Path, depth: usize, max_depth: usize, out: &mut Vec<PathBuf>) {
    if depth > max_depth {
        return;
    }

    let Ok(entries) = fs::read_dir(root) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            if should_skip_dir(&path) {
                continue;
            }
            find_csv_files(&path, depth + 1, max_depth, out);
            continue;
        }

        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            == Some(true);
        let is_generated = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.starts_with(crate::io::OUTPUT_PREFIX))
            == Some(true);
        if file_type.is_file() && is_csv && !is_generated {
            out.push(path);
        }
    }
}

fn should_skip_dir(path: &Path) -> bool {
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
    matches!(name, ".git" | "target" | "node_modules")
}

fn pretty_path(path: &Path) -> String {
    let stripped = path.strip_prefix("./").unwrap_or(path);
    stripped.display().to_string()
}
