//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments (or prompts for a point file)
//! - runs fit + residual analysis + synthesis
//! - prints the report and optional plot
//! - writes the generated points and optional JSON summary

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, FitArgs, picker};
use crate::domain::RunConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `bestfit` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    // `bestfit` and `bestfit points.csv` both behave like `bestfit fit ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);
    init_tracing(cli.verbose);

    match cli.command {
        Command::Fit(args) => handle_fit(args),
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "bestfit=debug" } else { "bestfit=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let (config, run) = match &args.file {
        Some(path) => {
            let config = run_config_from_args(&args, path.clone())?;
            let run = pipeline::run_fit(&config)?;
            (config, run)
        }
        None => prompt_and_run(&args)?,
    };

    println!("{}", crate::report::format_run_summary(&run, &config));

    if config.plot {
        let plot = crate::plot::render_ascii_plot(
            run.ingest.points.as_slice(),
            &run.synthesis.points,
            &run.estimate.line,
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    crate::io::write_points_csv(&run.output_path, &run.synthesis.points)?;
    println!("Generated points located in {}", run.output_path.display());

    if let Some(path) = &config.export_summary {
        let summary = crate::io::build_summary(&run, &config);
        crate::io::write_summary_json(path, &summary)?;
        info!(path = %path.display(), "wrote run summary");
    }

    Ok(())
}

/// Ask for a file until one runs through the whole pipeline.
fn prompt_and_run(args: &FitArgs) -> Result<(RunConfig, pipeline::RunOutput), AppError> {
    let listed = picker::show_csv_files();
    let stdin = io::stdin();
    prompt_and_run_with(args, &mut stdin.lock(), &mut io::stdout(), &listed)
}

/// Any failure after a name is accepted, from ingest through synthesis,
/// is printed and the prompt repeats.
fn prompt_and_run_with<R: BufRead, W: Write>(
    args: &FitArgs,
    input: &mut R,
    out: &mut W,
    listed: &[PathBuf],
) -> Result<(RunConfig, pipeline::RunOutput), AppError> {
    loop {
        let path = picker::prompt_loop(input, out, listed)?;
        let config = run_config_from_args(args, path)?;

        match pipeline::run_fit(&config) {
            Ok(run) => return Ok((config, run)),
            Err(err) => {
                debug!(
                    path = %config.input_path.display(),
                    exit_code = err.exit_code(),
                    "run failed, asking again"
                );
                writeln!(out, "{err}\nPlease choose another file.")
                    .map_err(|e| AppError::new(2, format!("Failed to write prompt: {e}")))?;
            }
        }
    }
}

/// Turn parsed flags plus a resolved input path into a [`RunConfig`].
pub fn run_config_from_args(args: &FitArgs, input_path: PathBuf) -> Result<RunConfig, AppError> {
    if !args.delimiter.is_ascii() {
        return Err(AppError::new(
            2,
            format!("Delimiter must be a single ASCII character, got {:?}.", args.delimiter),
        ));
    }

    Ok(RunConfig {
        input_path,
        has_header: !args.no_header,
        delimiter: args.delimiter as u8,
        generator: args.generator,
        count: args.count,
        seed: args.seed,
        bin_count: args.bins,
        max_attempts: args.max_attempts,
        kde_bandwidth: args.bandwidth,
        output_path: args.output.clone(),
        export_summary: args.export_summary.clone(),
        trace: !args.no_trace,
        plot: args.plot,
        plot_width: args.width,
        plot_height: args.height,
    })
}

/// Rewrite argv so `bestfit` defaults to `bestfit fit`.
///
/// Rules:
/// - `bestfit`                        -> `bestfit fit`
/// - `bestfit -n 50 ...`              -> `bestfit fit -n 50 ...`
/// - `bestfit points.csv ...`         -> `bestfit fit -f points.csv ...`
/// - `bestfit --help/--version/-h`    -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("fit".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version || arg1 == "fit" {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "fit".to_string());
    } else {
        argv.splice(1..1, ["fit".to_string(), "-f".to_string()]);
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_becomes_fit() {
        assert_eq!(rewrite_args(argv(&["bestfit"])), argv(&["bestfit", "fit"]));
        assert_eq!(
            rewrite_args(argv(&["bestfit", "-n", "5"])),
            argv(&["bestfit", "fit", "-n", "5"])
        );
        assert_eq!(
            rewrite_args(argv(&["bestfit", "pts.csv", "--plot"])),
            argv(&["bestfit", "fit", "-f", "pts.csv", "--plot"])
        );
        assert_eq!(rewrite_args(argv(&["bestfit", "--help"])), argv(&["bestfit", "--help"]));
    }

    #[test]
    fn flags_map_onto_run_config() {
        let cli = Cli::parse_from(argv(&[
            "bestfit", "fit", "-f", "pts.csv", "--no-header", "-d", ";", "-n", "7", "--seed", "42",
            "-g", "kde", "--bins", "4",
        ]));
        let Command::Fit(args) = cli.command;
        let config = run_config_from_args(&args, PathBuf::from("pts.csv")).unwrap();

        assert!(!config.has_header);
        assert_eq!(config.delimiter, b';');
        assert_eq!(config.count, Some(7));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.generator, crate::domain::GeneratorKind::Kde);
        assert_eq!(config.bin_count, 4);
        assert_eq!(config.max_attempts, 10_000);
        assert!(config.trace);

        let cli = Cli::parse_from(argv(&["bestfit", "fit", "--no-trace"]));
        let Command::Fit(args) = cli.command;
        assert!(!run_config_from_args(&args, PathBuf::from("pts.csv")).unwrap().trace);
    }

    #[test]
    fn non_ascii_delimiter_is_rejected() {
        let cli = Cli::parse_from(argv(&["bestfit", "fit", "-d", "→"]));
        let Command::Fit(args) = cli.command;
        let err = run_config_from_args(&args, PathBuf::from("x.csv")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn prompt_moves_on_after_a_degenerate_file() {
        let dir = tempfile::tempdir().unwrap();
        let flat = dir.path().join("flat.csv");
        let good = dir.path().join("good.csv");
        std::fs::write(&flat, "x,y\n5,1\n5,9\n").unwrap();
        std::fs::write(&good, "x,y\n1,2\n2,4.5\n3,5.5\n4,8\n").unwrap();

        let cli = Cli::parse_from(argv(&["bestfit", "fit", "--seed", "7"]));
        let Command::Fit(args) = cli.command;

        let typed = format!("{}\n{}\n", flat.display(), good.display());
        let mut out = Vec::new();
        let (config, run) = prompt_and_run_with(&args, &mut typed.as_bytes(), &mut out, &[]).unwrap();

        assert_eq!(config.input_path, good);
        assert_eq!(run.ingest.points.len(), 4);
        assert_eq!(run.seed, 7);

        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("identical"), "{shown}");
        assert_eq!(shown.matches("Please choose another file.").count(), 1);
    }

    #[test]
    fn prompt_gives_up_when_input_ends() {
        let dir = tempfile::tempdir().unwrap();
        let single = dir.path().join("one.csv");
        std::fs::write(&single, "x,y\n1,2\n").unwrap();

        let cli = Cli::parse_from(argv(&["bestfit", "fit"]));
        let Command::Fit(args) = cli.command;

        let typed = format!("{}\n", single.display());
        let mut out = Vec::new();
        let err = prompt_and_run_with(&args, &mut typed.as_bytes(), &mut out, &[]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(String::from_utf8(out).unwrap().contains("Need at least 2 point(s), got 1."));
    }
}
