//! `bestfit` library crate.
//!
//! Fits a line of best fit to 2-D points incrementally, analyzes the residuals,
//! and generates synthetic points that follow the fitted line with realistic,
//! x-localized noise.
//!
//! The binary (`bestfit`) is a thin wrapper around this library so that
//! core logic is testable without spawning processes.

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
pub mod synth;
