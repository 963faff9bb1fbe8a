//! Line fitting.
//!
//! Responsibilities:
//!
//! - incremental least-squares estimate of slope/intercept
//! - the per-step diagnostic trace printed during a run

pub mod estimator;

pub use estimator::*;
