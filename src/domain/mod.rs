//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - observations (`Point`, `PointSet`)
//! - fit outputs (`FittedLine`, `Residual`)
//! - run configuration (`RunConfig`, `GeneratorKind`) and the JSON run summary

pub mod types;

pub use types::*;
