//! Input/output helpers.
//!
//! - delimited-text ingest + validation (`ingest`)
//! - synthetic point CSV export (`export`)
//! - run summary JSON (`summary`)

pub mod export;
pub mod ingest;
pub mod summary;

pub use export::*;
pub use ingest::*;
pub use summary::*;
