//! Reporting utilities: residual analysis and formatted terminal output.

pub mod format;
pub mod residuals;

pub use format::*;
pub use residuals::*;
