//! Error types.
//!
//! Two layers:
//!
//! - [`FitError`] is what the estimation/synthesis core returns. Every variant is
//!   terminal for the current run; the core never retries or substitutes values.
//! - [`AppError`] is what the binary reports: a message plus a process exit code.
//!   The CLI converts `FitError` into `AppError` at the boundary.
//!
//! Exit codes:
//! - `2` input/usage problems (files, flags, malformed records)
//! - `3` not enough usable data (too few points, zero x-variance)
//! - `4` computation failures (stalled synthesis, output formatting)

/// Failures of the fitting and synthesis core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    #[error("Need at least {needed} point(s), got {got}.")]
    InsufficientData { needed: usize, got: usize },

    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Synthesis stalled: no residual within the observed range after {attempts} attempts (point {index}).")]
    SynthesisStalled { index: usize, attempts: usize },

    #[error("Malformed record on line {line}: {message}")]
    MalformedRecord { line: u64, message: String },
}

impl FitError {
    /// Exit code used when this error terminates the binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            FitError::MalformedRecord { .. } | FitError::InvalidArgument(_) => 2,
            FitError::InsufficientData { .. } | FitError::DegenerateInput(_) => 3,
            FitError::SynthesisStalled { .. } => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
