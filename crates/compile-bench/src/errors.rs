use crate::pipeline::Step;
use polars::error::PolarsError;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for the benchmark harness
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Failed to parse configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{step} step failed for {} ({status})", .file.display())]
    StepFailed {
        step: Step,
        file: PathBuf,
        status: ExitReport,
    },

    #[error("Failed to process results: {0}")]
    ResultsProcessing(String),

    #[error("DataFrame error: {0}")]
    DataFrame(String),

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for benchmark operations
pub type BenchResult<T> = Result<T, BenchError>;

/// How an unsuccessful subprocess ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReport {
    Code(i32),
    Signal,
}

impl fmt::Display for ExitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitReport::Code(code) => write!(f, "exit status {}", code),
            ExitReport::Signal => write!(f, "terminated by signal"),
        }
    }
}

impl From<PolarsError> for BenchError {
    fn from(err: PolarsError) -> Self {
        BenchError::DataFrame(err.to_string())
    }
}

impl From<toml::de::Error> for BenchError {
    fn from(err: toml::de::Error) -> Self {
        BenchError::Config(err.to_string())
    }
}

impl BenchError {
    /// True when the error comes from one (file, variant) pipeline rather than the harness itself
    pub fn is_step_failure(&self) -> bool {
        matches!(self, BenchError::StepFailed { .. } | BenchError::Launch { .. })
    }
}
