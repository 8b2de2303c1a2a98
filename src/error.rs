use std::collections::TryReserveError;
use std::io;

use thiserror::Error;

/// Failures reported by the analysis core.
#[derive(Debug, Error)]
pub enum EcgError {
    #[error("required input is absent")]
    NullArgument,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("failed to reserve working buffer: {0}")]
    Alloc(#[from] TryReserveError),

    #[error("analysis failed: {0}")]
    Failed(String),
}

impl EcgError {
    /// Status code of the legacy C interface.
    pub fn code(&self) -> i32 {
        match self {
            EcgError::NullArgument => -1,
            EcgError::InvalidParameter(_) => -2,
            EcgError::Alloc(_) => -3,
            EcgError::Failed(_) => -4,
        }
    }
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("cannot read recording: {0}")]
    Io(#[from] io::Error),

    #[error("malformed recording: {0}")]
    Csv(#[from] csv::Error),

    #[error("no lead or sample could be read")]
    NoData,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot write results: {0}")]
    Io(#[from] io::Error),

    #[error("cannot serialize results: {0}")]
    Json(#[from] serde_json::Error),
}
