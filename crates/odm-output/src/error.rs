//! Error types for odm-output.

use odm_matrix::MatrixError;
use thiserror::Error;

/// Errors that can occur when writing fill output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON write error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Matrix(#[from] MatrixError),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
