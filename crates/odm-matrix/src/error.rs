use thiserror::Error;

use odm_core::CoreError;

#[derive(Debug, Error)]
pub enum MatrixError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Malformed JSON, malformed cell key, or malformed leaf.
    #[error("matrix document error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} distinct cells exceed the u32 index space")]
    TooManyCells(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type MatrixResult<T> = Result<T, MatrixError>;
