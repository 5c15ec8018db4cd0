use odm_core::CoreError;
use odm_matrix::MatrixError;
use odm_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FillError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Matrix(#[from] MatrixError),

    #[error("neighbor graph: {0}")]
    Spatial(#[from] SpatialError),
}

pub type FillResult<T> = Result<T, FillError>;
