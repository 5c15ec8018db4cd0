//! Spatial-subsystem error type.

use thiserror::Error;

use odm_core::CoreError;

/// Errors produced by `odm-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// A cell id could not be resolved to a coordinate.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("{0} cells exceed the u32 index space")]
    TooManyCells(usize),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
