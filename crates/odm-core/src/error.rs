//! Workspace base error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// The error type for `odm-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Text that is not a cell identifier at all.
    #[error("parse error: {0}")]
    Parse(String),

    /// A syntactically valid identifier that cannot be resolved to a
    /// coordinate (e.g. a canonical id off the grid).
    #[error("data integrity error for cell {id}: {reason}")]
    DataIntegrity { id: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `odm-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
