//! `odm-matrix` — the sparse cost matrix and its documents.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`entry`]     | `CostEntry`, `Anchor`                                     |
//! | [`table`]     | `CellTable` — `CellId` ↔ `CellIdx` interning              |
//! | [`matrix`]    | `CostMatrix` — per-origin rows indexed by `CellIdx`       |
//! | [`document`]  | `MatrixDocument`, JSON read/write, multi-document merge   |
//! | [`overrides`] | `OverrideDocument`, `ManualOverride`, `ManualOverrides`   |
//! | [`error`]     | `MatrixError`, `MatrixResult<T>`                          |
//!
//! # Document format
//!
//! ```json
//! {
//!   "22620006649000": {
//!     "22630006649000": [63.4, 1021.7, null],
//!     "_262372_6649484": 118.0
//!   }
//! }
//! ```
//!
//! Leaves are a bare cost or `[cost, origin_anchor?, destination_anchor?]`.
//! Anything else is rejected at parse time.

pub mod document;
pub mod entry;
pub mod error;
pub mod matrix;
pub mod overrides;
pub mod table;

#[cfg(test)]
mod tests;

pub use document::{
    MatrixDocument, MergeStats, load_document, load_documents, read_document, write_document,
};
pub use entry::{Anchor, CostEntry};
pub use error::{MatrixError, MatrixResult};
pub use matrix::CostMatrix;
pub use overrides::{
    ManualOverride, ManualOverrides, OverrideDocument, load_overrides, read_overrides,
};
pub use table::CellTable;
