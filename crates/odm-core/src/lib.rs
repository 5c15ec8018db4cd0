//! `odm-core` — foundational types for the `odm` matrix-completion workspace.
//!
//! This crate is a dependency of every other `odm-*` crate.  It has no
//! `odm-*` dependencies and only `thiserror` (plus optional `serde`) as
//! external ones.
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`ids`]    | `CellId` (canonical / synthetic), `CellIdx`               |
//! | [`geo`]    | `Coordinate`, planar Euclidean distance                   |
//! | [`grid`]   | `Grid` — canonical id ↔ centroid arithmetic, resolver     |
//! | [`config`] | `FillConfig` — radii, sample minimums, outlier thresholds |
//! | [`error`]  | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | `CellId` (de)serializes as its textual key.                |

pub mod config;
pub mod error;
pub mod geo;
pub mod grid;
pub mod ids;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::FillConfig;
pub use error::{CoreError, CoreResult};
pub use geo::Coordinate;
pub use grid::Grid;
pub use ids::{CellId, CellIdx};
