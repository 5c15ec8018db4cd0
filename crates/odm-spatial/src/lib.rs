//! `odm-spatial` — neighbor sets over planar cell coordinates.
//!
//! # Crate layout
//!
//! | Module        | Contents                                               |
//! |---------------|--------------------------------------------------------|
//! | [`neighbors`] | `NeighborGraph`, `NeighborRadii`                       |
//! | [`error`]     | `SpatialError`, `SpatialResult<T>`                     |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Per-origin radius queries run on Rayon's pool.          |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.      |

pub mod error;
pub mod neighbors;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use neighbors::{NeighborGraph, NeighborRadii};
