//! Canonical grid arithmetic — the coordinate resolver.
//!
//! # Id layout
//!
//! A canonical id packs the south-west corner of a square grid cell:
//!
//! ```text
//! id = (corner_easting + false_easting) · 10⁷ + corner_northing
//! ```
//!
//! Decoding returns the cell *centroid* (corner + cell_size / 2).  Encoding
//! snaps any point inside a cell to that cell's corner, so
//! `cell_id(centroid(id)) == id` holds exactly for every aligned id.
//!
//! With the defaults (1 km cells, 2 000 000 m false easting) the id
//! `21450006851000` is the cell whose centroid is `(145500, 6851500)`.

use crate::{CellId, CoreError, CoreResult, Coordinate};

/// Multiplier separating the easting and northing halves of a canonical id.
pub const ID_STRIDE: u64 = 10_000_000;

/// Parameters of the canonical grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Grid {
    /// Side length of one grid cell in metres.
    pub cell_size: u32,
    /// Offset added to eastings so that packed values are never negative.
    pub false_easting: i64,
}

impl Default for Grid {
    fn default() -> Self {
        Self { cell_size: 1_000, false_easting: 2_000_000 }
    }
}

impl Grid {
    /// Resolve any cell identifier to its planar coordinate.
    ///
    /// Pure: the same id always yields the same coordinate.  Canonical ids
    /// that are not aligned to this grid are rejected rather than rounded.
    pub fn resolve(&self, id: &CellId) -> CoreResult<Coordinate> {
        match id {
            CellId::Canonical(raw) => self.centroid(*raw),
            CellId::Synthetic(s) => Ok(s.point()),
        }
    }

    /// Parse `key` and resolve it in one step.
    pub fn resolve_key(&self, key: &str) -> CoreResult<Coordinate> {
        self.resolve(&key.parse()?)
    }

    /// Centroid of the canonical cell `id`.
    pub fn centroid(&self, id: u64) -> CoreResult<Coordinate> {
        let size = self.cell_size_checked(id)?;
        let packed_easting = (id / ID_STRIDE) as i64;
        let corner_northing = (id % ID_STRIDE) as i64;
        let corner_easting = packed_easting - self.false_easting;

        if corner_easting.rem_euclid(size) != 0 || corner_northing.rem_euclid(size) != 0 {
            return Err(CoreError::DataIntegrity {
                id:     id.to_string(),
                reason: format!("corner ({corner_easting}, {corner_northing}) is not aligned to a {size} m grid"),
            });
        }

        let half = size as f64 / 2.0;
        Ok(Coordinate::new(
            corner_easting as f64 + half,
            corner_northing as f64 + half,
        ))
    }

    /// Canonical id of the cell containing `point`.
    pub fn cell_id(&self, point: Coordinate) -> CoreResult<CellId> {
        let size = self.cell_size as f64;
        if self.cell_size == 0 || !point.easting.is_finite() || !point.northing.is_finite() {
            return Err(CoreError::DataIntegrity {
                id:     point.to_string(),
                reason: "cannot encode a non-finite point or a zero-size grid".into(),
            });
        }

        let packed_easting = ((point.easting + self.false_easting as f64) / size).floor() * size;
        let corner_northing = (point.northing / size).floor() * size;

        if packed_easting < 0.0 || corner_northing < 0.0 || corner_northing >= ID_STRIDE as f64 {
            return Err(CoreError::DataIntegrity {
                id:     point.to_string(),
                reason: "point lies outside the range representable by canonical ids".into(),
            });
        }

        let id = (packed_easting as u64)
            .checked_mul(ID_STRIDE)
            .and_then(|v| v.checked_add(corner_northing as u64))
            .ok_or_else(|| CoreError::DataIntegrity {
                id:     point.to_string(),
                reason: "canonical id overflows u64".into(),
            })?;
        Ok(CellId::Canonical(id))
    }

    fn cell_size_checked(&self, id: u64) -> CoreResult<i64> {
        if self.cell_size == 0 {
            return Err(CoreError::DataIntegrity {
                id:     id.to_string(),
                reason: "grid cell size is zero".into(),
            });
        }
        Ok(self.cell_size as i64)
    }
}
