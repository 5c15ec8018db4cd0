//! Planar coordinate type.
//!
//! `Coordinate` uses `f64`.  Projected northings in the target datasets are
//! around 6.8 × 10⁶ m, where `f32` would only resolve to about half a metre
//! and canonical centroids would no longer round-trip exactly.

/// An (easting, northing) pair in metres in a fixed planar projection.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub easting:  f64,
    pub northing: f64,
}

impl Coordinate {
    #[inline]
    pub fn new(easting: f64, northing: f64) -> Self {
        Self { easting, northing }
    }

    /// Euclidean distance in metres.
    #[inline]
    pub fn distance_to(self, other: Coordinate) -> f64 {
        (other.easting - self.easting).hypot(other.northing - self.northing)
    }

    /// Squared Euclidean distance.  Cheaper than [`distance_to`](Self::distance_to)
    /// for radius comparisons.
    #[inline]
    pub fn distance_2(self, other: Coordinate) -> f64 {
        let de = other.easting - self.easting;
        let dn = other.northing - self.northing;
        de * de + dn * dn
    }

    /// `[easting, northing]`, the point layout used by the spatial index and
    /// by exported documents.
    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.easting, self.northing]
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.easting, self.northing)
    }
}
