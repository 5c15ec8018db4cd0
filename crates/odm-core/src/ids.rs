//! Cell identifiers.
//!
//! Two kinds of key appear in cost-matrix documents:
//!
//! | Form      | Example           | Meaning                                       |
//! |-----------|-------------------|-----------------------------------------------|
//! | canonical | `21450006851000`  | grid cell; corner coordinates packed in digits |
//! | synthetic | `_262372_6649484` | off-grid point (e.g. a station); coordinates embedded as decimals |
//!
//! A [`CellId`] is what documents talk about.  Once a matrix is loaded every
//! distinct `CellId` is interned to a dense [`CellIdx`] so that neighbor lists
//! and matrix rows can be plain `Vec`s indexed by cell.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::{CoreError, Coordinate};

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Position of a cell in an interned cell table.
    pub struct CellIdx(u32);
}

// ── Synthetic identifiers ─────────────────────────────────────────────────────

/// An off-grid point whose coordinates are written into its key.
///
/// Identity is the key text: `_262372_6649484` and `_262372.0_6649484` are
/// different cells even though they resolve to the same point.
#[derive(Clone, Debug)]
pub struct SyntheticId {
    label: Box<str>,
    point: Coordinate,
}

impl SyntheticId {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn point(&self) -> Coordinate {
        self.point
    }

    fn parse(s: &str) -> Result<Self, CoreError> {
        let mut parts = s.split('_');
        let (Some(""), Some(e), Some(n), None) = (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(CoreError::Parse(format!(
                "synthetic cell id {s:?}: expected `_<easting>_<northing>`"
            )));
        };
        let easting = parse_component(s, e)?;
        let northing = parse_component(s, n)?;
        Ok(Self { label: s.into(), point: Coordinate::new(easting, northing) })
    }
}

fn parse_component(key: &str, part: &str) -> Result<f64, CoreError> {
    match part.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(CoreError::Parse(format!(
            "synthetic cell id {key:?}: {part:?} is not a finite decimal coordinate"
        ))),
    }
}

impl PartialEq for SyntheticId {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
    }
}

impl Eq for SyntheticId {}

impl Hash for SyntheticId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.label.hash(state);
    }
}

impl PartialOrd for SyntheticId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SyntheticId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.label.cmp(&other.label)
    }
}

// ── CellId ────────────────────────────────────────────────────────────────────

/// Identifier of a grid cell or point of interest.
///
/// Ordering puts every canonical id (numerically) before every synthetic id
/// (by key text); interning relies on this order being total and stable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CellId {
    Canonical(u64),
    Synthetic(SyntheticId),
}

impl CellId {
    pub fn canonical(id: u64) -> Self {
        CellId::Canonical(id)
    }

    /// Build a synthetic id for a point, formatting the coordinates with
    /// their shortest exact decimal representation.
    pub fn synthetic(easting: f64, northing: f64) -> Result<Self, CoreError> {
        format!("_{easting}_{northing}").parse()
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, CellId::Synthetic(_))
    }
}

impl FromStr for CellId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with('_') {
            return SyntheticId::parse(s).map(CellId::Synthetic);
        }
        let invalid = || {
            CoreError::Parse(format!(
                "invalid cell id {s:?}: expected a canonical grid id (u64) or `_<easting>_<northing>`"
            ))
        };
        // Each canonical id has exactly one spelling: no sign, no leading zeros.
        if !s.bytes().all(|b| b.is_ascii_digit()) || (s.len() > 1 && s.starts_with('0')) {
            return Err(invalid());
        }
        s.parse::<u64>().map(CellId::Canonical).map_err(|_| invalid())
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellId::Canonical(id) => write!(f, "{id}"),
            CellId::Synthetic(s) => f.write_str(s.label()),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CellId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CellId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CellIdVisitor;

        impl serde::de::Visitor<'_> for CellIdVisitor {
            type Value = CellId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a canonical grid id or a `_<easting>_<northing>` key")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<CellId, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(CellIdVisitor)
    }
}
