//! Hand-curated substitutes for geometrically pathological cells.
//!
//! # Document format
//!
//! ```json
//! { "22620006649000": ["_262372_6649484", 45.0] }
//! ```
//!
//! Read as: travel to or from `22620006649000` is travel to or from the
//! substitute plus a fixed 45-unit offset.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use odm_core::{CellId, CellIdx};

use crate::{CellTable, MatrixResult};

/// Parsed override document, still keyed by document identifiers.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct OverrideDocument {
    pub entries: BTreeMap<CellId, (CellId, f64)>,
}

/// One override resolved against a cell table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManualOverride {
    pub substitute: CellIdx,
    pub offset:     f64,
}

/// Overrides keyed by the cell they replace.
#[derive(Debug, Clone, Default)]
pub struct ManualOverrides {
    map: FxHashMap<CellIdx, ManualOverride>,
}

impl ManualOverrides {
    #[inline]
    pub fn get(&self, cell: CellIdx) -> Option<ManualOverride> {
        self.map.get(&cell).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn insert(&mut self, cell: CellIdx, value: ManualOverride) {
        self.map.insert(cell, value);
    }
}

impl OverrideDocument {
    /// Resolve identifiers against `cells`.
    ///
    /// Entries whose key or substitute is not a cell of the matrix, or whose
    /// offset is not finite, cannot take part in any pass; they are skipped
    /// and counted in the second return value.
    pub fn resolve(&self, cells: &CellTable) -> (ManualOverrides, usize) {
        let mut out = ManualOverrides::default();
        let mut skipped = 0;
        for (cell, (substitute, offset)) in &self.entries {
            match (cells.get(cell), cells.get(substitute)) {
                (Some(c), Some(s)) if offset.is_finite() && c != s => {
                    out.insert(c, ManualOverride { substitute: s, offset: *offset });
                }
                _ => {
                    log::warn!("override {cell} -> {substitute} ({offset}) skipped: not applicable to this matrix");
                    skipped += 1;
                }
            }
        }
        (out, skipped)
    }
}

/// Parse an override document from any `Read` source.
pub fn read_overrides<R: Read>(reader: R) -> MatrixResult<OverrideDocument> {
    Ok(serde_json::from_reader(BufReader::new(reader))?)
}

/// Parse an override document from a file.
pub fn load_overrides(path: &Path) -> MatrixResult<OverrideDocument> {
    let doc = read_overrides(File::open(path)?)?;
    log::info!("loaded {}: {} manual overrides", path.display(), doc.entries.len());
    Ok(doc)
}
