//! The in-memory cost matrix.
//!
//! # Data layout
//!
//! One hash row per origin, indexed by origin `CellIdx`:
//!
//! ```text
//! rows[origin] : CellIdx(destination) → CostEntry
//! ```
//!
//! Rows are `FxHashMap`s: the fill passes do millions of point lookups and
//! never depend on row iteration order (every pass walks cells by index).
//! Conversion back to a [`MatrixDocument`] sorts keys.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use odm_core::{CellId, CellIdx};

use crate::{CellTable, CostEntry, MatrixDocument, MatrixResult};

/// Sparse, directed cost matrix over an interned cell table.
#[derive(Debug, Clone)]
pub struct CostMatrix {
    cells: CellTable,
    rows:  Vec<FxHashMap<CellIdx, CostEntry>>,
}

impl CostMatrix {
    /// Intern every origin and destination of `doc` and move its entries in.
    pub fn from_document(doc: MatrixDocument) -> MatrixResult<Self> {
        let ids: Vec<CellId> = doc
            .rows
            .iter()
            .flat_map(|(origin, row)| std::iter::once(origin).chain(row.keys()))
            .cloned()
            .collect();
        let cells = CellTable::new(ids)?;

        let mut rows = vec![FxHashMap::default(); cells.len()];
        for (origin, row) in doc.rows {
            let Some(o) = cells.get(&origin) else { continue };
            let target = &mut rows[o.index()];
            target.reserve(row.len());
            for (destination, entry) in row {
                if let Some(d) = cells.get(&destination) {
                    target.insert(d, entry);
                }
            }
        }
        Ok(Self { cells, rows })
    }

    /// Sorted document view of the current contents.  Origins with no
    /// entries still appear, with an empty row.
    pub fn to_document(&self) -> MatrixDocument {
        let rows = self
            .cells
            .iter()
            .map(|(o, origin)| {
                let row: BTreeMap<CellId, CostEntry> = self.rows[o.index()]
                    .iter()
                    .map(|(d, entry)| (self.cells.id(*d).clone(), entry.clone()))
                    .collect();
                (origin.clone(), row)
            })
            .collect();
        MatrixDocument { rows }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn cells(&self) -> &CellTable {
        &self.cells
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of stored (origin, destination) entries, diagonal included.
    pub fn entry_count(&self) -> usize {
        self.rows.iter().map(|r| r.len()).sum()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn get(&self, origin: CellIdx, destination: CellIdx) -> Option<&CostEntry> {
        self.rows[origin.index()].get(&destination)
    }

    #[inline]
    pub fn cost(&self, origin: CellIdx, destination: CellIdx) -> Option<f64> {
        self.get(origin, destination).map(CostEntry::cost)
    }

    #[inline]
    pub fn contains(&self, origin: CellIdx, destination: CellIdx) -> bool {
        self.rows[origin.index()].contains_key(&destination)
    }

    /// Look up by document identifiers.
    pub fn cost_by_id(&self, origin: &CellId, destination: &CellId) -> Option<f64> {
        let o = self.cells.get(origin)?;
        let d = self.cells.get(destination)?;
        self.cost(o, d)
    }

    /// Every off-diagonal pair with no entry, ascending by (origin, destination).
    pub fn missing_pairs(&self) -> Vec<(CellIdx, CellIdx)> {
        let n = self.cell_count() as u32;
        let mut out = Vec::new();
        for o in (0..n).map(CellIdx) {
            let row = &self.rows[o.index()];
            out.extend(
                (0..n)
                    .map(CellIdx)
                    .filter(|&d| d != o && !row.contains_key(&d))
                    .map(|d| (o, d)),
            );
        }
        out
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Store `entry` unless the pair already has one.  Returns `true` if
    /// stored.
    pub fn insert_if_absent(&mut self, origin: CellIdx, destination: CellIdx, entry: CostEntry) -> bool {
        let row = &mut self.rows[origin.index()];
        if row.contains_key(&destination) {
            return false;
        }
        row.insert(destination, entry);
        true
    }

    /// Overwrite the cost of an existing entry, keeping its anchors.
    /// Returns `false` (and stores nothing) if the pair has no entry.
    pub fn set_cost(&mut self, origin: CellIdx, destination: CellIdx, cost: f64) -> bool {
        match self.rows[origin.index()].get_mut(&destination) {
            Some(entry) => {
                entry.set_cost(cost);
                true
            }
            None => false,
        }
    }
}
