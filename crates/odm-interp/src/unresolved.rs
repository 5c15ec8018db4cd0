//! The set of pairs no pass has been able to fill.

use std::collections::{BTreeMap, BTreeSet};

use odm_core::CellIdx;

/// Unresolved (origin, destination) pairs, grouped by origin.
///
/// Ordered maps keep iteration ascending by `(origin, destination)`, which
/// is the order every fallback pass visits pairs in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnresolvedPairs {
    by_origin: BTreeMap<CellIdx, BTreeSet<CellIdx>>,
    len:       usize,
}

impl UnresolvedPairs {
    pub fn insert(&mut self, origin: CellIdx, destination: CellIdx) -> bool {
        let added = self.by_origin.entry(origin).or_default().insert(destination);
        if added {
            self.len += 1;
        }
        added
    }

    /// Remove a pair.  Origins left with no destinations are dropped.
    pub fn remove(&mut self, origin: CellIdx, destination: CellIdx) -> bool {
        let Some(row) = self.by_origin.get_mut(&origin) else { return false };
        let removed = row.remove(&destination);
        if removed {
            self.len -= 1;
            if row.is_empty() {
                self.by_origin.remove(&origin);
            }
        }
        removed
    }

    pub fn contains(&self, origin: CellIdx, destination: CellIdx) -> bool {
        self.by_origin.get(&origin).is_some_and(|row| row.contains(&destination))
    }

    /// Total number of pairs.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of origins with at least one unresolved destination.
    pub fn origin_count(&self) -> usize {
        self.by_origin.len()
    }

    /// Every pair, ascending.
    pub fn iter(&self) -> impl Iterator<Item = (CellIdx, CellIdx)> + '_ {
        self.by_origin
            .iter()
            .flat_map(|(&o, row)| row.iter().map(move |&d| (o, d)))
    }

    /// Origins with their destinations, ascending.
    pub fn by_origin(&self) -> impl Iterator<Item = (CellIdx, &BTreeSet<CellIdx>)> + '_ {
        self.by_origin.iter().map(|(&o, row)| (o, row))
    }
}
