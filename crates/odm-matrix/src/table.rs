//! `CellId` interning.

use rustc_hash::FxHashMap;

use odm_core::{CellId, CellIdx};

use crate::{MatrixError, MatrixResult};

/// Bidirectional mapping between document identifiers and dense indices.
///
/// Indices follow ascending `CellId` order, so the same set of cells always
/// interns to the same indices regardless of document key order.
#[derive(Debug, Clone, Default)]
pub struct CellTable {
    ids:   Vec<CellId>,
    index: FxHashMap<CellId, CellIdx>,
}

impl CellTable {
    /// Intern `ids`.  Duplicates are collapsed.
    pub fn new(mut ids: Vec<CellId>) -> MatrixResult<Self> {
        ids.sort_unstable();
        ids.dedup();
        if u32::try_from(ids.len()).is_err() {
            return Err(MatrixError::TooManyCells(ids.len()));
        }
        let index = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), CellIdx(i as u32)))
            .collect();
        Ok(Self { ids, index })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[inline]
    pub fn get(&self, id: &CellId) -> Option<CellIdx> {
        self.index.get(id).copied()
    }

    #[inline]
    pub fn id(&self, idx: CellIdx) -> &CellId {
        &self.ids[idx.index()]
    }

    /// All identifiers; position `i` is `CellIdx(i)`.
    pub fn ids(&self) -> &[CellId] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellIdx, &CellId)> + '_ {
        self.ids.iter().enumerate().map(|(i, id)| (CellIdx(i as u32), id))
    }
}
