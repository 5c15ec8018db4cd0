//! Export documents derived from a fill outcome.
//!
//! ```json
//! // unresolved_pairs.json
//! { "pairs": { "22620006649000": { "_262372_6649484": {
//!     "origin": [262500.0, 6649500.0], "destination": [262372.0, 6649484.0] } } } }
//!
//! // neighbors.json
//! { "22620006649000": ["22610006649000", "22630006649000"] }
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use odm_core::CellId;
use odm_interp::UnresolvedPairs;
use odm_matrix::CellTable;
use odm_spatial::NeighborGraph;

/// Planar coordinates of both ends of an unresolved pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Endpoints {
    pub origin:      [f64; 2],
    pub destination: [f64; 2],
}

/// Residual unresolved pairs, nested under `"pairs"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UnresolvedDocument {
    pub pairs: BTreeMap<CellId, BTreeMap<CellId, Endpoints>>,
}

impl UnresolvedDocument {
    pub fn new(unresolved: &UnresolvedPairs, cells: &CellTable, graph: &NeighborGraph) -> Self {
        let mut pairs: BTreeMap<CellId, BTreeMap<CellId, Endpoints>> = BTreeMap::new();
        for (origin, destinations) in unresolved.by_origin() {
            let from = graph.coordinate(origin).to_array();
            let row = pairs.entry(cells.id(origin).clone()).or_default();
            for &destination in destinations {
                row.insert(
                    cells.id(destination).clone(),
                    Endpoints { origin: from, destination: graph.coordinate(destination).to_array() },
                );
            }
        }
        Self { pairs }
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Extended neighbor set of every cell, by identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NeighborDocument {
    pub neighbors: BTreeMap<CellId, Vec<CellId>>,
}

impl NeighborDocument {
    pub fn extended(cells: &CellTable, graph: &NeighborGraph) -> Self {
        let neighbors = cells
            .iter()
            .map(|(idx, id)| {
                let list = graph.extended(idx).iter().map(|&n| cells.id(n).clone()).collect();
                (id.clone(), list)
            })
            .collect();
        Self { neighbors }
    }
}
