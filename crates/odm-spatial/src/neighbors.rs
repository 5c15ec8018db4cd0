//! Neighbor graph construction.
//!
//! # Neighbor sets
//!
//! For every cell three lists of other cells are kept, each sorted by
//! ascending [`CellIdx`]:
//!
//! | Set        | Default radius | Consumer                                   |
//! |------------|----------------|--------------------------------------------|
//! | `close`    | 6 000 m        | averaging strategies                       |
//! | `extended` | 10 000 m       | middleman strategies, neighbor export      |
//! | `lattice`  | 1 001 m        | self-distance and outlier post-processing  |
//!
//! Radii are inclusive.  The relation is symmetric: `b ∈ close(a)` iff
//! `a ∈ close(b)`, because both directions compare the same squared
//! distance against the same radius.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) is bulk-loaded with every coordinate and answers
//! one radius query per origin at the largest of the three radii; hits are
//! then split into the three sets.  Queries read the tree only, so with the
//! `parallel` feature they fan out across Rayon's pool.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use odm_core::{CellId, CellIdx, Coordinate, FillConfig, Grid};

use crate::{SpatialError, SpatialResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: an `[easting, northing]` point with the
/// associated cell index.
#[derive(Clone)]
struct CellEntry {
    point: [f64; 2],
    idx:   CellIdx,
}

impl RTreeObject for CellEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for CellEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let de = self.point[0] - point[0];
        let dn = self.point[1] - point[1];
        de * de + dn * dn
    }
}

// ── NeighborRadii ─────────────────────────────────────────────────────────────

/// The three inclusive radii, in metres.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NeighborRadii {
    pub close:    f64,
    pub extended: f64,
    pub lattice:  f64,
}

impl NeighborRadii {
    fn max(&self) -> f64 {
        self.close.max(self.extended).max(self.lattice)
    }
}

impl From<&FillConfig> for NeighborRadii {
    fn from(cfg: &FillConfig) -> Self {
        Self {
            close:    cfg.close_radius,
            extended: cfg.extended_radius,
            lattice:  cfg.lattice_radius,
        }
    }
}

impl Default for NeighborRadii {
    fn default() -> Self {
        (&FillConfig::default()).into()
    }
}

// ── NeighborGraph ─────────────────────────────────────────────────────────────

/// Per-cell neighbor lists.  Indexed by `CellIdx`; built once, read-only
/// afterwards.
#[derive(Debug, Clone)]
pub struct NeighborGraph {
    /// Planar position of each cell.  Indexed by `CellIdx`.
    pub coords: Vec<Coordinate>,

    radii:    NeighborRadii,
    close:    Vec<Vec<CellIdx>>,
    extended: Vec<Vec<CellIdx>>,
    lattice:  Vec<Vec<CellIdx>>,
}

/// One origin's hits, produced independently per origin.
struct Row {
    close:    Vec<CellIdx>,
    extended: Vec<CellIdx>,
    lattice:  Vec<CellIdx>,
}

impl NeighborGraph {
    /// Resolve every cell in `cells` through `grid` and build the graph.
    ///
    /// `cells[i]` becomes `CellIdx(i)`.  The first identifier that fails to
    /// resolve aborts the build.
    pub fn from_cells(cells: &[CellId], grid: &Grid, radii: NeighborRadii) -> SpatialResult<Self> {
        let coords = cells
            .iter()
            .map(|id| grid.resolve(id))
            .collect::<Result<Vec<_>, _>>()?;
        Self::build(coords, radii)
    }

    /// Build the graph over pre-resolved coordinates.
    ///
    /// Time complexity: O(N log N) for the R-tree bulk load plus one radius
    /// query per cell; output size is O(N · k) for k neighbors per cell.
    pub fn build(coords: Vec<Coordinate>, radii: NeighborRadii) -> SpatialResult<Self> {
        let n = coords.len();
        if u32::try_from(n).is_err() {
            return Err(SpatialError::TooManyCells(n));
        }

        let entries: Vec<CellEntry> = coords
            .iter()
            .enumerate()
            .map(|(i, c)| CellEntry { point: c.to_array(), idx: CellIdx(i as u32) })
            .collect();
        let tree = RTree::bulk_load(entries);

        let query = |i: usize| neighbors_of(&tree, &coords, i, &radii);

        #[cfg(not(feature = "parallel"))]
        let rows: Vec<Row> = (0..n).map(query).collect();

        #[cfg(feature = "parallel")]
        let rows: Vec<Row> = {
            use rayon::prelude::*;
            (0..n).into_par_iter().map(query).collect()
        };

        let mut close    = Vec::with_capacity(n);
        let mut extended = Vec::with_capacity(n);
        let mut lattice  = Vec::with_capacity(n);
        for row in rows {
            close.push(row.close);
            extended.push(row.extended);
            lattice.push(row.lattice);
        }

        let graph = Self { coords, radii, close, extended, lattice };
        log::debug!(
            "neighbor graph: {} cells, {} close / {} extended / {} lattice links",
            graph.cell_count(),
            graph.close.iter().map(Vec::len).sum::<usize>(),
            graph.extended.iter().map(Vec::len).sum::<usize>(),
            graph.lattice.iter().map(Vec::len).sum::<usize>(),
        );
        Ok(graph)
    }

    pub fn cell_count(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn radii(&self) -> NeighborRadii {
        self.radii
    }

    #[inline]
    pub fn coordinate(&self, cell: CellIdx) -> Coordinate {
        self.coords[cell.index()]
    }

    /// Cells within the close radius of `cell`, ascending.
    #[inline]
    pub fn close(&self, cell: CellIdx) -> &[CellIdx] {
        &self.close[cell.index()]
    }

    /// Cells within the extended radius of `cell`, ascending.
    #[inline]
    pub fn extended(&self, cell: CellIdx) -> &[CellIdx] {
        &self.extended[cell.index()]
    }

    /// Grid-adjacent cells of `cell`, ascending.
    #[inline]
    pub fn lattice(&self, cell: CellIdx) -> &[CellIdx] {
        &self.lattice[cell.index()]
    }

    /// Cells with fewer than `min_close` close neighbors, ascending.
    pub fn isolated(&self, min_close: usize) -> Vec<CellIdx> {
        self.close
            .iter()
            .enumerate()
            .filter(|(_, list)| list.len() < min_close)
            .map(|(i, _)| CellIdx(i as u32))
            .collect()
    }
}

fn neighbors_of(
    tree:   &RTree<CellEntry>,
    coords: &[Coordinate],
    i:      usize,
    radii:  &NeighborRadii,
) -> Row {
    let origin = coords[i];
    let reach = radii.max();
    let close_2 = radii.close * radii.close;
    let extended_2 = radii.extended * radii.extended;
    let lattice_2 = radii.lattice * radii.lattice;

    let mut row = Row { close: Vec::new(), extended: Vec::new(), lattice: Vec::new() };
    for hit in tree.locate_within_distance(origin.to_array(), reach * reach) {
        if hit.idx.index() == i {
            continue;
        }
        let d2 = origin.distance_2(coords[hit.idx.index()]);
        if d2 <= close_2 {
            row.close.push(hit.idx);
        }
        if d2 <= extended_2 {
            row.extended.push(hit.idx);
        }
        if d2 <= lattice_2 {
            row.lattice.push(hit.idx);
        }
    }
    // R-tree traversal order is unspecified; sorting makes every later
    // floating-point aggregation over these lists reproducible.
    row.close.sort_unstable();
    row.extended.sort_unstable();
    row.lattice.sort_unstable();
    row
}
