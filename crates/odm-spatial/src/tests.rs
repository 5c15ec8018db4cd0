//! Unit tests for odm-spatial.
//!
//! All tests use hand-placed coordinates on a 1 km lattice.

#[cfg(test)]
mod helpers {
    use odm_core::Coordinate;

    /// A `w × h` block of 1 km cell centroids, row-major from the south-west.
    pub fn block(w: usize, h: usize) -> Vec<Coordinate> {
        let mut out = Vec::with_capacity(w * h);
        for row in 0..h {
            for col in 0..w {
                out.push(Coordinate::new(
                    250_500.0 + col as f64 * 1_000.0,
                    6_640_500.0 + row as f64 * 1_000.0,
                ));
            }
        }
        out
    }
}

#[cfg(test)]
mod build {
    use odm_core::{CellId, CellIdx, Coordinate, Grid};

    use crate::{NeighborGraph, NeighborRadii, SpatialError};

    #[test]
    fn empty_build() {
        let g = NeighborGraph::build(vec![], NeighborRadii::default()).unwrap();
        assert!(g.is_empty());
        assert!(g.isolated(3).is_empty());
    }

    #[test]
    fn self_is_never_a_neighbor() {
        let g = NeighborGraph::build(super::helpers::block(3, 3), NeighborRadii::default()).unwrap();
        for i in 0..g.cell_count() {
            let c = CellIdx(i as u32);
            assert!(!g.close(c).contains(&c));
            assert!(!g.extended(c).contains(&c));
            assert!(!g.lattice(c).contains(&c));
        }
    }

    #[test]
    fn lattice_is_edge_adjacent() {
        // 3 × 3 block; centre cell is index 4.
        let g = NeighborGraph::build(super::helpers::block(3, 3), NeighborRadii::default()).unwrap();
        assert_eq!(g.lattice(CellIdx(4)), &[CellIdx(1), CellIdx(3), CellIdx(5), CellIdx(7)]);
        // Corner cell 0 touches 1 (east) and 3 (north).
        assert_eq!(g.lattice(CellIdx(0)), &[CellIdx(1), CellIdx(3)]);
    }

    #[test]
    fn radii_are_inclusive() {
        let coords = vec![Coordinate::new(0.0, 0.0), Coordinate::new(6_000.0, 0.0)];
        let g = NeighborGraph::build(coords, NeighborRadii::default()).unwrap();
        assert_eq!(g.close(CellIdx(0)), &[CellIdx(1)]);
        assert_eq!(g.extended(CellIdx(0)), &[CellIdx(1)]);
        assert!(g.lattice(CellIdx(0)).is_empty());
    }

    #[test]
    fn close_extended_split() {
        let coords = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(5_000.0, 0.0),
            Coordinate::new(8_000.0, 0.0),
            Coordinate::new(12_000.0, 0.0),
        ];
        let g = NeighborGraph::build(coords, NeighborRadii::default()).unwrap();
        assert_eq!(g.close(CellIdx(0)), &[CellIdx(1)]);
        assert_eq!(g.extended(CellIdx(0)), &[CellIdx(1), CellIdx(2)]);
    }

    #[test]
    fn lists_are_sorted() {
        let g = NeighborGraph::build(super::helpers::block(12, 12), NeighborRadii::default()).unwrap();
        for i in 0..g.cell_count() {
            let c = CellIdx(i as u32);
            assert!(g.extended(c).windows(2).all(|w| w[0] < w[1]));
            assert!(g.close(c).windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn from_cells_resolves_through_grid() {
        let cells: Vec<CellId> = ["22500006640000", "22510006640000", "_255000_6645000"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        let g = NeighborGraph::from_cells(&cells, &Grid::default(), NeighborRadii::default()).unwrap();
        assert_eq!(g.coordinate(CellIdx(0)), Coordinate::new(250_500.0, 6_640_500.0));
        assert_eq!(g.coordinate(CellIdx(1)), Coordinate::new(251_500.0, 6_640_500.0));
        assert_eq!(g.coordinate(CellIdx(2)), Coordinate::new(255_000.0, 6_645_000.0));
        assert_eq!(g.lattice(CellIdx(0)), &[CellIdx(1)]);
    }

    #[test]
    fn from_cells_rejects_misaligned_id() {
        let cells = vec![CellId::Canonical(22_500_006_640_001)];
        let r = NeighborGraph::from_cells(&cells, &Grid::default(), NeighborRadii::default());
        assert!(matches!(r, Err(SpatialError::Core(_))));
    }
}

#[cfg(test)]
mod properties {
    use odm_core::{CellIdx, Coordinate};

    use crate::{NeighborGraph, NeighborRadii};

    /// Scattered, non-lattice points so that distances land close to the
    /// radii from both sides.
    fn scattered() -> Vec<Coordinate> {
        (0..200u32)
            .map(|i| {
                let t = i as f64;
                Coordinate::new(
                    260_000.0 + (t * 7_919.0) % 23_000.0 + (t * 0.37).fract() * 13.0,
                    6_650_000.0 + (t * 3_571.0) % 19_000.0 - (t * 0.61).fract() * 17.0,
                )
            })
            .collect()
    }

    #[test]
    fn membership_is_symmetric() {
        let g = NeighborGraph::build(scattered(), NeighborRadii::default()).unwrap();
        for i in 0..g.cell_count() {
            let a = CellIdx(i as u32);
            for &b in g.close(a) {
                assert!(g.close(b).binary_search(&a).is_ok(), "close {a} -> {b} not mirrored");
            }
            for &b in g.extended(a) {
                assert!(g.extended(b).binary_search(&a).is_ok(), "extended {a} -> {b} not mirrored");
            }
        }
    }

    #[test]
    fn matches_brute_force() {
        let coords = scattered();
        let radii = NeighborRadii::default();
        let g = NeighborGraph::build(coords.clone(), radii).unwrap();
        for (i, &a) in coords.iter().enumerate() {
            let expected: Vec<CellIdx> = coords
                .iter()
                .enumerate()
                .filter(|&(j, &b)| j != i && a.distance_2(b) <= radii.close * radii.close)
                .map(|(j, _)| CellIdx(j as u32))
                .collect();
            assert_eq!(g.close(CellIdx(i as u32)), expected.as_slice());
        }
    }

    #[test]
    fn isolated_cells_flagged() {
        let mut coords = super::helpers::block(3, 3);
        coords.push(Coordinate::new(900_000.0, 6_000_000.0)); // far away
        let g = NeighborGraph::build(coords, NeighborRadii::default()).unwrap();
        assert_eq!(g.isolated(3), vec![CellIdx(9)]);
    }
}
