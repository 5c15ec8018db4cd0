//! Unit tests for odm-core primitives.

#[cfg(test)]
mod ids {
    use crate::{CellId, CellIdx, CoreError};

    #[test]
    fn index_roundtrip() {
        let idx = CellIdx(42);
        assert_eq!(idx.index(), 42);
        assert_eq!(idx.to_string(), "CellIdx(42)");
    }

    #[test]
    fn parse_canonical() {
        let id: CellId = "21450006851000".parse().unwrap();
        assert_eq!(id, CellId::Canonical(21_450_006_851_000));
        assert_eq!(id.to_string(), "21450006851000");
        assert!(!id.is_synthetic());
    }

    #[test]
    fn parse_synthetic_keeps_label() {
        let id: CellId = "_262372.5_6649484".parse().unwrap();
        assert!(id.is_synthetic());
        assert_eq!(id.to_string(), "_262372.5_6649484");
        let CellId::Synthetic(s) = &id else { unreachable!() };
        assert_eq!(s.point().easting, 262_372.5);
        assert_eq!(s.point().northing, 6_649_484.0);
    }

    #[test]
    fn synthetic_constructor_formats_shortest() {
        let id = CellId::synthetic(262_372.0, 6_649_484.0).unwrap();
        assert_eq!(id.to_string(), "_262372_6649484");
    }

    #[test]
    fn malformed_ids_rejected() {
        for bad in ["", "abc", "-5", "12.5", "_1", "_1_2_3", "_x_2", "_1_inf", "1_2"] {
            let r = bad.parse::<CellId>();
            assert!(matches!(r, Err(CoreError::Parse(_))), "{bad:?} should not parse");
        }
    }

    #[test]
    fn canonical_ids_have_one_spelling() {
        for bad in ["+21450006851000", "021450006851000", "00", " 1", "1 "] {
            let r = bad.parse::<CellId>();
            assert!(matches!(r, Err(CoreError::Parse(_))), "{bad:?} should not parse");
        }
        assert_eq!("0".parse::<CellId>().unwrap(), CellId::Canonical(0));
    }

    #[test]
    fn canonical_orders_before_synthetic() {
        let a: CellId = "99999999999999".parse().unwrap();
        let b: CellId = "_0_0".parse().unwrap();
        assert!(a < b);
        assert!(CellId::Canonical(1) < CellId::Canonical(2));
    }
}

#[cfg(test)]
mod geo {
    use crate::Coordinate;

    #[test]
    fn zero_distance() {
        let p = Coordinate::new(262_500.0, 6_649_500.0);
        assert_eq!(p.distance_to(p), 0.0);
    }

    #[test]
    fn pythagorean_distance() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(3_000.0, 4_000.0);
        assert_eq!(a.distance_to(b), 5_000.0);
        assert_eq!(a.distance_2(b), 25_000_000.0);
    }
}

#[cfg(test)]
mod grid {
    use crate::{CellId, CoreError, Coordinate, Grid};

    #[test]
    fn known_cell_centroid() {
        let grid = Grid::default();
        let c = grid.centroid(21_450_006_851_000).unwrap();
        assert_eq!(c, Coordinate::new(145_500.0, 6_851_500.0));
    }

    #[test]
    fn encode_known_point() {
        let grid = Grid::default();
        let id = grid.cell_id(Coordinate::new(145_500.0, 6_851_500.0)).unwrap();
        assert_eq!(id, CellId::Canonical(21_450_006_851_000));
        // Any point inside the cell snaps to the same id.
        let id2 = grid.cell_id(Coordinate::new(145_999.9, 6_851_000.0)).unwrap();
        assert_eq!(id2, id);
    }

    #[test]
    fn negative_easting_round_trip() {
        let grid = Grid::default();
        let id = grid.cell_id(Coordinate::new(-42_300.0, 6_700_200.0)).unwrap();
        let c = grid.resolve(&id).unwrap();
        assert_eq!(c, Coordinate::new(-42_500.0, 6_700_500.0));
        assert_eq!(grid.cell_id(c).unwrap(), id);
    }

    #[test]
    fn round_trip_over_a_block_of_cells() {
        let grid = Grid::default();
        for e in (250_000..260_000).step_by(1_000) {
            for n in (6_640_000..6_650_000).step_by(1_000) {
                let id = grid.cell_id(Coordinate::new(e as f64 + 10.0, n as f64 + 990.0)).unwrap();
                let centroid = grid.resolve(&id).unwrap();
                assert_eq!(centroid, Coordinate::new(e as f64 + 500.0, n as f64 + 500.0));
                assert_eq!(grid.cell_id(centroid).unwrap(), id);
            }
        }
    }

    #[test]
    fn resolve_is_pure() {
        let grid = Grid::default();
        let ids = ["22620006649000", "_262372_6649484"];
        for key in ids {
            let first = grid.resolve_key(key).unwrap();
            for _ in 0..10 {
                assert_eq!(grid.resolve_key(key).unwrap(), first);
            }
        }
    }

    #[test]
    fn misaligned_canonical_rejected() {
        let grid = Grid::default();
        let r = grid.centroid(21_450_006_851_234);
        assert!(matches!(r, Err(CoreError::DataIntegrity { .. })));
        let r = grid.resolve_key("21450016851000");
        assert!(matches!(r, Err(CoreError::DataIntegrity { .. })));
    }

    #[test]
    fn malformed_key_is_parse_error() {
        let grid = Grid::default();
        assert!(matches!(grid.resolve_key("not-a-cell"), Err(CoreError::Parse(_))));
    }

    #[test]
    fn out_of_range_point_rejected() {
        let grid = Grid::default();
        assert!(grid.cell_id(Coordinate::new(0.0, -1.0)).is_err());
        assert!(grid.cell_id(Coordinate::new(f64::NAN, 0.0)).is_err());
    }
}

#[cfg(test)]
mod config {
    use crate::{CoreError, FillConfig};

    #[test]
    fn defaults_are_valid() {
        FillConfig::default().validate().unwrap();
    }

    #[test]
    fn close_beyond_extended_rejected() {
        let cfg = FillConfig { close_radius: 12_000.0, ..FillConfig::default() };
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn inverted_outlier_thresholds_rejected() {
        let cfg = FillConfig {
            outlier_average_threshold: 300.0,
            ..FillConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_progress_interval_rejected() {
        let cfg = FillConfig { progress_interval: 0, ..FillConfig::default() };
        assert!(cfg.validate().is_err());
    }
}
