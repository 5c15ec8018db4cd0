//! Unit tests for odm-matrix.

#[cfg(test)]
mod helpers {
    use std::io::Cursor;

    use crate::{CostMatrix, MatrixDocument, read_document};

    pub const SMALL: &str = r#"{
        "22500006640000": {
            "22510006640000": [60.0, 1000.0, [1, 2]],
            "_255000_6645000": 300
        },
        "22510006640000": {
            "22500006640000": [70.5]
        }
    }"#;

    pub fn doc(json: &str) -> MatrixDocument {
        read_document(Cursor::new(json)).unwrap()
    }

    pub fn matrix(json: &str) -> CostMatrix {
        CostMatrix::from_document(doc(json)).unwrap()
    }
}

// ── Leaf parsing ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod entry {
    use serde_json::json;

    use crate::{Anchor, CostEntry};

    fn parse(v: serde_json::Value) -> Result<CostEntry, serde_json::Error> {
        serde_json::from_value(v)
    }

    #[test]
    fn bare_number() {
        assert_eq!(parse(json!(12)).unwrap(), CostEntry::Bare(12.0));
        assert_eq!(parse(json!(12.5)).unwrap().cost(), 12.5);
    }

    #[test]
    fn record_with_anchors() {
        let e = parse(json!([60.0, 1000.0, [1, 2]])).unwrap();
        assert_eq!(
            e,
            CostEntry::Anchored {
                cost:        60.0,
                origin:      Some(Anchor(json!(1000.0))),
                destination: Some(Anchor(json!([1, 2]))),
            }
        );
    }

    #[test]
    fn null_anchor_is_absent() {
        let e = parse(json!([5, null, "x"])).unwrap();
        let CostEntry::Anchored { origin, destination, .. } = e else { panic!("expected record") };
        assert!(origin.is_none());
        assert_eq!(destination, Some(Anchor(json!("x"))));
    }

    #[test]
    fn malformed_leaves_rejected() {
        for bad in [
            json!([]),
            json!([1, 2, 3, 4]),
            json!(["1"]),
            json!("12"),
            json!(-1.0),
            json!([-3]),
            json!({"cost": 1}),
            json!(null),
        ] {
            assert!(parse(bad.clone()).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn shapes_survive_serialization() {
        for v in [json!(7.0), json!([7.0]), json!([7.0, 3.0]), json!([7.0, null, 3.0]), json!([7.0, 1.0, 2.0])] {
            let e = parse(v.clone()).unwrap();
            assert_eq!(serde_json::to_value(&e).unwrap(), v);
        }
    }

    #[test]
    fn set_cost_keeps_anchors() {
        let mut e = parse(json!([7.0, 1.0, 2.0])).unwrap();
        e.set_cost(3.0);
        assert_eq!(serde_json::to_value(&e).unwrap(), json!([3.0, 1.0, 2.0]));
    }
}

// ── Documents ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod document {
    use std::io::Cursor;

    use odm_core::CellId;

    use crate::{CostEntry, MatrixError, read_document};

    #[test]
    fn parses_keys_and_leaves() {
        let doc = super::helpers::doc(super::helpers::SMALL);
        assert_eq!(doc.rows.len(), 2);
        assert_eq!(doc.entry_count(), 3);
        let a: CellId = "22500006640000".parse().unwrap();
        let s: CellId = "_255000_6645000".parse().unwrap();
        assert_eq!(doc.rows[&a][&s], CostEntry::Bare(300.0));
    }

    #[test]
    fn malformed_key_rejected() {
        let r = read_document(Cursor::new(r#"{"abc": {}}"#));
        assert!(matches!(r, Err(MatrixError::Json(_))));
        let r = read_document(Cursor::new(r#"{"1": {"_1_x": 3}}"#));
        assert!(matches!(r, Err(MatrixError::Json(_))));
    }

    #[test]
    fn malformed_leaf_rejected() {
        let r = read_document(Cursor::new(r#"{"1": {"2": [1, 2, 3, 4]}}"#));
        assert!(matches!(r, Err(MatrixError::Json(_))));
    }

    #[test]
    fn merge_first_wins() {
        let mut a = super::helpers::doc(r#"{"1": {"2": 10}}"#);
        let b = super::helpers::doc(r#"{"1": {"2": 99, "3": 5}, "4": {"1": 7}}"#);
        let stats = a.merge(b);
        assert_eq!(stats.added, 2);
        assert_eq!(stats.conflicts, 1);
        let one: CellId = "1".parse().unwrap();
        let two: CellId = "2".parse().unwrap();
        assert_eq!(a.rows[&one][&two].cost(), 10.0);
        assert_eq!(a.entry_count(), 3);
    }
}

#[cfg(test)]
mod files {
    use std::fs;

    use crate::{load_document, load_documents, write_document};

    #[test]
    fn write_then_load() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("od.json");
        let doc = super::helpers::doc(super::helpers::SMALL);
        write_document(&doc, fs::File::create(&path).unwrap()).unwrap();
        assert_eq!(load_document(&path).unwrap(), doc);
    }

    #[test]
    fn load_documents_merges_in_order() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let p1 = dir.path().join("grid.json");
        let p2 = dir.path().join("stations.json");
        fs::write(&p1, r#"{"1": {"2": 10}}"#).unwrap();
        fs::write(&p2, r#"{"1": {"2": 11}, "_5_5": {"1": 3}}"#).unwrap();
        let (doc, stats) = load_documents(&[&p1, &p2]).unwrap();
        assert_eq!(doc.entry_count(), 2);
        assert_eq!(stats.conflicts, 1);
        assert_eq!(stats.added, 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let r = load_document(&dir.path().join("nope.json"));
        assert!(matches!(r, Err(crate::MatrixError::Io(_))));
    }
}

// ── CostMatrix ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod matrix {
    use odm_core::{CellId, CellIdx};

    use crate::CostEntry;

    #[test]
    fn interns_origins_and_destinations() {
        let m = super::helpers::matrix(super::helpers::SMALL);
        // Two grid cells plus the synthetic destination.
        assert_eq!(m.cell_count(), 3);
        assert_eq!(m.entry_count(), 3);
        // Canonical ids sort before synthetic ones.
        assert!(m.cells().id(CellIdx(2)).is_synthetic());
    }

    #[test]
    fn lookup_by_index_and_id() {
        let m = super::helpers::matrix(super::helpers::SMALL);
        let a: CellId = "22500006640000".parse().unwrap();
        let b: CellId = "22510006640000".parse().unwrap();
        assert_eq!(m.cost_by_id(&a, &b), Some(60.0));
        assert_eq!(m.cost_by_id(&b, &a), Some(70.5));
        let (ia, ib) = (m.cells().get(&a).unwrap(), m.cells().get(&b).unwrap());
        assert!(m.contains(ia, ib));
        assert_eq!(m.cost(ia, ib), Some(60.0));
    }

    #[test]
    fn missing_pairs_ascending_off_diagonal() {
        let m = super::helpers::matrix(super::helpers::SMALL);
        // 3 cells → 6 off-diagonal pairs, 3 present.
        let missing = m.missing_pairs();
        assert_eq!(
            missing,
            vec![(CellIdx(1), CellIdx(2)), (CellIdx(2), CellIdx(0)), (CellIdx(2), CellIdx(1))]
        );
    }

    #[test]
    fn insert_if_absent_never_overwrites() {
        let mut m = super::helpers::matrix(super::helpers::SMALL);
        assert!(!m.insert_if_absent(CellIdx(0), CellIdx(1), CostEntry::Bare(1.0)));
        assert_eq!(m.cost(CellIdx(0), CellIdx(1)), Some(60.0));
        assert!(m.insert_if_absent(CellIdx(1), CellIdx(2), CostEntry::Bare(1.0)));
        assert_eq!(m.cost(CellIdx(1), CellIdx(2)), Some(1.0));
    }

    #[test]
    fn set_cost_only_on_existing() {
        let mut m = super::helpers::matrix(super::helpers::SMALL);
        assert!(m.set_cost(CellIdx(0), CellIdx(1), 42.0));
        assert_eq!(m.cost(CellIdx(0), CellIdx(1)), Some(42.0));
        assert!(!m.set_cost(CellIdx(2), CellIdx(0), 42.0));
        assert!(!m.contains(CellIdx(2), CellIdx(0)));
    }

    #[test]
    fn document_round_trip_keeps_anchors() {
        let doc = super::helpers::doc(super::helpers::SMALL);
        let m = crate::CostMatrix::from_document(doc.clone()).unwrap();
        let mut back = m.to_document();
        // The synthetic destination becomes an (empty) origin row.
        let s: CellId = "_255000_6645000".parse().unwrap();
        assert!(back.rows.remove(&s).unwrap().is_empty());
        assert_eq!(back, doc);
    }
}

// ── Overrides ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod overrides {
    use std::io::Cursor;

    use odm_core::CellIdx;

    use crate::{ManualOverride, read_overrides};

    #[test]
    fn resolves_against_table() {
        let m = super::helpers::matrix(super::helpers::SMALL);
        let doc = read_overrides(Cursor::new(
            r#"{
                "_255000_6645000": ["22500006640000", 45.0],
                "22510006640000": ["99999990000000", 10.0],
                "11111110000000": ["22500006640000", 10.0]
            }"#,
        ))
        .unwrap();
        let (resolved, skipped) = doc.resolve(m.cells());
        assert_eq!(resolved.len(), 1);
        assert_eq!(skipped, 2);
        assert_eq!(
            resolved.get(CellIdx(2)),
            Some(ManualOverride { substitute: CellIdx(0), offset: 45.0 })
        );
        assert!(resolved.get(CellIdx(1)).is_none());
    }

    #[test]
    fn malformed_override_rejected() {
        assert!(read_overrides(Cursor::new(r#"{"1": ["2"]}"#)).is_err());
        assert!(read_overrides(Cursor::new(r#"{"1": ["zz", 3]}"#)).is_err());
    }
}
