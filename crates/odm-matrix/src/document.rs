//! JSON matrix documents: reading, writing, merging.
//!
//! Cell keys are parsed into [`CellId`]s and leaves into [`CostEntry`]s while
//! the document is read, so a malformed key or leaf anywhere in the file
//! aborts the load with a positioned `serde_json` error.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use odm_core::CellId;

use crate::{CostEntry, MatrixResult};

/// A whole matrix document: origin → destination → entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatrixDocument {
    pub rows: BTreeMap<CellId, BTreeMap<CellId, CostEntry>>,
}

/// Outcome of [`MatrixDocument::merge`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Entries copied from the incoming document.
    pub added: usize,
    /// Incoming entries dropped because the pair was already defined.
    pub conflicts: usize,
}

impl MatrixDocument {
    pub fn entry_count(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    /// Fold `other` into `self`.  Pairs already present keep their value;
    /// the incoming duplicate is counted as a conflict.
    pub fn merge(&mut self, other: MatrixDocument) -> MergeStats {
        let mut stats = MergeStats::default();
        for (origin, incoming) in other.rows {
            let row = self.rows.entry(origin).or_default();
            for (destination, entry) in incoming {
                match row.entry(destination) {
                    Entry::Vacant(slot) => {
                        slot.insert(entry);
                        stats.added += 1;
                    }
                    Entry::Occupied(_) => stats.conflicts += 1,
                }
            }
        }
        stats
    }
}

// ── Reading ───────────────────────────────────────────────────────────────────

/// Parse a document from any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`).
pub fn read_document<R: Read>(reader: R) -> MatrixResult<MatrixDocument> {
    Ok(serde_json::from_reader(BufReader::new(reader))?)
}

/// Parse a document from a file.
pub fn load_document(path: &Path) -> MatrixResult<MatrixDocument> {
    let file = File::open(path)?;
    let doc = read_document(file)?;
    log::info!(
        "loaded {}: {} origins, {} entries",
        path.display(),
        doc.rows.len(),
        doc.entry_count()
    );
    Ok(doc)
}

/// Load several documents and merge them in order; the first document to
/// define a pair wins.
pub fn load_documents<P: AsRef<Path>>(paths: &[P]) -> MatrixResult<(MatrixDocument, MergeStats)> {
    let mut merged = MatrixDocument::default();
    let mut total = MergeStats::default();
    for path in paths {
        let stats = merged.merge(load_document(path.as_ref())?);
        if stats.conflicts > 0 {
            log::warn!(
                "{}: {} pairs already defined by an earlier document were ignored",
                path.as_ref().display(),
                stats.conflicts
            );
        }
        total.added += stats.added;
        total.conflicts += stats.conflicts;
    }
    Ok((merged, total))
}

// ── Writing ───────────────────────────────────────────────────────────────────

/// Write `doc` as pretty-printed JSON.
pub fn write_document<W: Write>(doc: &MatrixDocument, writer: W) -> MatrixResult<()> {
    let mut out = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut out, doc)?;
    out.flush()?;
    Ok(())
}
