//! Writes every output file of a fill run into one directory.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use odm_interp::FillOutcome;
use odm_matrix::write_document;

use crate::{NeighborDocument, OutputResult, UnresolvedDocument, write_summary};

pub const MATRIX_FILE:     &str = "od_matrix_filled.json";
pub const UNRESOLVED_FILE: &str = "unresolved_pairs.json";
pub const NEIGHBORS_FILE:  &str = "neighbors.json";
pub const SUMMARY_FILE:    &str = "fill_summary.csv";

/// An output directory.
pub struct OutputDir {
    dir: PathBuf,
}

impl OutputDir {
    /// Create `dir` (and its parents) if it does not exist.
    pub fn create(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self { dir: dir.to_path_buf() })
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Write the completed matrix, the unresolved pairs, the summary CSV and,
    /// if `neighbors` is set, the extended neighbor sets.  Returns the paths
    /// written.
    pub fn write_outcome(&self, outcome: &FillOutcome, neighbors: bool) -> OutputResult<Vec<PathBuf>> {
        let cells = outcome.matrix.cells();
        let mut written = Vec::with_capacity(4);

        let path = self.dir.join(MATRIX_FILE);
        write_document(&outcome.matrix.to_document(), File::create(&path)?)?;
        written.push(path);

        let unresolved = UnresolvedDocument::new(&outcome.unresolved, cells, &outcome.graph);
        written.push(self.write_json(UNRESOLVED_FILE, &unresolved)?);

        if neighbors {
            let doc = NeighborDocument::extended(cells, &outcome.graph);
            written.push(self.write_json(NEIGHBORS_FILE, &doc)?);
        }

        let path = self.dir.join(SUMMARY_FILE);
        write_summary(&outcome.diagnostics, File::create(&path)?)?;
        written.push(path);

        for path in &written {
            log::info!("wrote {}", path.display());
        }
        Ok(written)
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> OutputResult<PathBuf> {
        let path = self.dir.join(name);
        let mut out = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut out, value)?;
        out.flush()?;
        Ok(path)
    }
}
