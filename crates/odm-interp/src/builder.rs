//! Fluent builder for constructing a [`FillEngine`].

use odm_core::FillConfig;
use odm_matrix::{CostMatrix, ManualOverrides, MatrixDocument, MergeStats, OverrideDocument};
use odm_spatial::{NeighborGraph, NeighborRadii};

use crate::{Diagnostics, FillEngine, FillResult};

/// Fluent builder for [`FillEngine`].
///
/// # Required inputs
///
/// - [`FillConfig`] — radii, sample minimums, outlier thresholds, grid
/// - [`CostMatrix`] — the measured matrix
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                |
/// |---------------------|------------------------|
/// | `.overrides(doc)`   | no manual overrides    |
/// | `.merge_stats(s)`   | no merge conflicts     |
///
/// # Example
///
/// ```rust,ignore
/// let (doc, stats) = load_documents(&paths)?;
/// let mut engine = FillEngineBuilder::from_document(config, doc)?
///     .overrides(load_overrides(&override_path)?)
///     .merge_stats(stats)
///     .build()?;
/// engine.run(&mut LogObserver);
/// let outcome = engine.finalize();
/// ```
pub struct FillEngineBuilder {
    config:    FillConfig,
    matrix:    CostMatrix,
    overrides: Option<OverrideDocument>,
    merge:     MergeStats,
}

impl FillEngineBuilder {
    pub fn new(config: FillConfig, matrix: CostMatrix) -> Self {
        Self { config, matrix, overrides: None, merge: MergeStats::default() }
    }

    /// Intern `doc` and start a builder over it.
    pub fn from_document(config: FillConfig, doc: MatrixDocument) -> FillResult<Self> {
        Ok(Self::new(config, CostMatrix::from_document(doc)?))
    }

    /// Supply the manual override document.  Entries that do not apply to
    /// the matrix are skipped and counted at build time.
    pub fn overrides(mut self, doc: OverrideDocument) -> Self {
        self.overrides = Some(doc);
        self
    }

    /// Record how the input documents were merged, for the diagnostics.
    pub fn merge_stats(mut self, stats: MergeStats) -> Self {
        self.merge = stats;
        self
    }

    /// Validate the configuration, resolve every cell, build the neighbor
    /// graph, and snapshot the measured matrix.
    pub fn build(self) -> FillResult<FillEngine> {
        self.config.validate()?;

        let graph = NeighborGraph::from_cells(
            self.matrix.cells().ids(),
            &self.config.grid,
            NeighborRadii::from(&self.config),
        )?;

        let isolated = graph.isolated(self.config.min_close_neighbors);
        for &cell in &isolated {
            log::debug!(
                "isolated cell {}: {} close neighbors",
                self.matrix.cells().id(cell),
                graph.close(cell).len()
            );
        }
        if !isolated.is_empty() {
            log::info!(
                "{} of {} cells have fewer than {} close neighbors",
                isolated.len(),
                graph.cell_count(),
                self.config.min_close_neighbors
            );
        }

        let (overrides, skipped) = match &self.overrides {
            Some(doc) => doc.resolve(self.matrix.cells()),
            None => (ManualOverrides::default(), 0),
        };

        let diagnostics = Diagnostics {
            cells:             self.matrix.cell_count(),
            measured_entries:  self.matrix.entry_count(),
            merge_conflicts:   self.merge.conflicts,
            overrides_loaded:  overrides.len(),
            overrides_skipped: skipped,
            isolated_cells:    isolated.len(),
            ..Diagnostics::default()
        };
        log::info!(
            "fill engine ready: {} cells, {} measured entries, {} manual overrides",
            diagnostics.cells,
            diagnostics.measured_entries,
            diagnostics.overrides_loaded
        );

        Ok(FillEngine {
            measured:   self.matrix.clone(),
            matrix:     self.matrix,
            config:     self.config,
            graph,
            overrides,
            unresolved: Default::default(),
            diagnostics,
            finished:   false,
        })
    }
}
