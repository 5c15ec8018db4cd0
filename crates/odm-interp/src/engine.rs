//! The `FillEngine` struct and its passes.

use odm_core::{CellIdx, FillConfig};
use odm_matrix::{CostEntry, CostMatrix, ManualOverrides};
use odm_spatial::NeighborGraph;

use crate::fallback::{manual_override, reverse_fallback};
use crate::postprocess::{correct_outliers, synthesize_self_distances};
use crate::strategy::{StrategyInput, resolve};
use crate::{Diagnostics, FillObserver, Pass, Progress, UnresolvedPairs};

/// The matrix-completion engine.
///
/// Owns the working matrix and drives the passes in order:
///
/// 1. **Cascade**: every off-diagonal pair missing from the measured matrix,
///    ascending by `(origin, destination)`, is given the first estimate any
///    [`Strategy`][crate::Strategy] produces from the measured snapshot.
/// 2. **Manual overrides**: pairs the cascade left unresolved are estimated
///    through substitute cells, reading the working matrix.
/// 3. **Reverse fallback**: pairs still unresolved copy their reverse if an
///    earlier pass filled it.
/// 4. **Outlier correction** of lattice-neighbor pairs.
/// 5. **Self-distance** synthesis for every cell without a diagonal.
///
/// Create via [`FillEngineBuilder`][crate::FillEngineBuilder].
pub struct FillEngine {
    pub config: FillConfig,

    /// Neighbor sets over every cell.  Read-only.
    pub graph: NeighborGraph,

    /// The matrix as loaded.  Strategies read only this.
    pub(crate) measured: CostMatrix,

    /// The working matrix.  Every pass writes here.
    pub(crate) matrix: CostMatrix,

    pub(crate) overrides:   ManualOverrides,
    pub(crate) unresolved:  UnresolvedPairs,
    pub(crate) diagnostics: Diagnostics,
    pub(crate) finished:    bool,
}

/// Everything a completed run produces.
#[derive(Debug, Clone)]
pub struct FillOutcome {
    pub matrix:      CostMatrix,
    pub graph:       NeighborGraph,
    /// Pairs no pass could fill.
    pub unresolved:  UnresolvedPairs,
    pub diagnostics: Diagnostics,
}

impl FillEngine {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run every pass.  Calling `run` again after it has completed does
    /// nothing.
    pub fn run<O: FillObserver>(&mut self, observer: &mut O) {
        if self.finished {
            return;
        }
        self.cascade(observer);
        self.manual_overrides(observer);
        self.reverse_fallback(observer);
        self.postprocess(observer);
        self.finished = true;
        observer.on_fill_end(&self.diagnostics);
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn matrix(&self) -> &CostMatrix {
        &self.matrix
    }

    pub fn unresolved(&self) -> &UnresolvedPairs {
        &self.unresolved
    }

    /// Consume the engine and hand back its results.  Runs the passes with
    /// no observer first if [`run`](Self::run) has not been called.
    pub fn finalize(mut self) -> FillOutcome {
        self.run(&mut crate::NoopObserver);
        FillOutcome {
            matrix:      self.matrix,
            graph:       self.graph,
            unresolved:  self.unresolved,
            diagnostics: self.diagnostics,
        }
    }

    // ── Passes ────────────────────────────────────────────────────────────

    fn cascade<O: FillObserver>(&mut self, observer: &mut O) {
        let pairs = self.measured.missing_pairs();
        let total = pairs.len();
        self.diagnostics.missing_pairs = total;
        observer.on_pass_start(Pass::Cascade, total);

        let input = StrategyInput {
            measured:            &self.measured,
            graph:               &self.graph,
            min_average_samples: self.config.min_average_samples,
        };
        let interval = self.config.progress_interval.max(1);

        for (i, &(origin, destination)) in pairs.iter().enumerate() {
            match resolve(&input, origin, destination) {
                Some((strategy, cost)) => {
                    self.matrix.insert_if_absent(origin, destination, CostEntry::Bare(cost));
                    self.diagnostics.strategies.record(strategy);
                }
                None => {
                    self.unresolved.insert(origin, destination);
                }
            }
            let done = i + 1;
            if done % interval == 0 || done == total {
                observer.on_progress(&Progress {
                    done,
                    total,
                    counters:   &self.diagnostics.strategies,
                    unresolved: self.unresolved.len(),
                });
            }
        }

        self.diagnostics.unresolved_after_cascade = self.unresolved.len();
        observer.on_pass_end(Pass::Cascade, &self.diagnostics);
    }

    fn manual_overrides<O: FillObserver>(&mut self, observer: &mut O) {
        observer.on_pass_start(Pass::ManualOverride, self.unresolved.len());
        if !self.overrides.is_empty() {
            let filled = self.fill_unresolved(|m, o, d, overrides| manual_override(m, overrides, o, d));
            self.diagnostics.manual_override = filled;
        }
        observer.on_pass_end(Pass::ManualOverride, &self.diagnostics);
    }

    fn reverse_fallback<O: FillObserver>(&mut self, observer: &mut O) {
        observer.on_pass_start(Pass::ReverseFallback, self.unresolved.len());
        let filled = self.fill_unresolved(|m, o, d, _| reverse_fallback(m, o, d));
        self.diagnostics.reverse_fallback = filled;
        self.diagnostics.unresolved_final = self.unresolved.len();
        observer.on_pass_end(Pass::ReverseFallback, &self.diagnostics);
    }

    fn postprocess<O: FillObserver>(&mut self, observer: &mut O) {
        let cells = self.graph.cell_count();

        observer.on_pass_start(Pass::OutlierCorrection, cells);
        let outliers = correct_outliers(&mut self.matrix, &self.graph, &self.config);
        self.diagnostics.outliers_averaged = outliers.averaged;
        self.diagnostics.outliers_clamped = outliers.clamped;
        observer.on_pass_end(Pass::OutlierCorrection, &self.diagnostics);

        observer.on_pass_start(Pass::SelfDistance, cells);
        let own = synthesize_self_distances(&mut self.matrix, &self.graph, &self.config);
        self.diagnostics.self_measured = own.measured;
        self.diagnostics.self_from_lattice = own.from_lattice;
        self.diagnostics.self_from_mean_of_means = own.from_mean_of_means;
        self.diagnostics.mean_of_means = own.mean_of_means;
        observer.on_pass_end(Pass::SelfDistance, &self.diagnostics);
    }

    /// Visit the unresolved pairs in ascending order and fill each one
    /// `estimate` answers for.  Values written here are visible to the pairs
    /// visited after it.  Returns the number of pairs filled.
    fn fill_unresolved<F>(&mut self, estimate: F) -> usize
    where
        F: Fn(&CostMatrix, CellIdx, CellIdx, &ManualOverrides) -> Option<f64>,
    {
        let pending: Vec<(CellIdx, CellIdx)> = self.unresolved.iter().collect();
        let mut filled = 0;
        for (origin, destination) in pending {
            if let Some(cost) = estimate(&self.matrix, origin, destination, &self.overrides) {
                self.matrix.insert_if_absent(origin, destination, CostEntry::Bare(cost));
                self.unresolved.remove(origin, destination);
                filled += 1;
            }
        }
        filled
    }
}
