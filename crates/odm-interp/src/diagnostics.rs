//! Run counters.
//!
//! Everything the engine degrades on is counted here rather than raised as
//! an error, so the completeness of a run can be inspected afterwards.

use std::ops::Index;

use crate::Strategy;

/// Pairs resolved by each cascade strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrategyCounters {
    counts: [usize; Strategy::ALL.len()],
}

impl StrategyCounters {
    #[inline]
    pub fn record(&mut self, strategy: Strategy) {
        self.counts[strategy.index()] += 1;
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `(strategy, count)` in cascade order.
    pub fn iter(&self) -> impl Iterator<Item = (Strategy, usize)> + '_ {
        Strategy::ALL.into_iter().map(|s| (s, self.counts[s.index()]))
    }
}

impl Index<Strategy> for StrategyCounters {
    type Output = usize;

    fn index(&self, strategy: Strategy) -> &usize {
        &self.counts[strategy.index()]
    }
}

/// All counters for one fill run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    // ── Inputs ────────────────────────────────────────────────────────────
    pub cells:             usize,
    pub measured_entries:  usize,
    pub merge_conflicts:   usize,
    pub overrides_loaded:  usize,
    pub overrides_skipped: usize,
    /// Cells with fewer close neighbors than `min_close_neighbors`.
    pub isolated_cells:    usize,

    // ── Cascade and fallbacks ─────────────────────────────────────────────
    /// Off-diagonal pairs missing from the measured matrix.
    pub missing_pairs:            usize,
    pub strategies:               StrategyCounters,
    pub unresolved_after_cascade: usize,
    pub manual_override:          usize,
    pub reverse_fallback:         usize,
    pub unresolved_final:         usize,

    // ── Post-processing ───────────────────────────────────────────────────
    pub outliers_averaged:       usize,
    pub outliers_clamped:        usize,
    /// Diagonal entries already present before post-processing.
    pub self_measured:           usize,
    pub self_from_lattice:       usize,
    pub self_from_mean_of_means: usize,
    /// Value given to deferred diagonals, if any were deferred.
    pub mean_of_means:           Option<f64>,
}

impl Diagnostics {
    /// Every counter as a `(name, value)` row, in a fixed order.
    pub fn summary(&self) -> Vec<(&'static str, f64)> {
        let mut rows = vec![
            ("cells", self.cells as f64),
            ("measured_entries", self.measured_entries as f64),
            ("merge_conflicts", self.merge_conflicts as f64),
            ("overrides_loaded", self.overrides_loaded as f64),
            ("overrides_skipped", self.overrides_skipped as f64),
            ("isolated_cells", self.isolated_cells as f64),
            ("missing_pairs", self.missing_pairs as f64),
        ];
        rows.extend(self.strategies.iter().map(|(s, n)| (s.name(), n as f64)));
        rows.extend([
            ("unresolved_after_cascade", self.unresolved_after_cascade as f64),
            ("manual_override", self.manual_override as f64),
            ("reverse_fallback", self.reverse_fallback as f64),
            ("unresolved_final", self.unresolved_final as f64),
            ("outliers_averaged", self.outliers_averaged as f64),
            ("outliers_clamped", self.outliers_clamped as f64),
            ("self_measured", self.self_measured as f64),
            ("self_from_lattice", self.self_from_lattice as f64),
            ("self_from_mean_of_means", self.self_from_mean_of_means as f64),
        ]);
        if let Some(v) = self.mean_of_means {
            rows.push(("mean_of_means", v));
        }
        rows
    }
}
