//! Post-processing over the assembled matrix.
//!
//! Runs after every fill pass:
//!
//! 1. [`correct_outliers`]: symmetric repair of lattice-neighbor pairs.
//! 2. [`synthesize_self_distances`]: diagonal entries from half-costs to
//!    lattice neighbors, then the mean of means for cells without enough
//!    neighbor data.
//!
//! Correction comes first so the half-costs are taken from repaired values.

use odm_core::{CellIdx, FillConfig};
use odm_matrix::{CostEntry, CostMatrix};
use odm_spatial::NeighborGraph;

/// Outcome of [`correct_outliers`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutlierStats {
    pub averaged: usize,
    pub clamped:  usize,
}

/// Repair asymmetric lattice-neighbor pairs.
///
/// For each unordered pair `{a, b}` of lattice neighbors with both directions
/// present, let `d = |cost(a→b) − cost(b→a)|`:
///
/// | Condition                    | Result                         |
/// |------------------------------|--------------------------------|
/// | `d < average`                | unchanged                      |
/// | `average ≤ d < clamp`        | both set to the mean           |
/// | `clamp ≤ d`                  | the higher set to the lower    |
///
/// Anchors of corrected entries are kept.
pub fn correct_outliers(matrix: &mut CostMatrix, graph: &NeighborGraph, cfg: &FillConfig) -> OutlierStats {
    let mut stats = OutlierStats::default();
    for a in (0..graph.cell_count() as u32).map(CellIdx) {
        for &b in graph.lattice(a).iter().filter(|&&b| b > a) {
            let (Some(ab), Some(ba)) = (matrix.cost(a, b), matrix.cost(b, a)) else { continue };
            let diff = (ab - ba).abs();
            if diff >= cfg.outlier_clamp_threshold {
                let low = ab.min(ba);
                matrix.set_cost(a, b, low);
                matrix.set_cost(b, a, low);
                stats.clamped += 1;
                log::debug!("clamped {a} <-> {b}: {ab} / {ba} -> {low}");
            } else if diff >= cfg.outlier_average_threshold {
                let mean = (ab + ba) / 2.0;
                matrix.set_cost(a, b, mean);
                matrix.set_cost(b, a, mean);
                stats.averaged += 1;
                log::debug!("averaged {a} <-> {b}: {ab} / {ba} -> {mean}");
            }
        }
    }
    stats
}

/// Outcome of [`synthesize_self_distances`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SelfDistanceStats {
    /// Diagonal entries that were already present and left untouched.
    pub measured:           usize,
    pub from_lattice:       usize,
    pub from_mean_of_means: usize,
    /// Value given to deferred cells, if any were deferred.
    pub mean_of_means:      Option<f64>,
}

/// Give every cell a diagonal entry.  Measured diagonals are never replaced.
///
/// A cell without one, with at least `min_lattice_neighbors` lattice
/// neighbors and at least `min_self_samples` half-cost samples, gets the mean
/// of `cost(cell→n)/2` and `cost(n→cell)/2` over its lattice neighbors `n`.
/// Every other cell without a diagonal is deferred and gets the mean of the
/// values synthesized that way; failing that the mean of the measured
/// diagonal entries; failing that `0.0`.
pub fn synthesize_self_distances(
    matrix: &mut CostMatrix,
    graph:  &NeighborGraph,
    cfg:    &FillConfig,
) -> SelfDistanceStats {
    let mut stats = SelfDistanceStats::default();
    let mut measured_sum = 0.0;
    let mut synthesized = Vec::new();
    let mut deferred = Vec::new();

    for cell in (0..graph.cell_count() as u32).map(CellIdx) {
        if let Some(own) = matrix.cost(cell, cell) {
            stats.measured += 1;
            measured_sum += own;
            continue;
        }
        match lattice_estimate(matrix, graph, cfg, cell) {
            Some(value) => synthesized.push((cell, value)),
            None => deferred.push(cell),
        }
    }

    // Samples are off-diagonal, so writing the diagonal afterwards does not
    // change any other cell's estimate.
    stats.from_lattice = synthesized.len();
    let synthesized_sum: f64 = synthesized.iter().map(|&(_, v)| v).sum();
    for (cell, value) in synthesized {
        matrix.insert_if_absent(cell, cell, CostEntry::Bare(value));
    }

    if deferred.is_empty() {
        return stats;
    }
    let fallback = if stats.from_lattice > 0 {
        synthesized_sum / stats.from_lattice as f64
    } else if stats.measured > 0 {
        log::warn!("no self-distance could be synthesized; deferred cells use the mean of measured diagonal entries");
        measured_sum / stats.measured as f64
    } else {
        log::warn!("no self-distance data at all; deferred cells get 0");
        0.0
    };
    log::debug!("{} cells deferred to the mean of means ({fallback:.2})", deferred.len());
    for &cell in &deferred {
        matrix.insert_if_absent(cell, cell, CostEntry::Bare(fallback));
    }
    stats.from_mean_of_means = deferred.len();
    stats.mean_of_means = Some(fallback);
    stats
}

fn lattice_estimate(matrix: &CostMatrix, graph: &NeighborGraph, cfg: &FillConfig, cell: CellIdx) -> Option<f64> {
    let neighbors = graph.lattice(cell);
    if neighbors.len() < cfg.min_lattice_neighbors {
        return None;
    }
    let (sum, n) = neighbors
        .iter()
        .flat_map(|&n| [matrix.cost(cell, n), matrix.cost(n, cell)])
        .flatten()
        .fold((0.0, 0usize), |(s, k), c| (s + c / 2.0, k + 1));
    (n >= cfg.min_self_samples).then(|| sum / n as f64)
}
