//! Run configuration.
//!
//! Every threshold the fill engine uses is a field here.  The defaults are
//! tuned for a 1 km canonical grid with travel costs in seconds; other
//! datasets are expected to override them from a JSON file.

use crate::{CoreError, CoreResult, Grid};

/// Top-level configuration for one matrix-completion run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FillConfig {
    /// Canonical grid used to resolve cell ids to coordinates.
    pub grid: Grid,

    /// Radius (m) of the "close" neighbor set used by the averaging strategies.
    pub close_radius: f64,

    /// Radius (m) of the "extended" neighbor set used by the middleman strategies.
    pub extended_radius: f64,

    /// Radius (m) of the lattice neighbor set used by post-processing.
    /// Slightly above one cell size so that edge-adjacent cells qualify.
    pub lattice_radius: f64,

    /// Cells with fewer close neighbors than this are reported as isolated.
    pub min_close_neighbors: usize,

    /// Minimum number of samples before an averaging strategy answers.
    pub min_average_samples: usize,

    /// Cells with fewer lattice neighbors than this skip self-distance
    /// synthesis and fall back to the mean of means.
    pub min_lattice_neighbors: usize,

    /// Minimum number of half-cost samples for a synthesized self-distance.
    pub min_self_samples: usize,

    /// Lower bound of the asymmetry band where both directions are averaged.
    pub outlier_average_threshold: f64,

    /// Asymmetry at or above which the higher direction is clamped to the lower.
    pub outlier_clamp_threshold: f64,

    /// Report cascade progress every N pairs.
    pub progress_interval: usize,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            grid:                      Grid::default(),
            close_radius:              6_000.0,
            extended_radius:           10_000.0,
            lattice_radius:            1_001.0,
            min_close_neighbors:       3,
            min_average_samples:       2,
            min_lattice_neighbors:     3,
            min_self_samples:          3,
            outlier_average_threshold: 200.0,
            outlier_clamp_threshold:   250.0,
            progress_interval:         200,
        }
    }
}

impl FillConfig {
    /// Check internal consistency.  Called by the engine builder; callers
    /// that assemble a config by hand may call it earlier.
    pub fn validate(&self) -> CoreResult<()> {
        let radii = [
            ("close_radius", self.close_radius),
            ("extended_radius", self.extended_radius),
            ("lattice_radius", self.lattice_radius),
        ];
        for (name, r) in radii {
            if !(r.is_finite() && r > 0.0) {
                return Err(CoreError::Config(format!("{name} must be a positive number, got {r}")));
            }
        }
        if self.close_radius > self.extended_radius {
            return Err(CoreError::Config(format!(
                "close_radius ({}) must not exceed extended_radius ({})",
                self.close_radius, self.extended_radius
            )));
        }
        if self.grid.cell_size == 0 {
            return Err(CoreError::Config("grid.cell_size must be non-zero".into()));
        }
        if !(self.outlier_average_threshold >= 0.0
            && self.outlier_average_threshold < self.outlier_clamp_threshold)
        {
            return Err(CoreError::Config(format!(
                "outlier thresholds must satisfy 0 <= average ({}) < clamp ({})",
                self.outlier_average_threshold, self.outlier_clamp_threshold
            )));
        }
        if self.min_average_samples == 0 || self.min_self_samples == 0 {
            return Err(CoreError::Config(
                "min_average_samples and min_self_samples must be at least 1".into(),
            ));
        }
        if self.progress_interval == 0 {
            return Err(CoreError::Config("progress_interval must be at least 1".into()));
        }
        Ok(())
    }
}
