//! Interpolation strategies.
//!
//! Each strategy is a pure function of the measured snapshot and the neighbor
//! graph, returning `Some(cost)` when it can estimate the pair and `None`
//! otherwise.  [`Strategy::ALL`] is the cascade order.
//!
//! | Strategy                  | Estimate                                          |
//! |---------------------------|---------------------------------------------------|
//! | `Reverse`                 | cost(d → o)                                       |
//! | `MultiOrigin`             | mean of cost(m → d), m ∈ close(o)                 |
//! | `MultiOriginDestination`  | mean of cost(m → n), m ∈ close(o), n ∈ close(d)   |
//! | `Middleman`               | min of cost(o → m) + cost(m → d), m ∈ extended(o) |
//! | `DoubleMiddleman`         | min of leg(o, m) + leg(m, n) + leg(d, n)          |
//!
//! Neighbor lists are sorted by `CellIdx`, so sums and minima are taken in a
//! fixed order and every estimate is bit-for-bit reproducible.

use std::fmt;

use odm_core::CellIdx;
use odm_matrix::CostMatrix;
use odm_spatial::NeighborGraph;

/// Read-only inputs shared by every strategy.
#[derive(Clone, Copy)]
pub struct StrategyInput<'a> {
    /// The matrix exactly as loaded.
    pub measured: &'a CostMatrix,
    pub graph:    &'a NeighborGraph,
    /// Minimum number of samples before an averaging strategy answers.
    pub min_average_samples: usize,
}

/// One step of the interpolation cascade.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Strategy {
    Reverse,
    MultiOrigin,
    MultiOriginDestination,
    Middleman,
    DoubleMiddleman,
}

impl Strategy {
    /// Cascade order: the first strategy to answer wins.
    pub const ALL: [Strategy; 5] = [
        Strategy::Reverse,
        Strategy::MultiOrigin,
        Strategy::MultiOriginDestination,
        Strategy::Middleman,
        Strategy::DoubleMiddleman,
    ];

    /// Stable snake_case name, used in logs and summary files.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Reverse                => "reverse",
            Strategy::MultiOrigin            => "multi_origin",
            Strategy::MultiOriginDestination => "multi_origin_destination",
            Strategy::Middleman              => "middleman",
            Strategy::DoubleMiddleman        => "double_middleman",
        }
    }

    /// Position in [`Strategy::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn estimate(self, input: &StrategyInput<'_>, origin: CellIdx, destination: CellIdx) -> Option<f64> {
        match self {
            Strategy::Reverse                => reverse(input, origin, destination),
            Strategy::MultiOrigin            => multi_origin(input, origin, destination),
            Strategy::MultiOriginDestination => multi_origin_destination(input, origin, destination),
            Strategy::Middleman              => middleman(input, origin, destination),
            Strategy::DoubleMiddleman        => double_middleman(input, origin, destination),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Try every strategy in cascade order; return the first estimate and the
/// strategy that produced it.
pub fn resolve(input: &StrategyInput<'_>, origin: CellIdx, destination: CellIdx) -> Option<(Strategy, f64)> {
    Strategy::ALL
        .into_iter()
        .find_map(|s| s.estimate(input, origin, destination).map(|cost| (s, cost)))
}

// ── Strategies ────────────────────────────────────────────────────────────────

pub fn reverse(input: &StrategyInput<'_>, origin: CellIdx, destination: CellIdx) -> Option<f64> {
    input.measured.cost(destination, origin)
}

pub fn multi_origin(input: &StrategyInput<'_>, origin: CellIdx, destination: CellIdx) -> Option<f64> {
    let m = input.measured;
    let samples = input
        .graph
        .close(origin)
        .iter()
        .filter_map(|&near| m.cost(near, destination));
    mean_of(samples, input.min_average_samples)
}

pub fn multi_origin_destination(
    input:       &StrategyInput<'_>,
    origin:      CellIdx,
    destination: CellIdx,
) -> Option<f64> {
    let m = input.measured;
    let near_destination = input.graph.close(destination);
    let samples = input.graph.close(origin).iter().flat_map(|&from| {
        near_destination
            .iter()
            .filter_map(move |&to| m.cost(from, to))
    });
    mean_of(samples, input.min_average_samples)
}

pub fn middleman(input: &StrategyInput<'_>, origin: CellIdx, destination: CellIdx) -> Option<f64> {
    let m = input.measured;
    let routes = input.graph.extended(origin).iter().filter_map(|&mid| {
        Some(m.cost(origin, mid)? + m.cost(mid, destination)?)
    });
    min_of(routes)
}

/// Three-leg estimate through one intermediate near each endpoint.
///
/// The first two legs prefer the measurement in the travel direction.  The
/// last leg prefers destination → n.  Each falls back to the opposite
/// direction when its preferred one is missing.
pub fn double_middleman(input: &StrategyInput<'_>, origin: CellIdx, destination: CellIdx) -> Option<f64> {
    let m = input.measured;

    let first: Vec<(CellIdx, f64)> = input
        .graph
        .extended(origin)
        .iter()
        .filter_map(|&a| leg(m, origin, a).map(|c| (a, c)))
        .collect();
    if first.is_empty() {
        return None;
    }
    let last: Vec<(CellIdx, f64)> = input
        .graph
        .extended(destination)
        .iter()
        .filter_map(|&b| leg(m, destination, b).map(|c| (b, c)))
        .collect();

    let routes = first.iter().flat_map(|&(a, to_a)| {
        last.iter().filter(move |&&(b, _)| b != a).filter_map(move |&(b, from_b)| {
            leg(m, a, b).map(|between| to_a + between + from_b)
        })
    });
    min_of(routes)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// cost(from → to), or cost(to → from) if only that direction was measured.
#[inline]
fn leg(m: &CostMatrix, from: CellIdx, to: CellIdx) -> Option<f64> {
    m.cost(from, to).or_else(|| m.cost(to, from))
}

fn mean_of(samples: impl Iterator<Item = f64>, min_samples: usize) -> Option<f64> {
    let (sum, n) = samples.fold((0.0, 0usize), |(s, n), c| (s + c, n + 1));
    (n > 0 && n >= min_samples).then(|| sum / n as f64)
}

fn min_of(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.reduce(f64::min)
}
