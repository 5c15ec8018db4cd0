//! Second and third passes over the pairs the cascade left unresolved.
//!
//! Both read the *working* matrix, which already holds the cascade's
//! estimates and every value filled earlier in the same pass.

use odm_core::CellIdx;
use odm_matrix::{CostMatrix, ManualOverride, ManualOverrides};

/// Estimate a pair through a hand-curated substitute cell.
///
/// The origin's override (S, k) is tried first: cost(destination → S) + k,
/// else cost(S → destination) + k.  Then the destination's: cost(S → origin)
/// + k, else cost(origin → S) + k.  Results are clamped at zero so a negative
/// offset cannot produce a negative cost.
pub fn manual_override(
    matrix:      &CostMatrix,
    overrides:   &ManualOverrides,
    origin:      CellIdx,
    destination: CellIdx,
) -> Option<f64> {
    let via_origin = overrides.get(origin).and_then(|ManualOverride { substitute, offset }| {
        matrix
            .cost(destination, substitute)
            .or_else(|| matrix.cost(substitute, destination))
            .map(|c| c + offset)
    });
    let value = via_origin.or_else(|| {
        overrides.get(destination).and_then(|ManualOverride { substitute, offset }| {
            matrix
                .cost(substitute, origin)
                .or_else(|| matrix.cost(origin, substitute))
                .map(|c| c + offset)
        })
    })?;
    Some(value.max(0.0))
}

/// The reverse direction, if it has become available.
#[inline]
pub fn reverse_fallback(matrix: &CostMatrix, origin: CellIdx, destination: CellIdx) -> Option<f64> {
    matrix.cost(destination, origin)
}
