//! Matrix leaves.
//!
//! # Leaf shapes
//!
//! | JSON                      | `CostEntry`                                   |
//! |---------------------------|-----------------------------------------------|
//! | `63.4`                    | `Bare(63.4)`                                  |
//! | `[63.4]`                  | `Anchored { cost: 63.4, None, None }`         |
//! | `[63.4, a]`               | `Anchored { cost: 63.4, Some(a), None }`      |
//! | `[63.4, a, b]`            | `Anchored { cost: 63.4, Some(a), Some(b) }`   |
//!
//! `null` anchors read as `None`.  On output trailing `None` anchors are
//! dropped, so every accepted shape except an explicit trailing `null`
//! round-trips unchanged.  Costs must be finite and non-negative.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A routing endpoint recorded by the oracle that produced a measurement.
///
/// Opaque to this workspace: carried from input to output untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct Anchor(pub Value);

/// One directional travel-cost measurement or estimate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLeaf", into = "RawLeaf")]
pub enum CostEntry {
    /// A cost with no routing metadata.  Every synthesized entry is bare.
    Bare(f64),
    /// A cost written as an array, possibly with anchors.
    Anchored {
        cost:        f64,
        origin:      Option<Anchor>,
        destination: Option<Anchor>,
    },
}

impl CostEntry {
    #[inline]
    pub fn cost(&self) -> f64 {
        match self {
            CostEntry::Bare(c) => *c,
            CostEntry::Anchored { cost, .. } => *cost,
        }
    }

    /// Replace the cost, keeping any anchors.
    pub fn set_cost(&mut self, value: f64) {
        match self {
            CostEntry::Bare(c) => *c = value,
            CostEntry::Anchored { cost, .. } => *cost = value,
        }
    }
}

// ── Wire representation ───────────────────────────────────────────────────────

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawLeaf {
    Bare(f64),
    Record(Vec<Value>),
}

impl TryFrom<RawLeaf> for CostEntry {
    type Error = String;

    fn try_from(raw: RawLeaf) -> Result<Self, Self::Error> {
        match raw {
            RawLeaf::Bare(cost) => Ok(CostEntry::Bare(check_cost(cost)?)),
            RawLeaf::Record(items) => {
                if items.len() > 3 {
                    return Err(format!(
                        "cost record must have 1 to 3 elements, got {}",
                        items.len()
                    ));
                }
                let mut items = items.into_iter();
                let cost = match items.next() {
                    Some(Value::Number(n)) => n
                        .as_f64()
                        .ok_or_else(|| format!("cost {n} is not representable as f64"))?,
                    Some(other) => return Err(format!("cost must be a number, got {other}")),
                    None => return Err("cost record is empty".into()),
                };
                let anchor = |v: Option<Value>| v.filter(|v| !v.is_null()).map(Anchor);
                Ok(CostEntry::Anchored {
                    cost:        check_cost(cost)?,
                    origin:      anchor(items.next()),
                    destination: anchor(items.next()),
                })
            }
        }
    }
}

impl From<CostEntry> for RawLeaf {
    fn from(entry: CostEntry) -> Self {
        match entry {
            CostEntry::Bare(c) => RawLeaf::Bare(c),
            CostEntry::Anchored { cost, origin, destination } => {
                let mut items = vec![Value::from(cost)];
                match (origin, destination) {
                    (None, None) => {}
                    (Some(o), None) => items.push(o.0),
                    (o, Some(d)) => {
                        items.push(o.map_or(Value::Null, |a| a.0));
                        items.push(d.0);
                    }
                }
                RawLeaf::Record(items)
            }
        }
    }
}

fn check_cost(cost: f64) -> Result<f64, String> {
    if cost.is_finite() && cost >= 0.0 {
        Ok(cost)
    } else {
        Err(format!("cost must be finite and non-negative, got {cost}"))
    }
}
