//! Cost models for candidate trees.
//!
//! Access cost estimates how much of the tree a constrained scan touches:
//! a level filtered out by the constraints contributes nothing; otherwise it
//! pays for each child visited plus its residual events. Size cost is the
//! byte length of the canonical serialized form and ignores constraints.

use strata_core::{ConstraintSet, Level, Result};

/// Cost of visiting one level.
pub const COST_LEVEL: u64 = 1000;
/// Cost of reading one residual event.
pub const COST_EVENT: u64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostKind {
    /// Constraint-weighted traversal cost.
    Access,
    /// Serialized footprint in bytes.
    Size,
}

/// Constraint-weighted traversal cost of a (sub)tree.
///
/// `events_scale` compensates for candidate trees built from a sample: the
/// event term is multiplied by `total_events / sample_target` so sampled
/// costs are comparable to full-data costs.
pub fn access_cost(level: &Level, constraints: &ConstraintSet, events_scale: f64) -> u64 {
    if !constraints.check_level(level) {
        // Doesn't meet constraints; skipped.
        return 0;
    }
    let mut cost = 0;
    for sublevel in &level.sublevels {
        cost += COST_LEVEL + access_cost(sublevel, constraints, events_scale);
    }
    cost + (COST_EVENT as f64 * level.events.len() as f64 * events_scale) as u64
}

/// Byte length of the canonical serialized form of the tree.
pub fn size_cost(level: &Level) -> Result<u64> {
    Ok(serde_json::to_vec(level)?.len() as u64)
}
