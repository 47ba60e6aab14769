//! End-to-end generation: select columns, partition ranges, search orderings,
//! rebuild the winner from the full batch, trim.

use log::{debug, info};

use strata_core::{ConstraintSet, Event, GenConfig, Level, Result};

use crate::cost::CostKind;
use crate::{columns, ranges, search};

/// Generate a trimmed level tree for `events`.
///
/// The search scores candidate trees built from sampled events; the returned
/// tree is rebuilt from every event in input order using the winning prefix,
/// so it is deterministic given that ordering.
pub fn generate(
    events: &[Event],
    constraint_sets: &[ConstraintSet],
    kind: CostKind,
    config: &GenConfig,
) -> Result<Level> {
    let columns = columns::select_columns(events);
    info!("generation: considering column set {:?}", columns);

    let ranges = ranges::column_ranges(&columns, config.partition_count, events)?;
    if let Ok(json) = serde_json::to_string(&ranges) {
        debug!("generation: using column ranges {}", json);
    }

    let outcome = search::search_orderings(events, constraint_sets, &columns, &ranges, kind, config)?;
    info!(
        "generation: best column order with cost {}: {:?}",
        outcome.cost, outcome.order
    );

    // The sampled candidate is discarded; the final tree comes from the full
    // event batch.
    let mut level = Level::default();
    for event in events {
        level.push(event.clone(), &outcome.order, &ranges)?;
    }
    level.trim();
    Ok(level)
}
