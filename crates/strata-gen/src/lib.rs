#![forbid(unsafe_code)]
//! strata-gen: builds a level tree for an event batch.
//!
//! Responsibilities:
//! - Choose the columns eligible to split on.
//! - Partition each column's value domain into ranges.
//! - Search column orderings with a cost model (access or size).
//! - Rebuild the winning tree from the full event batch and trim it.
//!
//! **No I/O** here. The io crate reads events and constraints and writes the
//! resulting level.

pub mod columns;
pub mod cost;
pub mod generate;
pub mod permute;
pub mod ranges;
pub mod search;

pub use cost::{access_cost, size_cost, CostKind, COST_EVENT, COST_LEVEL};
pub use generate::generate;
pub use search::SearchOutcome;
