#![forbid(unsafe_code)]
//! strata-core: the Strata data model.
//!
//! Responsibilities:
//! - Typed scalar values and events (maps from field name to value).
//! - Column ranges (closed intervals over one scalar type).
//! - Query constraints and constraint sets.
//! - The level tree: the hierarchical, range-partitioned representation of an
//!   event batch, with insertion (`push`) and simplification (`trim`).
//!
//! **No I/O and no search policy** here. The gen crate drives generation; the
//! io crate handles files.

pub mod config;
pub mod constraint;
pub mod error;
pub mod event;
pub mod level;
pub mod prelude;
pub mod range;
pub mod value;

pub use config::GenConfig;
pub use constraint::{Constraint, ConstraintOperator, ConstraintSet};
pub use error::{Error, Result};
pub use event::Event;
pub use level::Level;
pub use range::{ColumnRange, ColumnRanges};
pub use value::{Value, ValueType};
