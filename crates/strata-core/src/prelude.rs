//! Convenient re-exports for downstream crates.

pub use crate::config::GenConfig;
pub use crate::constraint::{Constraint, ConstraintOperator, ConstraintSet};
pub use crate::error::{Error, Result};
pub use crate::event::Event;
pub use crate::level::Level;
pub use crate::range::{ColumnRange, ColumnRanges};
pub use crate::value::{Value, ValueType};
