//! Column ranges: closed intervals over one scalar type.
//!
//! A range shares the shape of [`Value`](crate::Value): one variant per scalar
//! kind. `contains` returns false for a value of a different type, so a level
//! tree never mixes types along one split column.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::value::Value;

/// Per-column partition of the observed value domain, in range order.
pub type ColumnRanges = BTreeMap<String, Vec<ColumnRange>>;

/// A closed interval `[min, max]` over values of one scalar type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ColumnRange {
    Int { min: i64, max: i64 },
    Float { min: f64, max: f64 },
    #[serde(rename = "string")]
    Str { min: String, max: String },
}

impl ColumnRange {
    /// Build a range from two bounds of the same scalar type.
    pub fn from_bounds(min: &Value, max: &Value) -> Result<ColumnRange> {
        match (min, max) {
            (Value::Int(a), Value::Int(b)) => Ok(ColumnRange::Int { min: *a, max: *b }),
            (Value::Float(a), Value::Float(b)) => Ok(ColumnRange::Float { min: *a, max: *b }),
            (Value::Str(a), Value::Str(b)) => Ok(ColumnRange::Str {
                min: a.clone(),
                max: b.clone(),
            }),
            _ => Err(Error::Invariant(format!(
                "range bounds have mixed types: {:?} and {:?}",
                min.value_type(),
                max.value_type()
            ))),
        }
    }

    /// True if the range may contain `v`. Always false across types.
    pub fn contains(&self, v: &Value) -> bool {
        match (self, v) {
            (ColumnRange::Int { min, max }, Value::Int(n)) => min <= n && n <= max,
            (ColumnRange::Float { min, max }, Value::Float(x)) => min <= x && x <= max,
            (ColumnRange::Str { min, max }, Value::Str(s)) => {
                min.as_str() <= s.as_str() && s.as_str() <= max.as_str()
            }
            _ => false,
        }
    }

    /// True if the range represents a single value.
    pub fn single(&self) -> bool {
        match self {
            ColumnRange::Int { min, max } => min == max,
            ColumnRange::Float { min, max } => min == max,
            ColumnRange::Str { min, max } => min == max,
        }
    }

    /// The min value in the range (inclusive).
    pub fn min_value(&self) -> Value {
        match self {
            ColumnRange::Int { min, .. } => Value::Int(*min),
            ColumnRange::Float { min, .. } => Value::Float(*min),
            ColumnRange::Str { min, .. } => Value::Str(min.clone()),
        }
    }
}

impl fmt::Display for ColumnRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.single() {
            return write!(f, "{{{}}}", self.min_value());
        }
        match self {
            ColumnRange::Int { min, max } => write!(f, "[{}, {}]", min, max),
            ColumnRange::Float { min, max } => write!(f, "[{}, {}]", min, max),
            ColumnRange::Str { min, max } => write!(f, "[{}, {}]", min, max),
        }
    }
}
