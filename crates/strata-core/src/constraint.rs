//! Anticipated query constraints.
//!
//! A constraint set models one query the generated tree will serve. The
//! access-cost model prunes a subtree as soon as its level fails the set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::level::Level;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintOperator {
    #[serde(rename = "=")]
    Equals,
    #[serde(rename = "!=")]
    NotEquals,
}

/// A constraint on a particular column.
///
/// The `column` field repeats the key it is filed under in a
/// [`ConstraintSet`], for symmetry with how constraints are emitted elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub column: String,
    pub operator: ConstraintOperator,
    pub value: Value,
}

/// A set of constraints over a number of columns, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstraintSet(BTreeMap<String, Vec<Constraint>>);

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, constraint: Constraint) {
        self.0.entry(column.into()).or_default().push(constraint);
    }

    pub fn constrains(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// False if the level's range cannot satisfy this set's constraints on
    /// the level's column. A level with no column (the root) always passes.
    pub fn check_level(&self, level: &Level) -> bool {
        let Some(constraints) = self.0.get(&level.column) else {
            return true;
        };
        let Some(range) = level.range.as_ref() else {
            return true;
        };
        for cons in constraints {
            if range.contains(&cons.value) {
                if cons.operator == ConstraintOperator::NotEquals {
                    return false;
                }
            } else if cons.operator == ConstraintOperator::Equals {
                return false;
            }
        }
        true
    }
}
