//! Constraints document reader: a JSON list of constraint sets.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use strata_core::ConstraintSet;

use crate::error::Result;

pub fn read_constraint_sets(path: impl AsRef<Path>) -> Result<Vec<ConstraintSet>> {
    let file = File::open(path)?;
    read_constraint_sets_from(BufReader::new(file))
}

pub fn read_constraint_sets_from(reader: impl Read) -> Result<Vec<ConstraintSet>> {
    Ok(serde_json::from_reader(reader)?)
}
