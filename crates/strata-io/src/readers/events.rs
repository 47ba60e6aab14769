//! Events file reader: one JSON object per line.
//!
//! Empty lines are skipped. JSON numbers become integers when syntactically
//! integral and floats otherwise; any non-scalar value makes the line
//! malformed, which is fatal.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use strata_core::Event;

use crate::error::{Error, Result};

pub fn read_events(path: impl AsRef<Path>) -> Result<Vec<Event>> {
    let file = File::open(path)?;
    read_events_from(BufReader::new(file))
}

pub fn read_events_from(reader: impl BufRead) -> Result<Vec<Event>> {
    let mut events = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let event = serde_json::from_str(trimmed).map_err(|source| Error::MalformedEvent {
            line: i + 1,
            source,
        })?;
        events.push(event);
    }
    Ok(events)
}
