//! Level file writer: the canonical JSON encoding of the root level.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use strata_core::Level;

use crate::error::Result;

pub fn write_level(path: impl AsRef<Path>, level: &Level) -> Result<()> {
    let file = File::create(path)?;
    write_level_to(BufWriter::new(file), level)
}

pub fn write_level_to(mut writer: impl Write, level: &Level) -> Result<()> {
    serde_json::to_writer(&mut writer, level)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::{ColumnRanges, Event, Value};

    #[test]
    fn writes_the_canonical_encoding_with_a_trailing_newline() {
        let mut level = Level::default();
        let mut event = Event::new();
        event.insert("a", Value::Int(1));
        level.push(event, &[], &ColumnRanges::new()).unwrap();

        let mut out = Vec::new();
        write_level_to(&mut out, &level).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));
        let reparsed: Level = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(reparsed, level);
    }

    #[test]
    fn round_trips_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.level");
        let level = Level::default();
        write_level(&path, &level).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.trim_end(), r#"{"count":0}"#);
    }
}
