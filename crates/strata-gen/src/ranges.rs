//! Range partitioning: split each column's observed value domain into up to
//! `partition_count` contiguous ranges.
//!
//! Distinct values are collected per column, sorted in the type's natural
//! order, and cut into equal-length chunks; a non-dividing remainder goes to
//! the last chunk. The resulting ranges are ordered, disjoint, and cover
//! every observed value.

use std::collections::BTreeSet;

use strata_core::{ColumnRange, ColumnRanges, Event, Result, Value};

/// Compute the range partition for every column in `columns`.
pub fn column_ranges(
    columns: &[String],
    partition_count: usize,
    events: &[Event],
) -> Result<ColumnRanges> {
    let mut result = ColumnRanges::new();
    for column in columns {
        let mut distinct = BTreeSet::new();
        for event in events {
            if let Some(value) = event.get(column) {
                distinct.insert(value.clone());
            }
        }
        if distinct.is_empty() {
            continue;
        }
        let values: Vec<Value> = distinct.into_iter().collect();
        let mut ranges = Vec::new();
        for chunk in split_chunks(&values, partition_count) {
            ranges.push(ColumnRange::from_bounds(
                &chunk[0],
                &chunk[chunk.len() - 1],
            )?);
        }
        result.insert(column.clone(), ranges);
    }
    Ok(result)
}

/// Cut a sorted slice into `min(parts, len)` equal-length chunks, appending
/// the remainder to the last chunk.
fn split_chunks(values: &[Value], parts: usize) -> Vec<&[Value]> {
    let len = values.len();
    let parts = parts.min(len).max(1);
    let size = len / parts;
    let mut chunks: Vec<&[Value]> = (0..parts)
        .map(|i| &values[i * size..(i + 1) * size])
        .collect();
    if size * parts != len {
        chunks[parts - 1] = &values[(parts - 1) * size..];
    }
    chunks
}
