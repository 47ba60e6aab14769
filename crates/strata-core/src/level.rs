//! The level tree.
//!
//! A level covers one range of one column and holds either child levels
//! (split on the next column of the chosen ordering) or residual events.
//! Levels are mutable during `push`/`trim` and frozen thereafter.
//!
//! Invariants:
//! - `count == events.len() + Σ child.count` while insertion is running;
//!   after `trim`, events reduced to empty maps are elided but still counted.
//! - Every event under a non-root level has a `column` value inside `range`.
//! - A column in `fixed` is constant over the whole subtree and is removed
//!   from the stored form of the subtree's events.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::event::Event;
use crate::range::{ColumnRange, ColumnRanges};
use crate::value::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Column this level splits on. Empty at the root.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub column: String,

    /// Range of values covered by this level. None at the root.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub range: Option<ColumnRange>,

    /// Column the children split on. Empty at a leaf.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub sublevel_column: String,

    /// Ordered child levels; their ranges are the partition of
    /// `sublevel_column`'s value domain.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub sublevels: Vec<Level>,

    /// Residual events stored at this level.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub events: Vec<Event>,

    /// Columns whose value is constant over the entire subtree.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub fixed: BTreeMap<String, Value>,

    /// Total events represented by this subtree.
    pub count: u64,

    /// Per-numeric-column running sum over all events in the subtree.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub sums: BTreeMap<String, f64>,
}

impl Level {
    /// Insert an event, descending along `order` (the suffix of the chosen
    /// column ordering yet to consume).
    ///
    /// An event that lacks the next split column stays at this level. A value
    /// that falls into no child range is an invariant violation between the
    /// partitioner and the events.
    pub fn push(&mut self, event: Event, order: &[String], ranges: &ColumnRanges) -> Result<()> {
        self.count += 1;
        for (field, value) in event.iter() {
            if let Some(x) = value.as_numeric() {
                *self.sums.entry(field.to_string()).or_insert(0.0) += x;
            }
        }

        let Some(column) = order.first() else {
            self.events.push(event);
            return Ok(());
        };
        self.sublevel_column = column.clone();

        let Some(value) = event.get(column) else {
            // Terminal position: the split column is missing from the event.
            self.events.push(event);
            return Ok(());
        };

        if self.sublevels.is_empty() {
            for range in ranges.get(column).into_iter().flatten() {
                self.sublevels.push(Level {
                    column: column.clone(),
                    range: Some(range.clone()),
                    ..Level::default()
                });
            }
        }

        let Some(child) = self
            .sublevels
            .iter_mut()
            .find(|s| s.range.as_ref().is_some_and(|r| r.contains(value)))
        else {
            return Err(Error::Invariant(format!(
                "no sublevel range of column '{}' contains {:?}",
                column, value
            )));
        };

        let mut event = event;
        if child.range.as_ref().is_some_and(ColumnRange::single) {
            // Single-value range: the column is implied by the child, so it
            // is factored out of the stored event.
            event.remove(column);
        }
        child.push(event, &order[1..], ranges)
    }

    /// Flatten the level: drop empty children, collapse single-value chains
    /// into `fixed` entries, and elide events that became empty maps.
    ///
    /// Idempotent: a second call yields the same tree.
    pub fn trim(&mut self) {
        self.sublevels.retain(|s| s.count > 0);
        for sublevel in &mut self.sublevels {
            sublevel.trim();
        }

        let collapsible = self.sublevels.len() == 1
            && self.sublevels[0].count == self.count
            && self.sublevels[0]
                .range
                .as_ref()
                .is_some_and(ColumnRange::single);
        if collapsible {
            if let Some(mut child) = self.sublevels.pop() {
                let column = std::mem::take(&mut self.sublevel_column);
                if let Some(range) = &child.range {
                    self.fixed.insert(column, range.min_value());
                }
                self.events.append(&mut child.events);
                // Child entries take precedence over ours.
                self.fixed.append(&mut child.fixed);
                self.sublevel_column = child.sublevel_column;
                self.sublevels = child.sublevels;
            }
        }

        self.events.retain(|e| !e.is_empty());
    }

    /// The raw events represented by this subtree.
    ///
    /// Events whose every field was absorbed into `fixed` entries were elided
    /// by `trim` but are still counted, so the result is padded with empty
    /// events up to `count` before this level's fixed values are re-inserted.
    pub fn raw_events(&self) -> Vec<Event> {
        let mut events = Vec::with_capacity(self.count as usize);
        events.extend(self.events.iter().cloned());
        for sublevel in &self.sublevels {
            events.extend(sublevel.raw_events());
        }
        while (events.len() as u64) < self.count {
            events.push(Event::new());
        }
        for event in &mut events {
            for (column, value) in &self.fixed {
                event.insert(column.clone(), value.clone());
            }
        }
        events
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        for _ in 0..indent {
            write!(f, "\t")?;
        }
        if self.column.is_empty() {
            write!(f, "Base")?;
        } else {
            write!(f, "{} => ", self.column)?;
            match &self.range {
                Some(range) => write!(f, "{}", range)?,
                None => write!(f, "[]")?,
            }
        }
        if !self.events.is_empty() {
            write!(f, " {} events", self.events.len())?;
        }
        if !self.fixed.is_empty() {
            write!(f, " fixed: {{")?;
            for (i, (column, value)) in self.fixed.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}: {}", column, value)?;
            }
            write!(f, "}}")?;
        }
        for sublevel in &self.sublevels {
            writeln!(f)?;
            sublevel.fmt_indented(f, indent + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(fields: &[(&str, Value)]) -> Event {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn b_ranges() -> ColumnRanges {
        let mut ranges = ColumnRanges::new();
        ranges.insert(
            "b".to_string(),
            vec![
                ColumnRange::Str {
                    min: "x".into(),
                    max: "x".into(),
                },
                ColumnRange::Str {
                    min: "y".into(),
                    max: "y".into(),
                },
            ],
        );
        ranges
    }

    fn sample_events() -> Vec<Event> {
        vec![
            event(&[("a", Value::Int(1)), ("b", Value::Str("x".into()))]),
            event(&[("a", Value::Int(1)), ("b", Value::Str("y".into()))]),
            event(&[("a", Value::Int(2)), ("b", Value::Str("x".into()))]),
        ]
    }

    fn counts_are_consistent(level: &Level) -> bool {
        let children: u64 = level.sublevels.iter().map(|s| s.count).sum();
        level.count == level.events.len() as u64 + children
            && level.sublevels.iter().all(counts_are_consistent)
    }

    #[test]
    fn push_preserves_counts() {
        let order = vec!["b".to_string()];
        let ranges = b_ranges();
        let mut root = Level::default();
        for e in sample_events() {
            root.push(e, &order, &ranges).unwrap();
        }
        assert_eq!(root.count, 3);
        assert!(counts_are_consistent(&root));
        // Two under b=="x", one under b=="y".
        assert_eq!(root.sublevels[0].count, 2);
        assert_eq!(root.sublevels[1].count, 1);
    }

    #[test]
    fn push_accumulates_numeric_sums() {
        let order = vec!["b".to_string()];
        let ranges = b_ranges();
        let mut root = Level::default();
        for e in sample_events() {
            root.push(e, &order, &ranges).unwrap();
        }
        assert_eq!(root.sums.get("a"), Some(&4.0));
        assert!(!root.sums.contains_key("b"));
    }

    #[test]
    fn push_keeps_an_event_missing_the_split_column() {
        let order = vec!["b".to_string()];
        let ranges = b_ranges();
        let mut root = Level::default();
        root.push(event(&[("a", Value::Int(7))]), &order, &ranges)
            .unwrap();
        assert_eq!(root.count, 1);
        assert_eq!(root.events.len(), 1);
        assert!(root.sublevels.is_empty());
    }

    #[test]
    fn push_rejects_a_value_outside_every_range() {
        let order = vec!["b".to_string()];
        let ranges = b_ranges();
        let mut root = Level::default();
        let err = root
            .push(event(&[("b", Value::Str("zzz".into()))]), &order, &ranges)
            .unwrap_err();
        assert!(matches!(err, Error::Invariant(_)));
    }

    #[test]
    fn single_ranges_factor_the_column_out_of_stored_events() {
        let order = vec!["b".to_string()];
        let ranges = b_ranges();
        let mut root = Level::default();
        for e in sample_events() {
            root.push(e, &order, &ranges).unwrap();
        }
        for sublevel in &root.sublevels {
            for e in &sublevel.events {
                assert!(!e.contains("b"));
            }
        }
    }

    #[test]
    fn trim_collapses_a_constant_single_range_chain() {
        let order = vec!["b".to_string()];
        let ranges = b_ranges();
        let mut root = Level::default();
        // Only b=="x" events: the whole tree is constant in b.
        root.push(
            event(&[("a", Value::Int(1)), ("b", Value::Str("x".into()))]),
            &order,
            &ranges,
        )
        .unwrap();
        root.push(
            event(&[("a", Value::Int(2)), ("b", Value::Str("x".into()))]),
            &order,
            &ranges,
        )
        .unwrap();
        root.trim();

        assert_eq!(root.fixed.get("b"), Some(&Value::Str("x".into())));
        assert!(root.sublevels.is_empty());
        assert_eq!(root.events.len(), 2);
        assert_eq!(root.count, 2);
    }

    #[test]
    fn trim_drops_empty_sublevels_and_keeps_populated_ones() {
        let order = vec!["b".to_string()];
        let ranges = b_ranges();
        let mut root = Level::default();
        for e in sample_events() {
            root.push(e, &order, &ranges).unwrap();
        }
        root.trim();
        assert_eq!(root.sublevels.len(), 2);
        assert!(counts_are_consistent(&root));
        // Each branch is constant in b, so b is fixed below the root.
        assert_eq!(
            root.sublevels[0].fixed.get("b"),
            Some(&Value::Str("x".into()))
        );
        assert_eq!(
            root.sublevels[1].fixed.get("b"),
            Some(&Value::Str("y".into()))
        );
    }

    #[test]
    fn trim_is_idempotent() {
        let order = vec!["b".to_string()];
        let ranges = b_ranges();
        let mut root = Level::default();
        for e in sample_events() {
            root.push(e, &order, &ranges).unwrap();
        }
        root.trim();
        let once = serde_json::to_string(&root).unwrap();
        root.trim();
        let twice = serde_json::to_string(&root).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn raw_events_restores_fixed_columns() {
        let order = vec!["b".to_string()];
        let ranges = b_ranges();
        let mut root = Level::default();
        let input = sample_events();
        for e in input.clone() {
            root.push(e, &order, &ranges).unwrap();
        }
        root.trim();

        let mut recovered: Vec<String> = root
            .raw_events()
            .iter()
            .map(|e| serde_json::to_string(e).unwrap())
            .collect();
        let mut expected: Vec<String> = input
            .iter()
            .map(|e| serde_json::to_string(e).unwrap())
            .collect();
        recovered.sort();
        expected.sort();
        assert_eq!(recovered, expected);
    }

    proptest::proptest! {
        /// Push, trim, and raw_events together preserve the event multiset,
        /// and trimming twice changes nothing.
        #[test]
        fn push_trim_raw_events_preserve_the_batch(
            picks in proptest::collection::vec(
                (0usize..3, 0usize..2, -5i64..5),
                1..40,
            )
        ) {
            const HOSTS: [&str; 3] = ["web1", "web2", "web3"];
            const KINDS: [&str; 2] = ["get", "put"];

            let events: Vec<Event> = picks
                .iter()
                .map(|(h, k, n)| {
                    event(&[
                        ("host", Value::Str(HOSTS[*h].into())),
                        ("kind", Value::Str(KINDS[*k].into())),
                        ("n", Value::Int(*n)),
                    ])
                })
                .collect();

            // One single-value range per distinct observed value.
            let mut ranges = ColumnRanges::new();
            for column in ["host", "kind"] {
                let distinct: std::collections::BTreeSet<&Value> =
                    events.iter().filter_map(|e| e.get(column)).collect();
                ranges.insert(
                    column.to_string(),
                    distinct
                        .into_iter()
                        .map(|v| ColumnRange::from_bounds(v, v).expect("same type"))
                        .collect(),
                );
            }

            let order = vec!["host".to_string(), "kind".to_string()];
            let mut root = Level::default();
            for e in events.clone() {
                root.push(e, &order, &ranges).expect("push");
            }
            proptest::prop_assert_eq!(root.count, events.len() as u64);
            proptest::prop_assert!(counts_are_consistent(&root));

            root.trim();
            let once = serde_json::to_string(&root).expect("encode");
            root.trim();
            let twice = serde_json::to_string(&root).expect("encode");
            proptest::prop_assert_eq!(once, twice);

            let mut recovered: Vec<String> = root
                .raw_events()
                .iter()
                .map(|e| serde_json::to_string(e).expect("encode"))
                .collect();
            let mut expected: Vec<String> = events
                .iter()
                .map(|e| serde_json::to_string(e).expect("encode"))
                .collect();
            recovered.sort();
            expected.sort();
            proptest::prop_assert_eq!(recovered, expected);
        }
    }

    #[test]
    fn serialized_form_omits_empty_fields() {
        let mut root = Level::default();
        root.push(event(&[("a", Value::Int(1))]), &[], &ColumnRanges::new())
            .unwrap();
        let json = serde_json::to_value(&root).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("column"));
        assert!(!obj.contains_key("range"));
        assert!(!obj.contains_key("sublevel_column"));
        assert!(!obj.contains_key("sublevels"));
        assert!(!obj.contains_key("fixed"));
        assert_eq!(obj["count"], 1);
        assert_eq!(obj["sums"]["a"], 1.0);
    }
}
