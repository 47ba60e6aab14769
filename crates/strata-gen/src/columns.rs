//! Column selection: which fields are eligible to split on.
//!
//! A column survives only if its values are one scalar type, its distinct
//! cardinality stays within bounds, and it appears in every event. Integer
//! columns are additionally excluded from the candidate set: only string and
//! float columns are split candidates.

use std::collections::{BTreeMap, BTreeSet};

use strata_core::{Event, Value, ValueType};

/// A column with more distinct values than this is not worth splitting on.
pub const MAX_CARDINALITY: usize = 2048;

#[derive(Default)]
struct ColumnStats {
    ty: Option<ValueType>,
    distinct: BTreeSet<Value>,
    ignored: bool,
}

impl ColumnStats {
    fn ignore(&mut self) {
        self.ignored = true;
        self.distinct.clear();
    }
}

/// Scan the events and return the columns eligible as split candidates.
pub fn select_columns(events: &[Event]) -> Vec<String> {
    let mut stats: BTreeMap<String, ColumnStats> = BTreeMap::new();

    for event in events {
        for (field, value) in event.iter() {
            let column = stats.entry(field.to_string()).or_default();
            if column.ignored {
                continue;
            }
            let ty = value.value_type();
            match column.ty {
                None => column.ty = Some(ty),
                Some(t) if t != ty => {
                    column.ignore();
                    continue;
                }
                Some(_) => {}
            }
            column.distinct.insert(value.clone());
            if column.distinct.len() > MAX_CARDINALITY {
                column.ignore();
            }
        }
    }

    // Second pass: every kept column must appear in every event.
    for event in events {
        for (field, column) in stats.iter_mut() {
            if !event.contains(field) {
                column.ignored = true;
            }
        }
    }

    stats
        .into_iter()
        .filter(|(_, c)| !c.ignored && matches!(c.ty, Some(ValueType::Float | ValueType::Str)))
        .map(|(field, _)| field)
        .collect()
}
