//! Events: one record, a mapping from field name to scalar value.
//!
//! Field sets may differ between events; a missing field is meaningful to the
//! column selector. The sorted-map representation makes the JSON encoding
//! canonical, which the determinism and round-trip tests rely on.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Event(BTreeMap<String, Value>);

impl Event {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.0.insert(field.into(), value);
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    /// Clone of this event without one field.
    pub fn without(&self, field: &str) -> Event {
        let mut e = self.clone();
        e.0.remove(field);
        e
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Value)> for Event {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Event(iter.into_iter().collect())
    }
}
