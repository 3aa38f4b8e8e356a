//! Protocol records built from `show protocols all` replies.

use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};

/// Mapping of protocol name to its record.
pub type ProtocolTable = BTreeMap<String, ProtocolRecord>;

/// Value of a single protocol record field.
///
/// Serialized untagged, so a record turns into plain nested data:
///
/// ```
/// use bird_types::FieldValue;
///
/// let value = FieldValue::map([("imported", FieldValue::Count(5))]);
/// assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"imported":5}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Count(u64),
    Text(String),
    Map(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// Builds a [`FieldValue::Map`] from key/value pairs.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, FieldValue)>,
    {
        FieldValue::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_count(&self) -> Option<u64> {
        match self {
            FieldValue::Count(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, FieldValue>> {
        match self {
            FieldValue::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Looks up a key inside a map value.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.as_map().and_then(|m| m.get(key))
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<u64> for FieldValue {
    fn from(n: u64) -> Self {
        FieldValue::Count(n)
    }
}

/// A single routing protocol as reported by the daemon.
///
/// Seeded from the columns of the protocol list table (which always include
/// `name`) and enriched by the detail lines that follow the row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProtocolRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl ProtocolRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the protocol name, if the record has one.
    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(FieldValue::as_text)
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Shorthand for text fields.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    /// Shorthand for count fields.
    pub fn count(&self, field: &str) -> Option<u64> {
        self.get(field).and_then(FieldValue::as_count)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Sets a field, replacing whatever was there.
    pub fn set(&mut self, field: impl Into<String>, value: FieldValue) {
        self.fields.insert(field.into(), value);
    }

    /// Sets a field, taking the union when both the stored and the new value
    /// are maps. Keys present in both maps take the new value.
    pub fn merge(&mut self, field: impl Into<String>, value: FieldValue) {
        match (self.fields.entry(field.into()), value) {
            (btree_map::Entry::Occupied(mut slot), FieldValue::Map(incoming)) => {
                match slot.get_mut() {
                    FieldValue::Map(existing) => existing.extend(incoming),
                    other => *other = FieldValue::Map(incoming),
                }
            }
            (btree_map::Entry::Occupied(mut slot), value) => {
                slot.insert(value);
            }
            (btree_map::Entry::Vacant(slot), value) => {
                slot.insert(value);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, FieldValue> {
        self.fields.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for ProtocolRecord {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ProtocolRecord {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = btree_map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
