//! Records - one row of a table

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A mapping from field name to value.
///
/// Records in the same table need not share a field set. Lookups here are
/// exact; the snake_case/camelCase bridging used by predicates lives in
/// [`crate::query::predicate::resolve_column`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, for assembling rows inline
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    /// Exact-name lookup
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Shallow merge: fields of `patch` overwrite, all others are retained.
    pub fn merged(&self, patch: &Record) -> Record {
        let mut merged = self.clone();
        for (field, value) in &patch.fields {
            merged.fields.insert(field.clone(), value.clone());
        }
        merged
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (field, value) in iter {
            record.insert(field, value);
        }
        record
    }
}

// Lets insert builders take either one record or many.
impl From<Record> for Vec<Record> {
    fn from(record: Record) -> Self {
        vec![record]
    }
}
