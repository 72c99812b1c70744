//! Typed reads from stored rows
//!
//! Rows are loosely shaped: columns may be snake_case or camelCase, and any
//! of them may be missing. Reads go through [`resolve_column`] so both
//! spellings work, and ill-typed or missing required values become
//! [`Error::Mapping`].

use chrono::{DateTime, Utc};

use crate::query::predicate::resolve_column;
use crate::storage::{Record, Table};
use crate::value::Value;
use crate::{Error, Result};

pub(crate) struct RowReader<'r> {
    table: Table,
    row: &'r Record,
}

impl<'r> RowReader<'r> {
    pub(crate) fn new(table: Table, row: &'r Record) -> Self {
        Self { table, row }
    }

    fn error(&self, column: &str, reason: impl Into<String>) -> Error {
        Error::Mapping {
            table: self.table,
            field: column.to_string(),
            reason: reason.into(),
        }
    }

    /// A column's value, treating an explicit null like a missing field
    fn value(&self, column: &str) -> Option<&'r Value> {
        resolve_column(self.row, column).filter(|v| !v.is_null())
    }

    pub(crate) fn text(&self, column: &str) -> Result<String> {
        self.opt_text(column)?
            .ok_or_else(|| self.error(column, "missing value"))
    }

    pub(crate) fn opt_text(&self, column: &str) -> Result<Option<String>> {
        match self.value(column) {
            None => Ok(None),
            Some(Value::Text(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.error(column, format!("expected text, found {}", other.kind()))),
        }
    }

    /// A non-negative whole number; numeric text is accepted too
    pub(crate) fn count(&self, column: &str) -> Result<u32> {
        let n = match self.value(column) {
            None => return Err(self.error(column, "missing value")),
            Some(Value::Number(n)) => *n,
            Some(Value::Text(s)) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| self.error(column, format!("{s:?} is not a number")))?,
            Some(other) => {
                return Err(self.error(column, format!("expected number, found {}", other.kind())));
            }
        };

        if n.fract() != 0.0 || n < 0.0 || n > f64::from(u32::MAX) {
            return Err(self.error(column, format!("{n} is not a valid count")));
        }
        Ok(n as u32)
    }

    pub(crate) fn flag(&self, column: &str) -> Result<bool> {
        match self.value(column) {
            Some(Value::Bool(b)) => Ok(*b),
            None => Err(self.error(column, "missing value")),
            Some(other) => Err(self.error(column, format!("expected bool, found {}", other.kind()))),
        }
    }

    pub(crate) fn date(&self, column: &str) -> Result<DateTime<Utc>> {
        self.opt_date(column)?
            .ok_or_else(|| self.error(column, "missing value"))
    }

    pub(crate) fn opt_date(&self, column: &str) -> Result<Option<DateTime<Utc>>> {
        match self.value(column) {
            None => Ok(None),
            Some(v) => v
                .as_date()
                .map(Some)
                .ok_or_else(|| self.error(column, format!("{v} is not a date"))),
        }
    }

    /// A JSON document stored as text
    pub(crate) fn opt_json<T: serde::de::DeserializeOwned>(&self, column: &str) -> Result<Option<T>> {
        match self.opt_text(column)? {
            None => Ok(None),
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| self.error(column, e.to_string())),
        }
    }
}
