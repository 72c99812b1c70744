//! Delete query builder

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::storage::{RecordStore, Table};
use crate::value::Value;
use crate::Result;

use super::predicate::{Operator, Predicate};

/// Outcome of a delete: how many rows were removed, never the rows themselves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResult {
    pub affected: u64,
}

#[derive(Debug, Clone)]
pub struct DeleteQueryBuilder {
    store: Arc<RecordStore>,
    table: Table,
}

impl DeleteQueryBuilder {
    pub(crate) fn new(store: Arc<RecordStore>, table: Table) -> Self {
        Self { store, table }
    }

    #[must_use]
    pub fn where_(
        self,
        column: impl Into<String>,
        op: impl Into<Operator>,
        value: impl Into<Value>,
    ) -> DeleteWhere {
        DeleteWhere {
            store: self.store,
            table: self.table,
            predicate: Predicate::compare(column, op, value),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeleteWhere {
    store: Arc<RecordStore>,
    table: Table,
    predicate: Predicate,
}

impl DeleteWhere {
    /// Remove every matching record.
    ///
    /// Always resolves to exactly one [`DeleteResult`].
    pub async fn execute(&self) -> Result<Vec<DeleteResult>> {
        let removed = self
            .store
            .write(|tables| tables.remove_where(self.table, |record| self.predicate.matches(record)));
        tracing::debug!(table = %self.table, affected = removed, "delete executed");
        Ok(vec![DeleteResult {
            affected: removed as u64,
        }])
    }
}
