//! Update query builder
//!
//! Chain shape: `update_table(table).set(patch).where_(..).returning(..)`
//! followed by a terminal call. Exactly one predicate is supported; the
//! stage types make a second `where_` unrepresentable.

use std::sync::Arc;

use crate::storage::{Record, RecordStore, Table};
use crate::value::Value;
use crate::{Error, Result};

use super::predicate::{Operator, Predicate};

#[derive(Debug, Clone)]
pub struct UpdateQueryBuilder {
    store: Arc<RecordStore>,
    table: Table,
}

impl UpdateQueryBuilder {
    pub(crate) fn new(store: Arc<RecordStore>, table: Table) -> Self {
        Self { store, table }
    }

    /// Fields to overwrite on every matching record
    #[must_use]
    pub fn set(self, patch: Record) -> UpdateSet {
        UpdateSet {
            store: self.store,
            table: self.table,
            patch,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateSet {
    store: Arc<RecordStore>,
    table: Table,
    patch: Record,
}

impl UpdateSet {
    #[must_use]
    pub fn where_(
        self,
        column: impl Into<String>,
        op: impl Into<Operator>,
        value: impl Into<Value>,
    ) -> UpdateWhere {
        UpdateWhere {
            store: self.store,
            table: self.table,
            patch: self.patch,
            predicate: Predicate::compare(column, op, value),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateWhere {
    store: Arc<RecordStore>,
    table: Table,
    patch: Record,
    predicate: Predicate,
}

impl UpdateWhere {
    #[must_use]
    pub fn returning<I, S>(self, columns: I) -> UpdateReturning
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        UpdateReturning {
            store: self.store,
            table: self.table,
            patch: self.patch,
            predicate: self.predicate,
            returning: columns.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn returning_all(self) -> UpdateReturning {
        self.returning(Vec::<String>::new())
    }
}

#[derive(Debug, Clone)]
pub struct UpdateReturning {
    store: Arc<RecordStore>,
    table: Table,
    patch: Record,
    predicate: Predicate,
    returning: Vec<String>,
}

impl UpdateReturning {
    /// Merge the patch into every matching record in place, returning the
    /// updated records in table order. Row count and positions never change.
    pub async fn execute(&self) -> Result<Vec<Record>> {
        let updated = self.store.write(|tables| {
            let merged: Vec<(usize, Record)> = tables
                .read_all(self.table)
                .iter()
                .enumerate()
                .filter(|(_, record)| self.predicate.matches(record))
                .map(|(index, record)| (index, record.merged(&self.patch)))
                .collect();

            merged
                .into_iter()
                .map(|(index, record)| {
                    tables.replace_at(self.table, index, record.clone());
                    record
                })
                .collect::<Vec<_>>()
        });
        tracing::debug!(
            table = %self.table,
            returning = ?self.returning,
            rows = updated.len(),
            "update executed"
        );
        Ok(updated)
    }

    /// The first updated record, or `None` when nothing matched
    pub async fn execute_take_first(&self) -> Result<Option<Record>> {
        Ok(self.execute().await?.into_iter().next())
    }

    /// The first updated record, or [`Error::NoRecordsUpdated`]
    pub async fn execute_take_first_or_throw(&self) -> Result<Record> {
        self.execute_take_first()
            .await?
            .ok_or(Error::NoRecordsUpdated { table: self.table })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn seeded_store() -> Arc<RecordStore> {
        let store = Arc::new(RecordStore::new());
        store.seed(
            Table::ElectedOfficial,
            vec![
                Record::new().with("id", "o1").with("firstName", "Jane").with("region", "North"),
                Record::new().with("id", "o2").with("firstName", "John").with("region", "South"),
                Record::new().with("id", "o3").with("firstName", "Maria").with("region", "North"),
            ],
        );
        store
    }

    #[tokio::test]
    async fn test_update_by_id_touches_only_that_row() {
        let store = seeded_store();
        let before = store.read_all(Table::ElectedOfficial);

        let updated = UpdateQueryBuilder::new(Arc::clone(&store), Table::ElectedOfficial)
            .set(Record::new().with("region", "East"))
            .where_("id", "=", "o2")
            .returning_all()
            .execute()
            .await
            .unwrap();
        assert_eq!(updated.len(), 1);

        let after = store.read_all(Table::ElectedOfficial);
        assert_eq!(after.len(), 3);
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
        assert_eq!(after[1].get("region"), Some(&Value::from("East")));
        assert_eq!(after[1].get("firstName"), Some(&Value::from("John")));
        assert_eq!(updated[0], after[1]);
    }

    #[tokio::test]
    async fn test_update_resolves_camel_case_columns() {
        let store = seeded_store();
        let updated = UpdateQueryBuilder::new(Arc::clone(&store), Table::ElectedOfficial)
            .set(Record::new().with("bio", "Senator"))
            .where_("first_name", "=", "Maria")
            .returning(["id"])
            .execute_take_first()
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.get("id"), Some(&Value::from("o3")));
    }

    #[tokio::test]
    async fn test_update_many_in_table_order() {
        let store = seeded_store();
        let updated = UpdateQueryBuilder::new(store, Table::ElectedOfficial)
            .set(Record::new().with("position", "Senator"))
            .where_("region", "=", "North")
            .returning_all()
            .execute()
            .await
            .unwrap();
        let ids: Vec<_> = updated.iter().map(|r| r.get("id").cloned()).collect();
        assert_eq!(ids, vec![Some(Value::from("o1")), Some(Value::from("o3"))]);
    }

    #[tokio::test]
    async fn test_no_match_or_throw() {
        let store = seeded_store();
        let builder = UpdateQueryBuilder::new(Arc::clone(&store), Table::ElectedOfficial)
            .set(Record::new().with("region", "East"))
            .where_("id", "=", "missing")
            .returning_all();
        assert!(builder.execute_take_first().await.unwrap().is_none());
        let err = builder.execute_take_first_or_throw().await.unwrap_err();
        assert_eq!(err.to_string(), "No records updated in elected_official");
        assert_eq!(store.count(Table::ElectedOfficial), 3);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_unknown_operator_updates_every_row_and_warns() {
        let store = seeded_store();
        let updated = UpdateQueryBuilder::new(Arc::clone(&store), Table::ElectedOfficial)
            .set(Record::new().with("position", "Deputy"))
            .where_("region", "~", "North")
            .returning_all()
            .execute()
            .await
            .unwrap();
        assert_eq!(updated.len(), 3);
        assert!(logs_contain("unknown operator matches every row"));
    }
}
