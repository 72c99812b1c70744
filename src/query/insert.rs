//! Insert query builder
//!
//! Chain shape: `insert_into(table).values(..).returning(..)` followed by a
//! terminal call.

use std::sync::Arc;

use crate::storage::{Record, RecordStore, Table};
use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct InsertQueryBuilder {
    store: Arc<RecordStore>,
    table: Table,
}

impl InsertQueryBuilder {
    pub(crate) fn new(store: Arc<RecordStore>, table: Table) -> Self {
        Self { store, table }
    }

    /// Rows to insert: a single [`Record`] or a `Vec<Record>`
    #[must_use]
    pub fn values(self, records: impl Into<Vec<Record>>) -> InsertValues {
        InsertValues {
            store: self.store,
            table: self.table,
            records: records.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InsertValues {
    store: Arc<RecordStore>,
    table: Table,
    records: Vec<Record>,
}

impl InsertValues {
    #[must_use]
    pub fn returning<I, S>(self, columns: I) -> InsertReturning
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        InsertReturning {
            store: self.store,
            table: self.table,
            records: self.records,
            returning: columns.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn returning_all(self) -> InsertReturning {
        self.returning(Vec::<String>::new())
    }
}

/// Terminal stage of an insert chain.
///
/// Each terminal call performs the insert; calling two terminals inserts twice.
#[derive(Debug, Clone)]
pub struct InsertReturning {
    store: Arc<RecordStore>,
    table: Table,
    records: Vec<Record>,
    // Advisory, like select projections.
    returning: Vec<String>,
}

impl InsertReturning {
    /// Append every record, returning the stored copies in input order
    pub async fn execute(&self) -> Result<Vec<Record>> {
        let inserted: Vec<Record> = self.store.write(|tables| {
            self.records
                .iter()
                .map(|record| tables.append(self.table, record.clone()))
                .collect()
        });
        tracing::debug!(
            table = %self.table,
            returning = ?self.returning,
            rows = inserted.len(),
            "insert executed"
        );
        Ok(inserted)
    }

    /// The first inserted record, or `None` when there was nothing to insert
    pub async fn execute_take_first(&self) -> Result<Option<Record>> {
        Ok(self.execute().await?.into_iter().next())
    }

    /// The first inserted record, or [`Error::InsertFailed`]
    pub async fn execute_take_first_or_throw(&self) -> Result<Record> {
        self.execute_take_first()
            .await?
            .ok_or(Error::InsertFailed { table: self.table })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[tokio::test]
    async fn test_insert_one_and_many() {
        let store = Arc::new(RecordStore::new());
        let one = InsertQueryBuilder::new(Arc::clone(&store), Table::Assembly)
            .values(Record::new().with("id", "a1").with("name", "Senate"))
            .returning_all()
            .execute()
            .await
            .unwrap();
        assert_eq!(one.len(), 1);

        let many = InsertQueryBuilder::new(Arc::clone(&store), Table::Assembly)
            .values(vec![
                Record::new().with("id", "a2"),
                Record::new().with("id", "a3"),
            ])
            .returning(["id"])
            .execute()
            .await
            .unwrap();
        assert_eq!(many.len(), 2);

        let rows = store.read_all(Table::Assembly);
        let ids: Vec<_> = rows.iter().map(|r| r.get("id").cloned()).collect();
        assert_eq!(
            ids,
            vec![Some(Value::from("a1")), Some(Value::from("a2")), Some(Value::from("a3"))]
        );
    }

    #[tokio::test]
    async fn test_inserted_rows_are_copies() {
        let store = Arc::new(RecordStore::new());
        let mut input = Record::new().with("id", "p1").with("name", "Greens");
        let inserted = InsertQueryBuilder::new(Arc::clone(&store), Table::PoliticalParty)
            .values(input.clone())
            .returning_all()
            .execute_take_first()
            .await
            .unwrap()
            .unwrap();
        input.insert("name", "Changed");

        assert_eq!(inserted.get("name"), Some(&Value::from("Greens")));
        assert_eq!(store.read_all(Table::PoliticalParty)[0].get("name"), Some(&Value::from("Greens")));
    }

    #[tokio::test]
    async fn test_empty_insert() {
        let store = Arc::new(RecordStore::new());
        let builder = InsertQueryBuilder::new(store, Table::Decision)
            .values(Vec::<Record>::new())
            .returning_all();
        assert!(builder.execute_take_first().await.unwrap().is_none());

        let err = builder.execute_take_first_or_throw().await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to insert into decision");
    }
}
