//! The `Database` handle query chains start from

use std::sync::Arc;

use crate::storage::{RecordStore, Table};
use crate::Result;

use super::delete::DeleteQueryBuilder;
use super::insert::InsertQueryBuilder;
use super::schema::SchemaModule;
use super::select::SelectQueryBuilder;
use super::update::UpdateQueryBuilder;

/// Entry point for builder chains against one store.
///
/// Cheap to clone; every clone shares the same tables.
#[derive(Debug, Clone)]
pub struct Database {
    store: Arc<RecordStore>,
}

impl Database {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    pub fn select_from(&self, table: Table) -> SelectQueryBuilder {
        SelectQueryBuilder::new(Arc::clone(&self.store), table)
    }

    pub fn insert_into(&self, table: Table) -> InsertQueryBuilder {
        InsertQueryBuilder::new(Arc::clone(&self.store), table)
    }

    pub fn update_table(&self, table: Table) -> UpdateQueryBuilder {
        UpdateQueryBuilder::new(Arc::clone(&self.store), table)
    }

    pub fn delete_from(&self, table: Table) -> DeleteQueryBuilder {
        DeleteQueryBuilder::new(Arc::clone(&self.store), table)
    }

    pub fn schema(&self) -> SchemaModule {
        SchemaModule
    }

    /// Release the connection. Nothing to release in memory.
    pub async fn destroy(&self) -> Result<()> {
        tracing::debug!("destroy called on in-memory database");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Record;
    use crate::value::Value;

    #[tokio::test]
    async fn test_insert_then_select_round_trip() {
        let db = Database::new(Arc::new(RecordStore::new()));
        let record = Record::new()
            .with("id", "p1")
            .with("name", "Greens")
            .with("acronym", "GRN")
            .with("seats", 12)
            .with("founded", Value::Null);

        db.insert_into(Table::PoliticalParty)
            .values(record.clone())
            .returning_all()
            .execute()
            .await
            .unwrap();

        let rows = db
            .select_from(Table::PoliticalParty)
            .select_all()
            .execute()
            .await
            .unwrap();
        assert_eq!(rows, vec![record]);
    }

    #[tokio::test]
    async fn test_clones_share_tables() {
        let db = Database::new(Arc::new(RecordStore::new()));
        let other = db.clone();
        db.insert_into(Table::Assembly)
            .values(Record::new().with("id", "a1"))
            .returning(["id"])
            .execute()
            .await
            .unwrap();
        assert_eq!(other.select_from(Table::Assembly).execute().await.unwrap().len(), 1);
        other.destroy().await.unwrap();
    }
}
