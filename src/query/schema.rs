//! Schema-management surface
//!
//! The in-memory tables always exist, so these builders record what was
//! asked for and resolve successfully without touching the store.

use crate::storage::schema::columns;
use crate::storage::{ColumnType, Table};
use crate::Result;

use super::database::Database;

#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaModule;

impl SchemaModule {
    #[must_use]
    pub fn create_table(&self, table: Table) -> CreateTableBuilder {
        CreateTableBuilder {
            table,
            if_not_exists: false,
            columns: Vec::new(),
        }
    }

    #[must_use]
    pub fn drop_table(&self, table: Table) -> DropTableBuilder {
        DropTableBuilder {
            table,
            if_exists: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateTableBuilder {
    table: Table,
    if_not_exists: bool,
    columns: Vec<(String, ColumnType)>,
}

impl CreateTableBuilder {
    #[must_use]
    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    #[must_use]
    pub fn add_column(mut self, name: impl Into<String>, data_type: ColumnType) -> Self {
        self.columns.push((name.into(), data_type));
        self
    }

    pub async fn execute(&self) -> Result<()> {
        tracing::debug!(
            table = %self.table,
            columns = ?self.columns,
            if_not_exists = self.if_not_exists,
            "create table accepted"
        );
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct DropTableBuilder {
    table: Table,
    if_exists: bool,
}

impl DropTableBuilder {
    #[must_use]
    pub fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }

    pub async fn execute(&self) -> Result<()> {
        tracing::debug!(table = %self.table, if_exists = self.if_exists, "drop table accepted");
        Ok(())
    }
}

/// Issue `create table if not exists` for every known table
pub async fn migrate(db: &Database) -> Result<()> {
    for table in Table::all() {
        columns(*table)
            .iter()
            .fold(db.schema().create_table(*table).if_not_exists(), |builder, col| {
                builder.add_column(col.name, col.data_type)
            })
            .execute()
            .await?;
    }
    Ok(())
}
