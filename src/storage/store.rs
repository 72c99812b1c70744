//! In-memory record store

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::record::Record;
use super::table::Table;

/// The five tables, as seen while the store lock is held.
///
/// These are the primitives query builders compose. A builder runs its
/// whole scan-then-mutate inside one [`RecordStore::write`] call, so no other
/// chain can observe a half-applied update or delete.
#[derive(Debug)]
pub struct Tables {
    tables: HashMap<Table, Vec<Record>>,
}

impl Tables {
    fn empty() -> Self {
        Self {
            tables: Table::all().iter().map(|t| (*t, Vec::new())).collect(),
        }
    }

    fn rows_mut(&mut self, table: Table) -> &mut Vec<Record> {
        self.tables.entry(table).or_default()
    }

    /// Append a record to the end of the table, returning the stored copy
    pub fn append(&mut self, table: Table, record: Record) -> Record {
        let rows = self.rows_mut(table);
        rows.push(record.clone());
        record
    }

    /// Install a record at `index`, keeping every other row in place.
    ///
    /// An out-of-range index is ignored.
    pub fn replace_at(&mut self, table: Table, index: usize, record: Record) {
        if let Some(slot) = self.rows_mut(table).get_mut(index) {
            *slot = record;
        }
    }

    /// Remove every record for which `predicate` holds, returning how many were removed
    pub fn remove_where(&mut self, table: Table, predicate: impl Fn(&Record) -> bool) -> usize {
        let rows = self.rows_mut(table);
        let before = rows.len();
        rows.retain(|record| !predicate(record));
        before - rows.len()
    }

    /// The full, unfiltered contents of a table in insertion order
    pub fn read_all(&self, table: Table) -> &[Record] {
        self.tables.get(&table).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace a table's contents wholesale
    pub fn seed(&mut self, table: Table, records: Vec<Record>) {
        self.tables.insert(table, records);
    }
}

/// Owner of all table state.
///
/// Lives inside an `Arc` shared by the provider and every [`crate::Database`]
/// handle it hands out. Each provider constructs its own store; stores are
/// never shared across providers.
#[derive(Debug)]
pub struct RecordStore {
    inner: Mutex<Tables>,
}

impl RecordStore {
    /// Create a store with all five tables empty
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Tables::empty()),
        }
    }

    // The tables are plain data, so a panic in another holder cannot leave
    // them in a state worth refusing to read.
    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with shared access to the tables
    pub fn read<R>(&self, f: impl FnOnce(&Tables) -> R) -> R {
        f(&self.lock())
    }

    /// Run `f` with exclusive access to the tables
    pub fn write<R>(&self, f: impl FnOnce(&mut Tables) -> R) -> R {
        f(&mut self.lock())
    }

    /// Snapshot of a table's rows
    pub fn read_all(&self, table: Table) -> Vec<Record> {
        self.read(|tables| tables.read_all(table).to_vec())
    }

    /// Number of rows currently in a table
    pub fn count(&self, table: Table) -> usize {
        self.read(|tables| tables.read_all(table).len())
    }

    /// Replace a table's entire contents (not an append)
    pub fn seed(&self, table: Table, records: Vec<Record>) {
        let count = records.len();
        self.write(|tables| tables.seed(table, records));
        tracing::info!(table = %table, rows = count, "seeded table");
    }

    /// Empty every table under a single lock acquisition
    pub fn reset(&self) {
        self.write(|tables| *tables = Tables::empty());
        tracing::info!("reset all tables");
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}
