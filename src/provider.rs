//! In-memory database provider
//!
//! Owns one [`RecordStore`] and hands out [`Database`] handles over it,
//! alongside the administrative calls tests use to set up fixture state.

use std::future::Future;
use std::sync::Arc;

use crate::config::{Backend, HemicycleConfig};
use crate::query::Database;
use crate::storage::{Record, RecordStore, Table};
use crate::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabaseProvider {
    store: Arc<RecordStore>,
}

impl InMemoryDatabaseProvider {
    /// A provider over a fresh, empty store
    pub fn new() -> Self {
        Self {
            store: Arc::new(RecordStore::new()),
        }
    }

    pub fn get_db(&self) -> Database {
        Database::new(Arc::clone(&self.store))
    }

    /// Replace `table`'s contents with `records`
    pub fn seed_table(&self, table: Table, records: Vec<Record>) {
        self.store.seed(table, records);
    }

    /// Empty every table
    pub fn reset(&self) {
        self.store.reset();
    }

    pub fn count(&self, table: Table) -> usize {
        self.store.count(table)
    }

    /// Run `callback` against a throwaway provider, resetting it on every
    /// exit path including a panic inside the callback.
    pub async fn scoped_run<F, Fut, T>(callback: F) -> T
    where
        F: FnOnce(InMemoryDatabaseProvider) -> Fut,
        Fut: Future<Output = T>,
    {
        let provider = InMemoryDatabaseProvider::new();
        let _guard = ResetOnDrop(provider.clone());
        callback(provider).await
    }
}

struct ResetOnDrop(InMemoryDatabaseProvider);

impl Drop for ResetOnDrop {
    fn drop(&mut self) {
        self.0.reset();
    }
}

/// Build the provider a configuration asks for.
///
/// Only the in-memory backend is available in this crate.
pub fn provider_from_config(config: &HemicycleConfig) -> Result<InMemoryDatabaseProvider> {
    match config.database.backend {
        Backend::InMemory => Ok(InMemoryDatabaseProvider::new()),
        other => Err(Error::UnsupportedBackend(other.as_str().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::AssertUnwindSafe;
    use std::sync::Mutex;

    fn assembly(id: &str) -> Record {
        Record::new().with("id", id).with("name", format!("Assembly {id}"))
    }

    #[test]
    fn test_seed_replaces() {
        let provider = InMemoryDatabaseProvider::new();
        provider.seed_table(Table::Assembly, vec![assembly("x1"), assembly("x2")]);
        provider.seed_table(Table::Assembly, vec![assembly("y1")]);
        assert_eq!(provider.count(Table::Assembly), 1);
    }

    #[tokio::test]
    async fn test_reset_twice_leaves_tables_empty() {
        let provider = InMemoryDatabaseProvider::new();
        provider.seed_table(Table::Decision, vec![Record::new().with("id", "d1")]);
        provider.seed_table(Table::Assembly, vec![assembly("a1")]);

        for _ in 0..2 {
            provider.reset();
            for table in Table::all() {
                let rows = provider.get_db().select_from(*table).execute().await.unwrap();
                assert!(rows.is_empty());
            }
        }
    }

    #[test]
    fn test_providers_do_not_share_stores() {
        let a = InMemoryDatabaseProvider::new();
        let b = InMemoryDatabaseProvider::new();
        a.seed_table(Table::Assembly, vec![assembly("a1")]);
        assert_eq!(b.count(Table::Assembly), 0);
    }

    #[tokio::test]
    async fn test_scoped_run_resets_after_return() {
        let (seen, provider) = InMemoryDatabaseProvider::scoped_run(|provider| async move {
            provider.seed_table(Table::Assembly, vec![assembly("a1")]);
            let rows = provider.get_db().select_from(Table::Assembly).execute().await.unwrap();
            (rows.len(), provider)
        })
        .await;

        assert_eq!(seen, 1);
        assert_eq!(provider.count(Table::Assembly), 0);
    }

    #[tokio::test]
    async fn test_scoped_run_resets_after_error() {
        let (result, provider) = InMemoryDatabaseProvider::scoped_run(|provider| async move {
            provider.seed_table(Table::Decision, vec![Record::new().with("id", "d1")]);
            let result = provider
                .get_db()
                .select_from(Table::Decision)
                .where_("id", "=", "missing")
                .execute_take_first_or_throw()
                .await;
            (result, provider)
        })
        .await;

        assert!(matches!(result, Err(Error::NoRecordsFound { .. })));
        assert_eq!(provider.count(Table::Decision), 0);
    }

    #[test]
    fn test_scoped_run_resets_after_panic() {
        let kept: Arc<Mutex<Option<InMemoryDatabaseProvider>>> = Arc::default();
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();

        let slot = Arc::clone(&kept);
        let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| {
            runtime.block_on(InMemoryDatabaseProvider::scoped_run(|provider| async move {
                provider.seed_table(Table::Assembly, vec![assembly("a1")]);
                *slot.lock().unwrap() = Some(provider.clone());
                panic!("callback failed");
            }))
        }));

        assert!(outcome.is_err());
        let provider = kept.lock().unwrap().take().unwrap();
        assert_eq!(provider.count(Table::Assembly), 0);
    }

    #[test]
    fn test_provider_from_config() {
        let mut config = HemicycleConfig::default();
        assert!(provider_from_config(&config).is_ok());

        config.database.backend = Backend::Postgres;
        let err = provider_from_config(&config).unwrap_err();
        assert!(matches!(err, Error::UnsupportedBackend(name) if name == "postgres"));
    }
}
