//! # Hemicycle - legislative decisions, votes and elected officials
//!
//! Hemicycle provides:
//! - Domain models for assemblies, parties, elected officials, decisions and votes
//! - An in-memory relational backend that answers the same fluent query chains
//!   (`select_from` / `insert_into` / `update_table` / `delete_from`) a SQL
//!   query builder would, over five fixed tables
//! - Repositories and services that issue those chains
//! - Fixture seeding and a small CLI for inspecting seeded data

pub mod value;
pub mod storage;
pub mod query;
pub mod provider;
pub mod domain;
pub mod repository;
pub mod service;
pub mod fixtures;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use value::Value;
pub use storage::{Record, RecordStore, Table};
pub use query::{Database, Operator, Predicate};
pub use provider::InMemoryDatabaseProvider;

/// Result type alias for Hemicycle operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Hemicycle operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No records found in table {table}")]
    NoRecordsFound { table: Table },

    #[error("Failed to insert into {table}")]
    InsertFailed { table: Table },

    #[error("No records updated in {table}")]
    NoRecordsUpdated { table: Table },

    #[error("{0}")]
    NotFound(String),

    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Cannot map {table}.{field}: {reason}")]
    Mapping {
        table: Table,
        field: String,
        reason: String,
    },

    #[error("Unsupported database backend: {0}")]
    UnsupportedBackend(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Whether this error reports a missing entity or an empty result,
    /// as opposed to a configuration or decoding failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_)
                | Error::NoRecordsFound { .. }
                | Error::NoRecordsUpdated { .. }
        )
    }
}
