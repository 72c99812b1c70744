//! Query Builders - fluent chains evaluated against the record store

pub mod predicate;
pub mod select;
pub mod insert;
pub mod update;
pub mod delete;
pub mod schema;
pub mod database;

pub use database::Database;
pub use delete::{DeleteQueryBuilder, DeleteResult, DeleteWhere};
pub use insert::{InsertQueryBuilder, InsertReturning, InsertValues};
pub use predicate::{Operator, Predicate};
pub use schema::{migrate, SchemaModule};
pub use select::{SelectQueryBuilder, Selection};
pub use update::{UpdateQueryBuilder, UpdateReturning, UpdateSet, UpdateWhere};
