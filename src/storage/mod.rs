//! Storage Layer - in-memory record tables
//!
//! The store owns five tables, each an insertion-ordered list of records:
//! - assembly(id, name, created_at, updated_at)
//! - political_party(id, name, acronym, color, ...)
//! - elected_official(id, first_name, last_name, party_id, assembly_id, ...)
//! - decision(id, title, summary, full_text, date, assembly_id, in_favor, ...)
//! - individual_vote(id, decision_id, elected_official_id, vote_value, ...)
//!
//! No schema is enforced: records may carry unknown fields or omit any.

pub mod table;
pub mod record;
pub mod schema;
pub mod store;

pub use table::Table;
pub use record::Record;
pub use schema::{ColumnDef, ColumnType};
pub use store::{RecordStore, Tables};
