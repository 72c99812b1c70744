//! Database schema definitions
//!
//! The in-memory store does not enforce these; they describe the columns a
//! real backend would create, and drive [`crate::query::schema::migrate`].

use super::table::Table;

/// Column data types used by the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Uuid,
    Text,
    Integer,
    Boolean,
    Date,
    Timestamp,
}

impl ColumnType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            ColumnType::Uuid => "uuid",
            ColumnType::Text => "text",
            ColumnType::Integer => "integer",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
            ColumnType::Timestamp => "timestamp",
        }
    }
}

/// One column of a table definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub data_type: ColumnType,
    pub nullable: bool,
}

const fn col(name: &'static str, data_type: ColumnType) -> ColumnDef {
    ColumnDef { name, data_type, nullable: false }
}

const fn nullable(name: &'static str, data_type: ColumnType) -> ColumnDef {
    ColumnDef { name, data_type, nullable: true }
}

pub const ASSEMBLY_COLUMNS: &[ColumnDef] = &[
    col("id", ColumnType::Uuid),
    col("name", ColumnType::Text),
    col("created_at", ColumnType::Timestamp),
    col("updated_at", ColumnType::Timestamp),
];

pub const POLITICAL_PARTY_COLUMNS: &[ColumnDef] = &[
    col("id", ColumnType::Uuid),
    col("name", ColumnType::Text),
    col("acronym", ColumnType::Text),
    col("color", ColumnType::Text),
    col("created_at", ColumnType::Timestamp),
    col("updated_at", ColumnType::Timestamp),
];

pub const ELECTED_OFFICIAL_COLUMNS: &[ColumnDef] = &[
    col("id", ColumnType::Uuid),
    col("first_name", ColumnType::Text),
    col("last_name", ColumnType::Text),
    nullable("party", ColumnType::Text),
    nullable("party_id", ColumnType::Uuid),
    nullable("position", ColumnType::Text),
    nullable("region", ColumnType::Text),
    nullable("constituency", ColumnType::Text),
    nullable("mandate_start", ColumnType::Date),
    nullable("mandate_end", ColumnType::Date),
    nullable("assembly_id", ColumnType::Uuid),
    nullable("bio", ColumnType::Text),
    nullable("image_url", ColumnType::Text),
    nullable("contact_info", ColumnType::Text),
    col("created_at", ColumnType::Timestamp),
    col("updated_at", ColumnType::Timestamp),
];

pub const DECISION_COLUMNS: &[ColumnDef] = &[
    col("id", ColumnType::Uuid),
    col("title", ColumnType::Text),
    col("summary", ColumnType::Text),
    nullable("full_text", ColumnType::Text),
    col("date", ColumnType::Date),
    col("source", ColumnType::Text),
    col("assembly_id", ColumnType::Uuid),
    col("in_favor", ColumnType::Integer),
    col("against", ColumnType::Integer),
    col("abstention", ColumnType::Integer),
    col("absent", ColumnType::Integer),
    col("total_voters", ColumnType::Integer),
    col("is_passed", ColumnType::Boolean),
    col("created_at", ColumnType::Timestamp),
    col("updated_at", ColumnType::Timestamp),
];

pub const INDIVIDUAL_VOTE_COLUMNS: &[ColumnDef] = &[
    col("id", ColumnType::Uuid),
    col("decision_id", ColumnType::Uuid),
    col("elected_official_id", ColumnType::Uuid),
    col("vote_value", ColumnType::Text),
    col("created_at", ColumnType::Timestamp),
    col("updated_at", ColumnType::Timestamp),
];

/// Column definitions for a table
pub fn columns(table: Table) -> &'static [ColumnDef] {
    match table {
        Table::Assembly => ASSEMBLY_COLUMNS,
        Table::PoliticalParty => POLITICAL_PARTY_COLUMNS,
        Table::ElectedOfficial => ELECTED_OFFICIAL_COLUMNS,
        Table::Decision => DECISION_COLUMNS,
        Table::IndividualVote => INDIVIDUAL_VOTE_COLUMNS,
    }
}
