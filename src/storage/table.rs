//! The closed set of tables known to the store

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the five fixed tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Assembly,
    PoliticalParty,
    ElectedOfficial,
    Decision,
    IndividualVote,
}

impl Table {
    /// Get the SQL name of the table
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Assembly => "assembly",
            Table::PoliticalParty => "political_party",
            Table::ElectedOfficial => "elected_official",
            Table::Decision => "decision",
            Table::IndividualVote => "individual_vote",
        }
    }

    /// Get all tables
    pub fn all() -> &'static [Table] {
        &[
            Table::Assembly,
            Table::PoliticalParty,
            Table::ElectedOfficial,
            Table::Decision,
            Table::IndividualVote,
        ]
    }
}

impl FromStr for Table {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Table::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::UnknownTable(s.to_string()))
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names_round_trip() {
        for table in Table::all() {
            assert_eq!(table.as_str().parse::<Table>().unwrap(), *table);
        }
    }

    #[test]
    fn test_unknown_table() {
        let err = "votes".parse::<Table>().unwrap_err();
        assert!(matches!(err, Error::UnknownTable(name) if name == "votes"));
    }
}
