//! Fixture data for seeding a provider
//!
//! A [`TestData`] bundle holds raw rows per table and loads from JSON. The
//! `*_to_row` helpers turn domain models into rows; like hand-written
//! fixtures they mix column spellings (`fullText` next to `assembly_id`),
//! which column resolution bridges.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{Assembly, Decision, ElectedOfficial, IndividualVote, PoliticalParty};
use crate::provider::InMemoryDatabaseProvider;
use crate::repository::officials::contact_info_column;
use crate::storage::{Record, Table};
use crate::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestData {
    pub assemblies: Vec<Record>,
    pub political_parties: Vec<Record>,
    pub elected_officials: Vec<Record>,
    pub decisions: Vec<Record>,
    pub individual_votes: Vec<Record>,
}

impl TestData {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// The bundle's collections paired with the table each one seeds
    pub fn tables(&self) -> [(Table, &[Record]); 5] {
        [
            (Table::Assembly, self.assemblies.as_slice()),
            (Table::PoliticalParty, self.political_parties.as_slice()),
            (Table::ElectedOfficial, self.elected_officials.as_slice()),
            (Table::Decision, self.decisions.as_slice()),
            (Table::IndividualVote, self.individual_votes.as_slice()),
        ]
    }
}

/// Seed every non-empty collection; tables with no rows are left as they are
pub fn seed_test_database(provider: &InMemoryDatabaseProvider, data: &TestData) {
    for (table, rows) in data.tables() {
        if !rows.is_empty() {
            provider.seed_table(table, rows.to_vec());
        }
    }
}

pub fn assembly_to_row(assembly: &Assembly) -> Record {
    Record::new()
        .with("id", &assembly.id)
        .with("name", &assembly.name)
}

pub fn party_to_row(party: &PoliticalParty) -> Record {
    Record::new()
        .with("id", &party.id)
        .with("name", &party.name)
        .with("acronym", &party.acronym)
        .with("color", &party.color)
}

pub fn decision_to_row(decision: &Decision) -> Record {
    let results = &decision.results_overview;
    Record::new()
        .with("id", &decision.id)
        .with("title", &decision.title)
        .with("summary", &decision.summary)
        .with("fullText", decision.full_text.clone())
        .with("date", decision.date)
        .with("source", &decision.source)
        .with("assembly_id", &decision.assembly_id)
        .with("in_favor", results.in_favor)
        .with("against", results.against)
        .with("abstention", results.abstention)
        .with("absent", results.absent)
        .with("total_voters", results.total_voters)
        .with("is_passed", results.is_passed)
}

pub fn vote_to_row(vote: &IndividualVote) -> Record {
    Record::new()
        .with("id", &vote.id)
        .with("decision_id", &vote.decision_id)
        .with("elected_official_id", &vote.elected_official_id)
        .with("vote_value", vote.vote_value.as_str())
}

/// Fails only if the contact details cannot be serialized
pub fn official_to_row(official: &ElectedOfficial) -> Result<Record> {
    Ok(Record::new()
        .with("id", &official.id)
        .with("first_name", &official.first_name)
        .with("last_name", &official.last_name)
        .with("party", &official.party)
        .with("party_id", official.party_id.clone())
        .with("position", &official.position)
        .with("region", &official.region)
        .with("constituency", official.constituency.clone())
        .with("mandate_start", official.mandate_start)
        .with("mandate_end", official.mandate_end)
        .with("bio", official.bio.clone())
        .with("image_url", official.image_url.clone())
        .with("assembly_id", official.assembly_id.clone())
        .with("contact_info", contact_info_column(official.contact_info.as_ref())?))
}
