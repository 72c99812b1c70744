//! Decision persistence

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{
    Decision, DecisionFilters, DecisionId, DecisionPatch, ElectedOfficialId, IndividualVote,
    NewDecision, VoteId, VoteResultsOverview, VoteValue,
};
use crate::query::{Database, Predicate};
use crate::storage::{Record, Table};
use crate::{Error, Result};

use super::rows::RowReader;
use super::DecisionsRepository;

const DECISION_SELECTION: [&str; 13] = [
    "decision.id",
    "decision.title",
    "decision.summary",
    "decision.full_text",
    "decision.date",
    "decision.source",
    "decision.assembly_id",
    "decision.in_favor",
    "decision.against",
    "decision.abstention",
    "decision.absent",
    "decision.total_voters",
    "decision.is_passed",
];

const DECISION_RETURNING: [&str; 13] = [
    "id",
    "title",
    "summary",
    "full_text",
    "date",
    "source",
    "assembly_id",
    "in_favor",
    "against",
    "abstention",
    "absent",
    "total_voters",
    "is_passed",
];

const VOTE_RETURNING: [&str; 4] = ["id", "decision_id", "elected_official_id", "vote_value"];

/// [`DecisionsRepository`] backed by `decision` and `individual_vote` rows
#[derive(Debug, Clone)]
pub struct SqlDecisionsRepository {
    db: Database,
}

impl SqlDecisionsRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn decision_from_row(row: &Record) -> Result<Decision> {
    let r = RowReader::new(Table::Decision, row);
    Ok(Decision {
        id: DecisionId::new(r.text("id")?),
        title: r.text("title")?,
        summary: r.text("summary")?,
        full_text: r.opt_text("full_text")?,
        date: r.date("date")?,
        source: r.text("source")?,
        assembly_id: r.text("assembly_id")?,
        results_overview: VoteResultsOverview {
            in_favor: r.count("in_favor")?,
            against: r.count("against")?,
            abstention: r.count("abstention")?,
            absent: r.count("absent")?,
            total_voters: r.count("total_voters")?,
            is_passed: r.flag("is_passed")?,
        },
    })
}

fn vote_from_row(row: &Record) -> Result<IndividualVote> {
    let r = RowReader::new(Table::IndividualVote, row);
    let raw = r.text("vote_value")?;
    let vote_value = raw.parse::<VoteValue>().map_err(|reason| Error::Mapping {
        table: Table::IndividualVote,
        field: "vote_value".to_string(),
        reason,
    })?;

    Ok(IndividualVote {
        id: VoteId::new(r.text("id")?),
        decision_id: DecisionId::new(r.text("decision_id")?),
        elected_official_id: ElectedOfficialId::new(r.text("elected_official_id")?),
        vote_value,
    })
}

/// Column values for only the fields a patch provides
fn patch_to_row(patch: DecisionPatch) -> Record {
    let mut row = Record::new();
    if let Some(title) = patch.title {
        row.insert("title", title);
    }
    if let Some(summary) = patch.summary {
        row.insert("summary", summary);
    }
    if let Some(full_text) = patch.full_text {
        row.insert("full_text", full_text);
    }
    if let Some(date) = patch.date {
        row.insert("date", date);
    }
    if let Some(source) = patch.source {
        row.insert("source", source);
    }
    if let Some(assembly_id) = patch.assembly_id {
        row.insert("assembly_id", assembly_id);
    }

    if let Some(results) = patch.results_overview {
        let counts = [
            ("in_favor", results.in_favor),
            ("against", results.against),
            ("abstention", results.abstention),
            ("absent", results.absent),
            ("total_voters", results.total_voters),
        ];
        for (column, count) in counts {
            if let Some(count) = count {
                row.insert(column, count);
            }
        }
        if let Some(is_passed) = results.is_passed {
            row.insert("is_passed", is_passed);
        }
    }
    row
}

#[async_trait]
impl DecisionsRepository for SqlDecisionsRepository {
    async fn find_all(&self, filters: &DecisionFilters) -> Result<Vec<Decision>> {
        let mut query = self
            .db
            .select_from(Table::Decision)
            .left_join(Table::Assembly, "assembly.id", "decision.assembly_id")
            .select(DECISION_SELECTION);

        if let Some(assembly_id) = filters.assembly_id.as_deref().filter(|id| !id.is_empty()) {
            query = query.where_("decision.assembly_id", "=", assembly_id);
        }
        if let Some(from) = filters.date_from {
            query = query.where_("decision.date", ">=", from);
        }
        if let Some(to) = filters.date_to {
            query = query.where_("decision.date", "<=", to);
        }
        if let Some(term) = filters.search_term.as_deref().filter(|t| !t.is_empty()) {
            let pattern = format!("%{term}%");
            query = query.where_any(vec![
                Predicate::compare("decision.title", "ilike", pattern.as_str()),
                Predicate::compare("decision.summary", "ilike", pattern.as_str()),
                Predicate::compare("decision.full_text", "ilike", pattern.as_str()),
            ]);
        }
        if filters.party_id.is_some() {
            tracing::debug!("party filter is not applied to decision listings");
        }

        query.execute().await?.iter().map(decision_from_row).collect()
    }

    async fn find_by_id(&self, id: &DecisionId) -> Result<Option<Decision>> {
        self.db
            .select_from(Table::Decision)
            .where_("id", "=", id)
            .select(DECISION_RETURNING)
            .execute_take_first()
            .await?
            .as_ref()
            .map(decision_from_row)
            .transpose()
    }

    async fn find_votes_by_decision_id(&self, decision_id: &DecisionId) -> Result<Vec<IndividualVote>> {
        self.db
            .select_from(Table::IndividualVote)
            .where_("decision_id", "=", decision_id)
            .select(VOTE_RETURNING)
            .execute()
            .await?
            .iter()
            .map(vote_from_row)
            .collect()
    }

    async fn create(&self, decision: NewDecision) -> Result<Decision> {
        let now = Utc::now();
        let results = decision.results_overview;
        let row = Record::new()
            .with("id", DecisionId::generate())
            .with("title", decision.title)
            .with("summary", decision.summary)
            .with("full_text", decision.full_text)
            .with("date", decision.date)
            .with("source", decision.source)
            .with("assembly_id", decision.assembly_id)
            .with("in_favor", results.in_favor)
            .with("against", results.against)
            .with("abstention", results.abstention)
            .with("absent", results.absent)
            .with("total_voters", results.total_voters)
            .with("is_passed", results.is_passed)
            .with("created_at", now)
            .with("updated_at", now);

        let inserted = self
            .db
            .insert_into(Table::Decision)
            .values(row)
            .returning(DECISION_RETURNING)
            .execute_take_first_or_throw()
            .await?;
        decision_from_row(&inserted)
    }

    async fn update(&self, id: &DecisionId, patch: DecisionPatch) -> Result<Decision> {
        let row = patch_to_row(patch).with("updated_at", Utc::now());

        let updated = self
            .db
            .update_table(Table::Decision)
            .set(row)
            .where_("id", "=", id)
            .returning(DECISION_RETURNING)
            .execute_take_first_or_throw()
            .await?;
        decision_from_row(&updated)
    }

    async fn delete(&self, id: &DecisionId) -> Result<bool> {
        let results = self
            .db
            .delete_from(Table::Decision)
            .where_("id", "=", id)
            .execute()
            .await?;
        Ok(results.first().is_some_and(|r| r.affected > 0))
    }
}
