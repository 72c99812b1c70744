//! Tables rendered with `tabled`

use tabled::{settings::Style, Table, Tabled};

use super::vote_label;
use crate::domain::{Decision, ElectedOfficial, IndividualVote};
use crate::storage::Table as StoreTable;

#[derive(Tabled)]
struct DecisionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Assembly")]
    assembly: String,
    #[tabled(rename = "For/Against/Abst.")]
    tally: String,
    #[tabled(rename = "Passed")]
    passed: String,
}

#[derive(Tabled)]
struct OfficialRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Party")]
    party: String,
    #[tabled(rename = "Position")]
    position: String,
    #[tabled(rename = "Region")]
    region: String,
}

#[derive(Tabled)]
struct VoteRow {
    #[tabled(rename = "Official")]
    official: String,
    #[tabled(rename = "Vote")]
    vote: String,
}

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Table")]
    table: String,
    #[tabled(rename = "Rows")]
    rows: usize,
}

fn render<T: Tabled>(rows: &[T]) -> String {
    if rows.is_empty() {
        return String::new();
    }
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn decisions_table(decisions: &[Decision]) -> String {
    let rows: Vec<DecisionRow> = decisions
        .iter()
        .map(|d| {
            let r = &d.results_overview;
            DecisionRow {
                id: d.id.to_string(),
                date: d.date.format("%Y-%m-%d").to_string(),
                title: d.title.clone(),
                assembly: d.assembly_id.clone(),
                tally: format!("{}/{}/{}", r.in_favor, r.against, r.abstention),
                passed: if r.is_passed { "yes" } else { "no" }.to_string(),
            }
        })
        .collect();
    render(&rows)
}

pub fn officials_table(officials: &[ElectedOfficial]) -> String {
    let rows: Vec<OfficialRow> = officials
        .iter()
        .map(|o| OfficialRow {
            id: o.id.to_string(),
            name: o.full_name(),
            party: o.party.clone(),
            position: o.position.clone(),
            region: o.region.clone(),
        })
        .collect();
    render(&rows)
}

pub fn votes_table(votes: &[IndividualVote]) -> String {
    let rows: Vec<VoteRow> = votes
        .iter()
        .map(|v| VoteRow {
            official: v.elected_official_id.to_string(),
            vote: vote_label(v.vote_value).to_string(),
        })
        .collect();
    render(&rows)
}

pub fn table_counts(counts: &[(StoreTable, usize)]) -> String {
    let rows: Vec<CountRow> = counts
        .iter()
        .map(|(table, rows)| CountRow {
            table: table.to_string(),
            rows: *rows,
        })
        .collect();
    render(&rows)
}
