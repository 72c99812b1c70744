//! Decisions and the votes cast on them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::assembly::AssemblyId;
use super::official::ElectedOfficialId;

entity_id!(
    /// Identifier of a [`Decision`]
    DecisionId
);

entity_id!(
    /// Identifier of an [`IndividualVote`]
    VoteId
);

/// How one elected official voted on a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoteValue {
    InFavor,
    Against,
    Abstention,
    Absent,
}

impl VoteValue {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteValue::InFavor => "IN_FAVOR",
            VoteValue::Against => "AGAINST",
            VoteValue::Abstention => "ABSTENTION",
            VoteValue::Absent => "ABSENT",
        }
    }
}

impl FromStr for VoteValue {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "IN_FAVOR" => Ok(VoteValue::InFavor),
            "AGAINST" => Ok(VoteValue::Against),
            "ABSTENTION" => Ok(VoteValue::Abstention),
            "ABSENT" => Ok(VoteValue::Absent),
            other => Err(format!("unknown vote value {other:?}")),
        }
    }
}

impl std::fmt::Display for VoteValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregate tally for a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResultsOverview {
    pub in_favor: u32,
    pub against: u32,
    pub abstention: u32,
    pub absent: u32,
    pub total_voters: u32,
    pub is_passed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub id: DecisionId,
    pub title: String,
    pub summary: String,
    pub full_text: Option<String>,
    pub date: DateTime<Utc>,
    pub source: String,
    pub assembly_id: AssemblyId,
    pub results_overview: VoteResultsOverview,
}

/// A decision that has not been stored yet, so has no id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDecision {
    pub title: String,
    pub summary: String,
    pub full_text: Option<String>,
    pub date: DateTime<Utc>,
    pub source: String,
    pub assembly_id: AssemblyId,
    pub results_overview: VoteResultsOverview,
}

impl NewDecision {
    pub fn with_id(self, id: DecisionId) -> Decision {
        Decision {
            id,
            title: self.title,
            summary: self.summary,
            full_text: self.full_text,
            date: self.date,
            source: self.source,
            assembly_id: self.assembly_id,
            results_overview: self.results_overview,
        }
    }
}

/// Partial tally update; `None` leaves a count untouched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResultsPatch {
    pub in_favor: Option<u32>,
    pub against: Option<u32>,
    pub abstention: Option<u32>,
    pub absent: Option<u32>,
    pub total_voters: Option<u32>,
    pub is_passed: Option<bool>,
}

/// Partial decision update; `None` leaves a field untouched.
///
/// `full_text: Some(None)` clears the text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionPatch {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub full_text: Option<Option<String>>,
    pub date: Option<DateTime<Utc>>,
    pub source: Option<String>,
    pub assembly_id: Option<AssemblyId>,
    pub results_overview: Option<VoteResultsPatch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualVote {
    pub id: VoteId,
    pub decision_id: DecisionId,
    pub elected_official_id: ElectedOfficialId,
    pub vote_value: VoteValue,
}

/// Optional narrowing for decision listings. All set filters must hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionFilters {
    pub assembly_id: Option<AssemblyId>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    /// Accepted but not applied; filtering by party needs the vote tables joined.
    pub party_id: Option<String>,
    /// Case-insensitive substring over title, summary and full text
    pub search_term: Option<String>,
}

impl DecisionFilters {
    pub fn is_empty(&self) -> bool {
        self.assembly_id.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
            && self.party_id.is_none()
            && self.search_term.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_vote_value_text() {
        assert_eq!(serde_json::to_string(&VoteValue::InFavor).unwrap(), "\"IN_FAVOR\"");
        assert_eq!("ABSTENTION".parse::<VoteValue>().unwrap(), VoteValue::Abstention);
        assert!("MAYBE".parse::<VoteValue>().is_err());
    }

    #[test]
    fn test_decision_json_is_camel_case() {
        let decision = NewDecision {
            title: "Climate Change Initiative".to_string(),
            summary: "Reduce emissions".to_string(),
            full_text: None,
            date: Utc.with_ymd_and_hms(2023, 3, 15, 0, 0, 0).unwrap(),
            source: "https://example.com/climate-initiative".to_string(),
            assembly_id: "assembly-1".to_string(),
            results_overview: VoteResultsOverview {
                in_favor: 250,
                against: 175,
                abstention: 25,
                absent: 10,
                total_voters: 460,
                is_passed: true,
            },
        }
        .with_id(DecisionId::new("d1"));

        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["assemblyId"], "assembly-1");
        assert_eq!(json["fullText"], serde_json::Value::Null);
        assert_eq!(json["resultsOverview"]["totalVoters"], 460);
        assert_eq!(json["date"], "2023-03-15T00:00:00Z");
    }

    #[test]
    fn test_empty_filters() {
        assert!(DecisionFilters::default().is_empty());
        let filters = DecisionFilters {
            search_term: Some("climate".to_string()),
            ..Default::default()
        };
        assert!(!filters.is_empty());
    }
}
