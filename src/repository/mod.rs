//! Repositories - domain persistence over query builder chains
//!
//! The traits are the ports services depend on. The `Sql*` implementations
//! issue the same builder chains a SQL-backed query builder would accept, so
//! they run unchanged against the in-memory [`crate::Database`].

mod rows;
pub mod decisions;
pub mod officials;

use async_trait::async_trait;

use crate::domain::{
    AssemblyId, Decision, DecisionFilters, DecisionId, DecisionPatch, ElectedOfficial,
    ElectedOfficialId, ElectedOfficialPatch, IndividualVote, NewDecision, NewElectedOfficial,
    PoliticalPartyId,
};
use crate::Result;

pub use decisions::SqlDecisionsRepository;
pub use officials::SqlElectedOfficialsRepository;

#[async_trait]
pub trait DecisionsRepository: Send + Sync {
    async fn find_all(&self, filters: &DecisionFilters) -> Result<Vec<Decision>>;

    async fn find_by_id(&self, id: &DecisionId) -> Result<Option<Decision>>;

    async fn find_votes_by_decision_id(&self, decision_id: &DecisionId) -> Result<Vec<IndividualVote>>;

    async fn create(&self, decision: NewDecision) -> Result<Decision>;

    async fn update(&self, id: &DecisionId, patch: DecisionPatch) -> Result<Decision>;

    /// Whether a row was removed
    async fn delete(&self, id: &DecisionId) -> Result<bool>;
}

#[async_trait]
pub trait ElectedOfficialsRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<ElectedOfficial>>;

    async fn find_by_id(&self, id: &ElectedOfficialId) -> Result<Option<ElectedOfficial>>;

    async fn find_by_assembly(&self, assembly_id: &AssemblyId) -> Result<Vec<ElectedOfficial>>;

    async fn find_by_party(&self, party_id: &PoliticalPartyId) -> Result<Vec<ElectedOfficial>>;

    async fn create(&self, official: NewElectedOfficial) -> Result<ElectedOfficial>;

    async fn update(&self, id: &ElectedOfficialId, patch: ElectedOfficialPatch) -> Result<ElectedOfficial>;

    /// Whether a row was removed
    async fn delete(&self, id: &ElectedOfficialId) -> Result<bool>;
}
