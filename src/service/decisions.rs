use std::sync::Arc;

use crate::domain::{Decision, DecisionFilters, DecisionId, DecisionPatch, IndividualVote, NewDecision};
use crate::repository::DecisionsRepository;
use crate::{Error, Result};

#[derive(Clone)]
pub struct DecisionsService {
    repository: Arc<dyn DecisionsRepository>,
}

fn not_found(id: &DecisionId) -> Error {
    Error::NotFound(format!("Decision with ID {id} not found"))
}

impl DecisionsService {
    pub fn new(repository: Arc<dyn DecisionsRepository>) -> Self {
        Self { repository }
    }

    pub async fn find_all(&self, filters: &DecisionFilters) -> Result<Vec<Decision>> {
        self.repository.find_all(filters).await
    }

    pub async fn find_by_id(&self, id: &DecisionId) -> Result<Decision> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn find_votes_by_decision_id(&self, id: &DecisionId) -> Result<Vec<IndividualVote>> {
        self.find_by_id(id).await?;
        self.repository.find_votes_by_decision_id(id).await
    }

    pub async fn create(&self, decision: NewDecision) -> Result<Decision> {
        let created = self.repository.create(decision).await?;
        tracing::info!(id = %created.id, "created decision");
        Ok(created)
    }

    pub async fn update(&self, id: &DecisionId, patch: DecisionPatch) -> Result<Decision> {
        self.find_by_id(id).await?;
        self.repository.update(id, patch).await
    }

    pub async fn delete(&self, id: &DecisionId) -> Result<()> {
        self.find_by_id(id).await?;
        if !self.repository.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(id = %id, "deleted decision");
        Ok(())
    }
}
