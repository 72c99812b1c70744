use std::sync::Arc;

use crate::domain::{
    AssemblyId, ElectedOfficial, ElectedOfficialId, ElectedOfficialPatch, NewElectedOfficial,
    PoliticalPartyId,
};
use crate::repository::ElectedOfficialsRepository;
use crate::{Error, Result};

#[derive(Clone)]
pub struct ElectedOfficialsService {
    repository: Arc<dyn ElectedOfficialsRepository>,
}

impl ElectedOfficialsService {
    pub fn new(repository: Arc<dyn ElectedOfficialsRepository>) -> Self {
        Self { repository }
    }

    pub async fn find_all(&self) -> Result<Vec<ElectedOfficial>> {
        self.repository.find_all().await
    }

    pub async fn find_by_id(&self, id: &ElectedOfficialId) -> Result<ElectedOfficial> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Elected official with ID {id} not found")))
    }

    pub async fn find_by_assembly(&self, assembly_id: &AssemblyId) -> Result<Vec<ElectedOfficial>> {
        self.repository.find_by_assembly(assembly_id).await
    }

    pub async fn find_by_party(&self, party_id: &PoliticalPartyId) -> Result<Vec<ElectedOfficial>> {
        self.repository.find_by_party(party_id).await
    }

    pub async fn create(&self, official: NewElectedOfficial) -> Result<ElectedOfficial> {
        self.repository.create(official).await
    }

    pub async fn update(&self, id: &ElectedOfficialId, patch: ElectedOfficialPatch) -> Result<ElectedOfficial> {
        self.find_by_id(id).await?;
        self.repository.update(id, patch).await
    }

    /// Whether the official was removed; missing officials are an error
    pub async fn delete(&self, id: &ElectedOfficialId) -> Result<bool> {
        self.find_by_id(id).await?;
        self.repository.delete(id).await
    }
}
