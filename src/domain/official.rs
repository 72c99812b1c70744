//! Elected officials

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::assembly::{AssemblyId, PoliticalPartyId};

entity_id!(
    /// Identifier of an [`ElectedOfficial`]
    ElectedOfficialId
);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMedia {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

/// Stored as a JSON text column on the official's row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_media: Option<SocialMedia>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectedOfficial {
    pub id: ElectedOfficialId,
    pub first_name: String,
    pub last_name: String,
    pub party: String,
    pub party_id: Option<PoliticalPartyId>,
    pub position: String,
    pub region: String,
    pub constituency: Option<String>,
    pub mandate_start: Option<DateTime<Utc>>,
    pub mandate_end: Option<DateTime<Utc>>,
    pub assembly_id: Option<AssemblyId>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    /// `None` when the row carries no contact details
    pub contact_info: Option<ContactInfo>,
}

impl ElectedOfficial {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewElectedOfficial {
    pub first_name: String,
    pub last_name: String,
    pub party: String,
    pub party_id: Option<PoliticalPartyId>,
    pub position: String,
    pub region: String,
    pub constituency: Option<String>,
    pub mandate_start: Option<DateTime<Utc>>,
    pub mandate_end: Option<DateTime<Utc>>,
    pub assembly_id: Option<AssemblyId>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub contact_info: Option<ContactInfo>,
}

impl NewElectedOfficial {
    pub fn with_id(self, id: ElectedOfficialId) -> ElectedOfficial {
        ElectedOfficial {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            party: self.party,
            party_id: self.party_id,
            position: self.position,
            region: self.region,
            constituency: self.constituency,
            mandate_start: self.mandate_start,
            mandate_end: self.mandate_end,
            assembly_id: self.assembly_id,
            bio: self.bio,
            image_url: self.image_url,
            contact_info: self.contact_info,
        }
    }
}

/// Partial update; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectedOfficialPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub party: Option<String>,
    pub party_id: Option<PoliticalPartyId>,
    pub position: Option<String>,
    pub region: Option<String>,
    pub constituency: Option<String>,
    pub mandate_start: Option<DateTime<Utc>>,
    pub mandate_end: Option<DateTime<Utc>>,
    pub assembly_id: Option<AssemblyId>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub contact_info: Option<ContactInfo>,
}
