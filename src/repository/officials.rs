//! Elected official persistence

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{
    AssemblyId, ContactInfo, ElectedOfficial, ElectedOfficialId, ElectedOfficialPatch,
    NewElectedOfficial, PoliticalPartyId,
};
use crate::query::Database;
use crate::storage::{Record, Table};
use crate::{Error, Result};

use super::rows::RowReader;
use super::ElectedOfficialsRepository;

const OFFICIAL_RETURNING: [&str; 14] = [
    "id",
    "first_name",
    "last_name",
    "party",
    "party_id",
    "position",
    "region",
    "constituency",
    "mandate_start",
    "mandate_end",
    "assembly_id",
    "bio",
    "image_url",
    "contact_info",
];

/// [`ElectedOfficialsRepository`] backed by `elected_official` rows.
///
/// Contact details are kept in one JSON text column.
#[derive(Debug, Clone)]
pub struct SqlElectedOfficialsRepository {
    db: Database,
}

impl SqlElectedOfficialsRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    async fn find_where(&self, column: &str, value: &str) -> Result<Vec<ElectedOfficial>> {
        self.db
            .select_from(Table::ElectedOfficial)
            .where_(column, "=", value)
            .select(OFFICIAL_RETURNING)
            .execute()
            .await?
            .iter()
            .map(official_from_row)
            .collect()
    }
}

fn official_from_row(row: &Record) -> Result<ElectedOfficial> {
    let r = RowReader::new(Table::ElectedOfficial, row);
    Ok(ElectedOfficial {
        id: ElectedOfficialId::new(r.text("id")?),
        first_name: r.text("first_name")?,
        last_name: r.text("last_name")?,
        party: r.opt_text("party")?.unwrap_or_default(),
        party_id: r.opt_text("party_id")?,
        position: r.opt_text("position")?.unwrap_or_default(),
        region: r.opt_text("region")?.unwrap_or_default(),
        constituency: r.opt_text("constituency")?,
        mandate_start: r.opt_date("mandate_start")?,
        mandate_end: r.opt_date("mandate_end")?,
        assembly_id: r.opt_text("assembly_id")?,
        bio: r.opt_text("bio")?,
        image_url: r.opt_text("image_url")?,
        contact_info: r.opt_json("contact_info")?,
    })
}

pub(crate) fn contact_info_column(contact: Option<&ContactInfo>) -> Result<Option<String>> {
    contact
        .map(serde_json::to_string)
        .transpose()
        .map_err(Error::from)
}

fn patch_to_row(patch: ElectedOfficialPatch) -> Result<Record> {
    let mut row = Record::new();
    let text_fields = [
        ("first_name", patch.first_name),
        ("last_name", patch.last_name),
        ("party", patch.party),
        ("party_id", patch.party_id),
        ("position", patch.position),
        ("region", patch.region),
        ("constituency", patch.constituency),
        ("assembly_id", patch.assembly_id),
        ("bio", patch.bio),
        ("image_url", patch.image_url),
    ];
    for (column, value) in text_fields {
        if let Some(value) = value {
            row.insert(column, value);
        }
    }
    if let Some(start) = patch.mandate_start {
        row.insert("mandate_start", start);
    }
    if let Some(end) = patch.mandate_end {
        row.insert("mandate_end", end);
    }
    if let Some(contact) = contact_info_column(patch.contact_info.as_ref())? {
        row.insert("contact_info", contact);
    }
    Ok(row)
}

#[async_trait]
impl ElectedOfficialsRepository for SqlElectedOfficialsRepository {
    async fn find_all(&self) -> Result<Vec<ElectedOfficial>> {
        self.db
            .select_from(Table::ElectedOfficial)
            .select_all()
            .execute()
            .await?
            .iter()
            .map(official_from_row)
            .collect()
    }

    async fn find_by_id(&self, id: &ElectedOfficialId) -> Result<Option<ElectedOfficial>> {
        self.db
            .select_from(Table::ElectedOfficial)
            .where_("id", "=", id)
            .select(OFFICIAL_RETURNING)
            .execute_take_first()
            .await?
            .as_ref()
            .map(official_from_row)
            .transpose()
    }

    async fn find_by_assembly(&self, assembly_id: &AssemblyId) -> Result<Vec<ElectedOfficial>> {
        self.find_where("assembly_id", assembly_id).await
    }

    async fn find_by_party(&self, party_id: &PoliticalPartyId) -> Result<Vec<ElectedOfficial>> {
        self.find_where("party_id", party_id).await
    }

    async fn create(&self, official: NewElectedOfficial) -> Result<ElectedOfficial> {
        let now = Utc::now();
        let contact = contact_info_column(official.contact_info.as_ref())?;
        let row = Record::new()
            .with("id", ElectedOfficialId::generate())
            .with("first_name", official.first_name)
            .with("last_name", official.last_name)
            .with("party", official.party)
            .with("party_id", official.party_id)
            .with("position", official.position)
            .with("region", official.region)
            .with("constituency", official.constituency)
            .with("mandate_start", official.mandate_start)
            .with("mandate_end", official.mandate_end)
            .with("assembly_id", official.assembly_id)
            .with("bio", official.bio)
            .with("image_url", official.image_url)
            .with("contact_info", contact)
            .with("created_at", now)
            .with("updated_at", now);

        let inserted = self
            .db
            .insert_into(Table::ElectedOfficial)
            .values(row)
            .returning(OFFICIAL_RETURNING)
            .execute_take_first_or_throw()
            .await?;
        official_from_row(&inserted)
    }

    async fn update(&self, id: &ElectedOfficialId, patch: ElectedOfficialPatch) -> Result<ElectedOfficial> {
        let row = patch_to_row(patch)?.with("updated_at", Utc::now());

        let updated = self
            .db
            .update_table(Table::ElectedOfficial)
            .set(row)
            .where_("id", "=", id)
            .returning(OFFICIAL_RETURNING)
            .execute_take_first_or_throw()
            .await?;
        official_from_row(&updated)
    }

    async fn delete(&self, id: &ElectedOfficialId) -> Result<bool> {
        let results = self
            .db
            .delete_from(Table::ElectedOfficial)
            .where_("id", "=", id)
            .execute()
            .await?;
        Ok(results.first().is_some_and(|r| r.affected > 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SocialMedia;
    use crate::fixtures::official_to_row;
    use crate::provider::InMemoryDatabaseProvider;

    fn official(id: &str, first: &str, last: &str, party_id: &str, assembly: &str) -> ElectedOfficial {
        NewElectedOfficial {
            first_name: first.to_string(),
            last_name: last.to_string(),
            party: format!("Party {party_id}"),
            party_id: Some(party_id.to_string()),
            position: "Senator".to_string(),
            region: "North".to_string(),
            assembly_id: Some(assembly.to_string()),
            bio: Some(format!("{first} {last} is a dedicated public servant.")),
            contact_info: Some(ContactInfo {
                email: format!("{}@assembly.gov", first.to_lowercase()),
                social_media: Some(SocialMedia {
                    twitter: Some(format!("@{}", first.to_lowercase())),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }
        .with_id(ElectedOfficialId::new(id))
    }

    fn fixtures() -> Vec<ElectedOfficial> {
        vec![
            official("official-1", "Jane", "Smith", "p1", "A"),
            official("official-2", "John", "Doe", "p2", "A"),
            official("official-3", "Maria", "Rodriguez", "p1", "B"),
        ]
    }

    fn seeded() -> (InMemoryDatabaseProvider, SqlElectedOfficialsRepository) {
        let provider = InMemoryDatabaseProvider::new();
        let rows = fixtures()
            .iter()
            .map(official_to_row)
            .collect::<Result<Vec<_>>>()
            .unwrap();
        provider.seed_table(Table::ElectedOfficial, rows);
        let repo = SqlElectedOfficialsRepository::new(provider.get_db());
        (provider, repo)
    }

    fn ids(officials: &[ElectedOfficial]) -> Vec<&str> {
        officials.iter().map(|o| o.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_find_all_and_by_id() {
        let (_provider, repo) = seeded();
        assert_eq!(repo.find_all().await.unwrap(), fixtures());

        let jane = repo.find_by_id(&ElectedOfficialId::new("official-1")).await.unwrap().unwrap();
        assert_eq!(jane.contact_info.unwrap().email, "jane@assembly.gov");
        assert!(repo.find_by_id(&ElectedOfficialId::new("nobody")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_assembly_and_party() {
        let (_provider, repo) = seeded();
        assert_eq!(ids(&repo.find_by_assembly(&"A".to_string()).await.unwrap()), vec!["official-1", "official-2"]);
        assert_eq!(ids(&repo.find_by_party(&"p1".to_string()).await.unwrap()), vec!["official-1", "official-3"]);
        assert!(repo.find_by_party(&"p9".to_string()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_update_delete() {
        let (provider, repo) = seeded();
        let created = repo
            .create(NewElectedOfficial {
                first_name: "Ada".to_string(),
                last_name: "Byron".to_string(),
                party: "Independent".to_string(),
                position: "Representative".to_string(),
                region: "West".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(provider.count(Table::ElectedOfficial), 4);
        assert_eq!(created.contact_info, None);

        let updated = repo
            .update(
                &created.id,
                ElectedOfficialPatch {
                    region: Some("East".to_string()),
                    contact_info: Some(ContactInfo {
                        email: "ada@assembly.gov".to_string(),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.region, "East");
        assert_eq!(updated.first_name, "Ada");
        assert_eq!(updated.contact_info.unwrap().email, "ada@assembly.gov");

        assert!(repo.delete(&created.id).await.unwrap());
        assert!(!repo.delete(&created.id).await.unwrap());
        assert_eq!(repo.find_all().await.unwrap(), fixtures());
    }

    #[tokio::test]
    async fn test_malformed_contact_info() {
        let (provider, repo) = seeded();
        provider.seed_table(
            Table::ElectedOfficial,
            vec![Record::new()
                .with("id", "o9")
                .with("first_name", "Bad")
                .with("last_name", "Row")
                .with("contact_info", "{not json")],
        );
        let err = repo.find_all().await.unwrap_err();
        assert!(matches!(err, Error::Mapping { ref field, .. } if field == "contact_info"));
    }
}
