//! In-process store adapters.
//!
//! Used when no database URL is configured and by the integration tests.
//! Contents vanish with the process. Both stores enforce the same contracts
//! as the Diesel adapters: duplicate inserts are rejected, updates are
//! conditional on the revision, and listing order matches PostgreSQL's.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{
    MaterialCatalogueRepository, MaterialCatalogueRepositoryError, SalvageRepository,
    SalvageRepositoryError,
};
use crate::domain::{ItemId, KnownMaterial, SalvageRecord};

/// Salvage records held in insertion order.
#[derive(Debug, Default)]
pub struct InMemorySalvageRepository {
    records: RwLock<Vec<SalvageRecord>>,
}

impl InMemorySalvageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SalvageRepository for InMemorySalvageRepository {
    async fn find_by_id(
        &self,
        item_id: ItemId,
    ) -> Result<Option<SalvageRecord>, SalvageRepositoryError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|record| record.item_id() == item_id)
            .cloned())
    }

    async fn insert(&self, record: &SalvageRecord) -> Result<(), SalvageRepositoryError> {
        let mut records = self.records.write().await;
        if records
            .iter()
            .any(|existing| existing.item_id() == record.item_id())
        {
            return Err(SalvageRepositoryError::duplicate_key(record.item_id()));
        }
        records.push(record.clone());
        Ok(())
    }

    async fn update(
        &self,
        record: &SalvageRecord,
        expected_revision: u32,
    ) -> Result<(), SalvageRepositoryError> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|existing| {
            existing.item_id() == record.item_id() && existing.revision() == expected_revision
        }) {
            Some(existing) => {
                *existing = record.clone();
                Ok(())
            }
            None => Err(SalvageRepositoryError::revision_mismatch(
                record.item_id(),
                expected_revision,
            )),
        }
    }

    async fn list_all(&self) -> Result<Vec<SalvageRecord>, SalvageRepositoryError> {
        Ok(self.records.read().await.clone())
    }
}

/// Known materials keyed by id.
#[derive(Debug, Default)]
pub struct InMemoryMaterialCatalogueRepository {
    materials: RwLock<BTreeMap<ItemId, KnownMaterial>>,
}

impl InMemoryMaterialCatalogueRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MaterialCatalogueRepository for InMemoryMaterialCatalogueRepository {
    async fn list_all(&self) -> Result<Vec<KnownMaterial>, MaterialCatalogueRepositoryError> {
        let mut materials: Vec<KnownMaterial> =
            self.materials.read().await.values().cloned().collect();
        materials.sort_by(|left, right| {
            left.name()
                .cmp(right.name())
                .then(left.id().cmp(&right.id()))
        });
        Ok(materials)
    }

    async fn upsert(
        &self,
        materials: &[KnownMaterial],
    ) -> Result<(), MaterialCatalogueRepositoryError> {
        let mut stored = self.materials.write().await;
        for material in materials {
            stored.insert(material.id(), material.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MaterialEntry, SalvageSubmission};
    use rstest::rstest;

    fn id(raw: u32) -> ItemId {
        ItemId::new(raw).expect("valid item id")
    }

    fn record(raw: u32) -> SalvageRecord {
        SalvageRecord::from_submission(
            &SalvageSubmission::new(id(raw), 1, [MaterialEntry::new(id(900), 1)])
                .expect("valid"),
        )
    }

    #[tokio::test]
    async fn insert_rejects_duplicates() {
        let repo = InMemorySalvageRepository::new();
        repo.insert(&record(1)).await.expect("first insert");

        let err = repo.insert(&record(1)).await.expect_err("duplicate");

        assert_eq!(err, SalvageRepositoryError::duplicate_key(id(1)));
    }

    #[tokio::test]
    async fn update_requires_matching_revision() {
        let repo = InMemorySalvageRepository::new();
        let original = record(1);
        repo.insert(&original).await.expect("insert");
        let again = SalvageSubmission::new(id(1), 2, []).expect("valid");
        let merged = original.absorb(&again).expect("merge");

        repo.update(&merged, 1).await.expect("first update");
        let stale = repo.update(&merged, 1).await;

        assert_eq!(
            stale,
            Err(SalvageRepositoryError::revision_mismatch(id(1), 1_u32))
        );
        let stored = repo.find_by_id(id(1)).await.expect("find").expect("present");
        assert_eq!(stored.salvage_count(), 3);
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let repo = InMemorySalvageRepository::new();
        for raw in [30, 10, 20] {
            repo.insert(&record(raw)).await.expect("insert");
        }

        let ids: Vec<u32> = repo
            .list_all()
            .await
            .expect("list")
            .iter()
            .map(|r| r.item_id().get())
            .collect();

        assert_eq!(ids, vec![30, 10, 20]);
    }

    #[rstest]
    #[tokio::test]
    async fn materials_upsert_replaces_names_and_sorts() {
        let repo = InMemoryMaterialCatalogueRepository::new();
        let wool = KnownMaterial::new(id(2), "Wool Scrap", None).expect("valid");
        let jute = KnownMaterial::new(id(1), "Jute", None).expect("valid");
        repo.upsert(&[wool, jute]).await.expect("upsert");
        let renamed = KnownMaterial::new(id(1), "Jute Scrap", None).expect("valid");
        repo.upsert(&[renamed]).await.expect("rename");

        let names: Vec<String> = repo
            .list_all()
            .await
            .expect("list")
            .iter()
            .map(|m| m.name().to_owned())
            .collect();

        assert_eq!(names, vec!["Jute Scrap", "Wool Scrap"]);
    }

    #[tokio::test]
    async fn repeated_ids_in_one_upsert_keep_the_last_entry() {
        let repo = InMemoryMaterialCatalogueRepository::new();
        let first = KnownMaterial::new(id(19_721), "Glob", None).expect("valid");
        let last = KnownMaterial::new(id(19_721), "Glob of Ectoplasm", None).expect("valid");

        repo.upsert(&[first, last]).await.expect("upsert");

        let listed = repo.list_all().await.expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name(), "Glob of Ectoplasm");
    }
}
