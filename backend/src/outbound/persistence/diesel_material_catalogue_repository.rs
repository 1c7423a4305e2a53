//! PostgreSQL-backed `MaterialCatalogueRepository` using Diesel.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::{ItemId, KnownMaterial};
use crate::domain::ports::{MaterialCatalogueRepository, MaterialCatalogueRepositoryError};

use super::error_mapping::{DieselFailure, classify};
use super::models::{KnownMaterialRow, NewKnownMaterialRow};
use super::pool::{DbPool, PoolError};
use super::schema::salvage_materials;

/// Diesel-backed implementation of the `MaterialCatalogueRepository` port.
#[derive(Clone)]
pub struct DieselMaterialCatalogueRepository {
    pool: DbPool,
}

impl DieselMaterialCatalogueRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MaterialCatalogueRepositoryError {
    MaterialCatalogueRepositoryError::connection(error.into_message())
}

fn map_diesel_error(
    error: &diesel::result::Error,
    operation: &'static str,
) -> MaterialCatalogueRepositoryError {
    match classify(error, operation) {
        DieselFailure::Connection(message) => MaterialCatalogueRepositoryError::connection(message),
        DieselFailure::UniqueViolation => {
            MaterialCatalogueRepositoryError::query("unexpected unique violation")
        }
        DieselFailure::Query(message) => MaterialCatalogueRepositoryError::query(message),
    }
}

/// One entry per id, last occurrence winning. A single `ON CONFLICT DO
/// UPDATE` statement may not touch the same row twice.
fn last_per_id(materials: &[KnownMaterial]) -> Vec<&KnownMaterial> {
    let mut by_id: BTreeMap<ItemId, &KnownMaterial> = BTreeMap::new();
    for material in materials {
        by_id.insert(material.id(), material);
    }
    by_id.into_values().collect()
}

#[async_trait]
impl MaterialCatalogueRepository for DieselMaterialCatalogueRepository {
    async fn list_all(&self) -> Result<Vec<KnownMaterial>, MaterialCatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<KnownMaterialRow> = salvage_materials::table
            .order((salvage_materials::name.asc(), salvage_materials::item_id.asc()))
            .select(KnownMaterialRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "list known materials"))?;

        // Rows that violate domain rules are skipped rather than hiding the
        // whole list.
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let item_id = row.item_id;
                KnownMaterial::try_from(row)
                    .inspect_err(|error| warn!(item_id, %error, "skipping invalid known material"))
                    .ok()
            })
            .collect())
    }

    async fn upsert(
        &self,
        materials: &[KnownMaterial],
    ) -> Result<(), MaterialCatalogueRepositoryError> {
        if materials.is_empty() {
            return Ok(());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<NewKnownMaterialRow<'_>> = last_per_id(materials)
            .into_iter()
            .map(NewKnownMaterialRow::from)
            .collect();

        diesel::insert_into(salvage_materials::table)
            .values(&rows)
            .on_conflict(salvage_materials::item_id)
            .do_update()
            .set((
                salvage_materials::name.eq(excluded(salvage_materials::name)),
                salvage_materials::image_url.eq(excluded(salvage_materials::image_url)),
                salvage_materials::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(&err, "upsert known materials"))
    }
}
