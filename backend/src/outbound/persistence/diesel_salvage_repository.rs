//! PostgreSQL-backed `SalvageRepository` using Diesel.
//!
//! Material entries live in an ordered JSONB array on the salvage row, so a
//! record is always read and written as a whole. Updates are conditional on
//! the revision the caller read. Listing follows `insertion_seq`, which the
//! database assigns once on insert and updates never touch.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{SalvageRepository, SalvageRepositoryError};
use crate::domain::{ItemId, SalvageRecord};

use super::error_mapping::{DieselFailure, classify};
use super::models::{NewSalvageRow, SalvageRow, SalvageUpdate, encode_materials};
use super::pool::{DbPool, PoolError};
use super::schema::salvage;

/// Diesel-backed implementation of the `SalvageRepository` port.
#[derive(Clone)]
pub struct DieselSalvageRepository {
    pool: DbPool,
}

impl DieselSalvageRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SalvageRepositoryError {
    SalvageRepositoryError::connection(error.into_message())
}

fn map_diesel_error(
    error: &diesel::result::Error,
    operation: &'static str,
    item_id: Option<ItemId>,
) -> SalvageRepositoryError {
    match (classify(error, operation), item_id) {
        (DieselFailure::UniqueViolation, Some(item_id)) => {
            SalvageRepositoryError::duplicate_key(item_id)
        }
        (DieselFailure::UniqueViolation, None) => {
            SalvageRepositoryError::query("unexpected unique violation")
        }
        (DieselFailure::Connection(message), _) => SalvageRepositoryError::connection(message),
        (DieselFailure::Query(message), _) => SalvageRepositoryError::query(message),
    }
}

fn row_to_record(row: SalvageRow) -> Result<SalvageRecord, SalvageRepositoryError> {
    let item_id = row.item_id;
    SalvageRecord::try_from(row).map_err(|message| {
        SalvageRepositoryError::serialization(format!("salvage row {item_id}: {message}"))
    })
}

fn encode_record_materials(
    record: &SalvageRecord,
) -> Result<serde_json::Value, SalvageRepositoryError> {
    encode_materials(record.materials()).map_err(SalvageRepositoryError::serialization)
}

#[async_trait]
impl SalvageRepository for DieselSalvageRepository {
    async fn find_by_id(
        &self,
        item_id: ItemId,
    ) -> Result<Option<SalvageRecord>, SalvageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<SalvageRow> = salvage::table
            .filter(salvage::item_id.eq(i64::from(item_id)))
            .select(SalvageRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(&err, "find salvage", None))?;

        row.map(row_to_record).transpose()
    }

    async fn insert(&self, record: &SalvageRecord) -> Result<(), SalvageRepositoryError> {
        let materials = encode_record_materials(record)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewSalvageRow {
            item_id: i64::from(record.item_id()),
            salvage_count: i64::from(record.salvage_count()),
            materials: &materials,
            revision: i64::from(record.revision()),
        };

        diesel::insert_into(salvage::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(&err, "insert salvage", Some(record.item_id())))
    }

    async fn update(
        &self,
        record: &SalvageRecord,
        expected_revision: u32,
    ) -> Result<(), SalvageRepositoryError> {
        let materials = encode_record_materials(record)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = SalvageUpdate {
            salvage_count: i64::from(record.salvage_count()),
            materials: &materials,
            revision: i64::from(record.revision()),
            updated_at: Utc::now(),
        };

        let updated_rows = diesel::update(salvage::table)
            .filter(
                salvage::item_id
                    .eq(i64::from(record.item_id()))
                    .and(salvage::revision.eq(i64::from(expected_revision))),
            )
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "update salvage", None))?;

        if updated_rows == 0 {
            return Err(SalvageRepositoryError::revision_mismatch(
                record.item_id(),
                expected_revision,
            ));
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<SalvageRecord>, SalvageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<SalvageRow> = salvage::table
            .order(salvage::insertion_seq.asc())
            .select(SalvageRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "list salvage", None))?;

        rows.into_iter().map(row_to_record).collect()
    }
}
