//! Internal Diesel row structs and their conversions to domain types.
//!
//! Rows never leave the persistence layer. Conversion failures mean the
//! stored data is corrupt and surface as serialization errors.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::{ItemId, KnownMaterial, MaterialEntry, SalvageRecord};

use super::schema::{salvage, salvage_materials};

/// JSONB element of `salvage.materials`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MaterialEntryDocument {
    pub item_id: u32,
    pub count: u32,
}

impl From<&MaterialEntry> for MaterialEntryDocument {
    fn from(entry: &MaterialEntry) -> Self {
        Self {
            item_id: entry.item_id.get(),
            count: entry.count,
        }
    }
}

pub(crate) fn encode_materials(materials: &[MaterialEntry]) -> Result<serde_json::Value, String> {
    let documents: Vec<MaterialEntryDocument> =
        materials.iter().map(MaterialEntryDocument::from).collect();
    serde_json::to_value(documents).map_err(|err| err.to_string())
}

fn decode_materials(value: serde_json::Value) -> Result<Vec<MaterialEntry>, String> {
    let documents: Vec<MaterialEntryDocument> =
        serde_json::from_value(value).map_err(|err| err.to_string())?;
    documents
        .into_iter()
        .map(|doc| {
            ItemId::new(doc.item_id)
                .map(|item_id| MaterialEntry::new(item_id, doc.count))
                .map_err(|err| err.to_string())
        })
        .collect()
}

fn column_u32(value: i64, column: &str) -> Result<u32, String> {
    u32::try_from(value).map_err(|_| format!("{column} {value} is out of range"))
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = salvage)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SalvageRow {
    pub item_id: i64,
    pub salvage_count: i64,
    pub materials: serde_json::Value,
    pub revision: i64,
}

impl TryFrom<SalvageRow> for SalvageRecord {
    type Error = String;

    fn try_from(row: SalvageRow) -> Result<Self, Self::Error> {
        let item_id = ItemId::try_from(row.item_id).map_err(|err| err.to_string())?;
        let salvage_count = column_u32(row.salvage_count, "salvage_count")?;
        let revision = column_u32(row.revision, "revision")?;
        let materials = decode_materials(row.materials)?;
        Self::restore(item_id, salvage_count, materials, revision).map_err(|err| err.to_string())
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = salvage)]
pub(crate) struct NewSalvageRow<'a> {
    pub item_id: i64,
    pub salvage_count: i64,
    pub materials: &'a serde_json::Value,
    pub revision: i64,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = salvage)]
pub(crate) struct SalvageUpdate<'a> {
    pub salvage_count: i64,
    pub materials: &'a serde_json::Value,
    pub revision: i64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = salvage_materials)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct KnownMaterialRow {
    pub item_id: i64,
    pub name: String,
    pub image_url: Option<String>,
}

impl TryFrom<KnownMaterialRow> for KnownMaterial {
    type Error = String;

    fn try_from(row: KnownMaterialRow) -> Result<Self, Self::Error> {
        let item_id = ItemId::try_from(row.item_id).map_err(|err| err.to_string())?;
        Self::new(item_id, row.name, row.image_url).map_err(|err| err.to_string())
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = salvage_materials)]
pub(crate) struct NewKnownMaterialRow<'a> {
    pub item_id: i64,
    pub name: &'a str,
    pub image_url: Option<&'a str>,
}

impl<'a> From<&'a KnownMaterial> for NewKnownMaterialRow<'a> {
    fn from(material: &'a KnownMaterial) -> Self {
        Self {
            item_id: i64::from(material.id()),
            name: material.name(),
            image_url: material.image_url(),
        }
    }
}
