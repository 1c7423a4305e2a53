//! Form payloads posted by the salvage pages and their validation.
//!
//! Every field arrives as text. Values are trimmed, parsed into domain types,
//! and failures become `InvalidRequest` errors whose details name the field.

use std::str::FromStr;

use serde::Deserialize;
use serde_json::json;

use crate::domain::{
    Error, ItemId, KnownMaterial, MaterialEntry, SalvageSubmission, SalvageValidationError,
};

/// Validation error codes reported in error details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldErrorCode {
    MissingField,
    InvalidItemId,
    InvalidCount,
    InvalidName,
}

impl FieldErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidItemId => "invalid_item_id",
            Self::InvalidCount => "invalid_count",
            Self::InvalidName => "invalid_name",
        }
    }
}

fn field_error(field: &str, code: FieldErrorCode, message: String, value: Option<&str>) -> Error {
    let mut details = json!({ "field": field, "code": code.as_str() });
    if let Some(value) = value {
        details["value"] = json!(value);
    }
    Error::invalid_request(message).with_details(details)
}

fn required<'a>(field: &str, raw: &'a str) -> Result<&'a str, Error> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(field_error(
            field,
            FieldErrorCode::MissingField,
            format!("missing required field: {field}"),
            None,
        ));
    }
    Ok(value)
}

fn parse_item_id(field: &str, value: &str) -> Result<ItemId, Error> {
    ItemId::from_str(value).map_err(|err| {
        field_error(
            field,
            FieldErrorCode::InvalidItemId,
            format!("{field}: {err}"),
            Some(value),
        )
    })
}

fn parse_count(field: &str, value: &str) -> Result<u32, Error> {
    let digits_only = value.bytes().all(|byte| byte.is_ascii_digit());
    match value.parse::<u32>() {
        Ok(count) if digits_only && count > 0 => Ok(count),
        _ => Err(field_error(
            field,
            FieldErrorCode::InvalidCount,
            format!("{field} must be a whole number of at least 1"),
            Some(value),
        )),
    }
}

/// Fields posted by the add-salvage form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SalvageForm {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "SalvageCount")]
    pub salvage_count: String,
    pub material1: String,
    #[serde(rename = "material1Count")]
    pub material1_count: String,
    pub material2: String,
    #[serde(rename = "material2Count")]
    pub material2_count: String,
}

impl SalvageForm {
    /// Validate the form into a domain submission.
    ///
    /// A material slot is used only when its id is non-blank; a used slot
    /// needs a count of at least 1.
    pub fn into_submission(self) -> Result<SalvageSubmission, Error> {
        let item_id = parse_item_id("ID", required("ID", &self.id)?)?;
        let salvage_count = parse_count(
            "SalvageCount",
            required("SalvageCount", &self.salvage_count)?,
        )?;

        let slots = [
            ("material1", &self.material1, "material1Count", &self.material1_count),
            ("material2", &self.material2, "material2Count", &self.material2_count),
        ];
        let mut materials = Vec::with_capacity(slots.len());
        for (id_field, raw_id, count_field, raw_count) in slots {
            let raw_id = raw_id.trim();
            if raw_id.is_empty() {
                continue;
            }
            let material_id = parse_item_id(id_field, raw_id)?;
            let count = parse_count(count_field, required(count_field, raw_count)?)?;
            materials.push(MaterialEntry::new(material_id, count));
        }

        SalvageSubmission::new(item_id, salvage_count, materials).map_err(map_submission_error)
    }
}

fn map_submission_error(error: SalvageValidationError) -> Error {
    Error::invalid_request(error.to_string())
}

/// Parse the add-salvage-type form, whose fields are `{item id} = {name}`.
///
/// An id posted more than once keeps its first position and its last name.
pub fn known_materials_from_pairs(pairs: Vec<(String, String)>) -> Result<Vec<KnownMaterial>, Error> {
    let mut materials: Vec<KnownMaterial> = Vec::with_capacity(pairs.len());
    for (raw_id, name) in pairs {
        let raw_id = raw_id.trim();
        let item_id = parse_item_id("id", raw_id)?;
        let material = KnownMaterial::new(item_id, &name, None).map_err(|err| {
            field_error(
                raw_id,
                FieldErrorCode::InvalidName,
                err.to_string(),
                Some(name.as_str()),
            )
        })?;
        match materials.iter_mut().find(|known| known.id() == item_id) {
            Some(known) => *known = material,
            None => materials.push(material),
        }
    }
    Ok(materials)
}
