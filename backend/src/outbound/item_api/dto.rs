//! DTOs for decoding gw2spidy JSON responses.
//!
//! The adapter decodes into these transport DTOs first, then maps into domain
//! item types in one pass. gw2spidy reports ids as numbers on some endpoints
//! and as strings on others, and uses `0` for "no price".

use serde::Deserialize;
use tracing::warn;

use crate::domain::{
    Coins, ItemData, ItemId, ItemListing, ItemPricing, ItemSubType, ItemType, Rarity,
};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum RawIdDto {
    Number(u64),
    Text(String),
}

impl RawIdDto {
    fn into_u32(self) -> Result<u32, String> {
        match self {
            Self::Number(value) => {
                u32::try_from(value).map_err(|_| format!("id {value} is out of range"))
            }
            Self::Text(value) => value
                .trim()
                .parse::<u32>()
                .map_err(|_| format!("id {value:?} is not numeric")),
        }
    }

    fn into_item_id(self) -> Result<ItemId, String> {
        let raw = self.into_u32()?;
        ItemId::new(raw).map_err(|err| err.to_string())
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ItemResponseDto {
    pub(super) result: ItemDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct ItemListResponseDto {
    #[serde(default)]
    pub(super) count: Option<usize>,
    #[serde(default)]
    pub(super) results: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ItemTypesResponseDto {
    #[serde(default)]
    pub(super) results: Vec<ItemTypeDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ItemDto {
    data_id: RawIdDto,
    name: String,
    #[serde(default)]
    img: Option<String>,
    #[serde(default)]
    rarity: Option<i64>,
    #[serde(default)]
    restriction_level: Option<i64>,
    #[serde(default)]
    max_offer_unit_price: Option<i64>,
    #[serde(default)]
    min_sale_unit_price: Option<i64>,
    #[serde(default)]
    offer_availability: Option<i64>,
    #[serde(default)]
    sale_availability: Option<i64>,
    #[serde(default)]
    price_last_changed: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ItemTypeDto {
    id: RawIdDto,
    name: String,
    #[serde(default)]
    subtypes: Vec<ItemSubTypeDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ItemSubTypeDto {
    id: RawIdDto,
    name: String,
}

fn price(raw: Option<i64>) -> Option<Coins> {
    raw.and_then(|value| u64::try_from(value).ok())
        .filter(|value| *value > 0)
        .map(Coins::from_copper)
}

fn non_negative(raw: Option<i64>) -> Option<u64> {
    raw.and_then(|value| u64::try_from(value).ok())
}

impl ItemDto {
    pub(super) fn into_domain(self) -> Result<ItemData, String> {
        let id = self.data_id.into_item_id()?;
        let pricing = ItemPricing {
            best_offer: price(self.max_offer_unit_price),
            lowest_listing: price(self.min_sale_unit_price),
            offer_availability: non_negative(self.offer_availability),
            sale_availability: non_negative(self.sale_availability),
            last_changed: self.price_last_changed.filter(|s| !s.trim().is_empty()),
        };
        let mut item = ItemData::new(id, self.name).with_pricing(pricing);
        if let Some(img) = self.img.filter(|img| !img.trim().is_empty()) {
            item = item.with_image_url(img);
        }
        if let Some(code) = self.rarity {
            item = item.with_rarity(Rarity::from_code(code));
        }
        item.restriction_level = self
            .restriction_level
            .and_then(|level| u32::try_from(level).ok());
        Ok(item)
    }
}

impl ItemListResponseDto {
    /// Decode each listed item on its own; undecodable entries are logged and
    /// skipped so one bad row does not hide the whole category.
    pub(super) fn into_domain(self) -> ItemListing {
        let reported_count = self.count.unwrap_or(self.results.len());
        let items = self
            .results
            .into_iter()
            .filter_map(|raw| {
                serde_json::from_value::<ItemDto>(raw)
                    .map_err(|err| err.to_string())
                    .and_then(ItemDto::into_domain)
                    .inspect_err(|error| warn!(%error, "skipping undecodable listed item"))
                    .ok()
            })
            .collect();
        ItemListing {
            reported_count,
            items,
        }
    }
}

impl ItemTypeDto {
    pub(super) fn into_domain(self) -> Result<ItemType, String> {
        let subtypes = self
            .subtypes
            .into_iter()
            .map(|sub| {
                Ok(ItemSubType {
                    id: sub.id.into_u32()?,
                    name: sub.name,
                })
            })
            .collect::<Result<Vec<_>, String>>()?;
        Ok(ItemType {
            id: self.id.into_u32()?,
            name: self.name,
            subtypes,
        })
    }
}

impl ItemTypesResponseDto {
    pub(super) fn into_domain(self) -> Result<Vec<ItemType>, String> {
        self.results
            .into_iter()
            .map(ItemTypeDto::into_domain)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn decodes_a_full_item_payload() {
        let body = r#"{
            "result": {
                "data_id": 19721,
                "name": "Glob of Ectoplasm",
                "rarity": 4,
                "restriction_level": 0,
                "img": "https://render.example/ecto.png",
                "type_id": 5,
                "sub_type_id": 0,
                "price_last_changed": "2013-06-01 12:00:00 UTC",
                "max_offer_unit_price": 2450,
                "min_sale_unit_price": 2611,
                "offer_availability": 120000,
                "sale_availability": 45000
            }
        }"#;

        let dto: ItemResponseDto = serde_json::from_str(body).expect("valid JSON");
        let item = dto.result.into_domain().expect("valid item");

        assert_eq!(item.id.get(), 19_721);
        assert_eq!(item.name, "Glob of Ectoplasm");
        assert_eq!(item.rarity, Some(Rarity::Rare));
        assert_eq!(item.pricing.lowest_listing, Some(Coins::from_copper(2611)));
        assert_eq!(item.pricing.best_offer, Some(Coins::from_copper(2450)));
        assert_eq!(item.image_url.as_deref(), Some("https://render.example/ecto.png"));
    }

    #[rstest]
    fn zero_prices_mean_no_listing() {
        let body = r#"{"result": {"data_id": "12", "name": "Jute Scrap",
            "max_offer_unit_price": 0, "min_sale_unit_price": 0, "img": ""}}"#;

        let dto: ItemResponseDto = serde_json::from_str(body).expect("valid JSON");
        let item = dto.result.into_domain().expect("valid item");

        assert_eq!(item.id.get(), 12);
        assert_eq!(item.pricing.lowest_listing, None);
        assert_eq!(item.pricing.best_offer, None);
        assert_eq!(item.image_url, None);
    }

    #[rstest]
    #[case(r#"{"result": {"data_id": 0, "name": "zero"}}"#)]
    #[case(r#"{"result": {"data_id": "abc", "name": "text"}}"#)]
    fn invalid_ids_are_rejected(#[case] body: &str) {
        let dto: ItemResponseDto = serde_json::from_str(body).expect("valid JSON");
        assert!(dto.result.into_domain().is_err());
    }

    #[rstest]
    fn listing_skips_undecodable_entries() {
        let body = r#"{"count": 3, "results": [
            {"data_id": 1, "name": "Copper Ore"},
            {"name": "missing id"},
            {"data_id": 2, "name": "Iron Ore"}
        ]}"#;

        let dto: ItemListResponseDto = serde_json::from_str(body).expect("valid JSON");
        let listing = dto.into_domain();

        assert_eq!(listing.reported_count, 3);
        let names: Vec<&str> = listing.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Copper Ore", "Iron Ore"]);
    }

    #[rstest]
    fn decodes_type_tree() {
        let body = r#"{"results": [
            {"id": 5, "name": "Crafting Material", "subtypes": []},
            {"id": "18", "name": "Weapon", "subtypes": [{"id": 6, "name": "Greatsword"}]}
        ]}"#;

        let dto: ItemTypesResponseDto = serde_json::from_str(body).expect("valid JSON");
        let types = dto.into_domain().expect("valid types");

        assert_eq!(types.len(), 2);
        assert_eq!(types[1].id, 18);
        assert_eq!(types[1].subtypes[0].name, "Greatsword");
    }
}
