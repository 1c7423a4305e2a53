//! Item metadata supplied by the external pricing source.
//!
//! None of these types are persisted except [`KnownMaterial`]; item data is
//! fetched fresh whenever a page needs it.

use super::{Coins, ItemId};

/// Item quality tier as reported by the pricing source (codes 0 to 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rarity {
    Junk,
    Basic,
    Fine,
    Masterwork,
    Rare,
    Exotic,
    Ascended,
    Legendary,
    Unknown(i64),
}

impl Rarity {
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Junk,
            1 => Self::Basic,
            2 => Self::Fine,
            3 => Self::Masterwork,
            4 => Self::Rare,
            5 => Self::Exotic,
            6 => Self::Ascended,
            7 => Self::Legendary,
            other => Self::Unknown(other),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Junk => "Junk",
            Self::Basic => "Basic",
            Self::Fine => "Fine",
            Self::Masterwork => "Masterwork",
            Self::Rare => "Rare",
            Self::Exotic => "Exotic",
            Self::Ascended => "Ascended",
            Self::Legendary => "Legendary",
            Self::Unknown(_) => "Unknown",
        }
    }
}

/// Trading post snapshot for an item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPricing {
    /// Highest standing buy order.
    pub best_offer: Option<Coins>,
    /// Cheapest sell listing.
    pub lowest_listing: Option<Coins>,
    pub offer_availability: Option<u64>,
    pub sale_availability: Option<u64>,
    /// Timestamp of the last price change, as reported upstream.
    pub last_changed: Option<String>,
}

/// Metadata for one game item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemData {
    pub id: ItemId,
    pub name: String,
    pub image_url: Option<String>,
    pub rarity: Option<Rarity>,
    pub restriction_level: Option<u32>,
    pub pricing: ItemPricing,
}

impl ItemData {
    /// Minimal item with only a name.
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image_url: None,
            rarity: None,
            restriction_level: None,
            pricing: ItemPricing::default(),
        }
    }

    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = Some(rarity);
        self
    }

    #[must_use]
    pub fn with_pricing(mut self, pricing: ItemPricing) -> Self {
        self.pricing = pricing;
        self
    }
}

/// Leaf of the item category tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSubType {
    pub id: u32,
    pub name: String,
}

/// Top-level item category with its subtypes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemType {
    pub id: u32,
    pub name: String,
    pub subtypes: Vec<ItemSubType>,
}

/// Numeric item category used by the bulk listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemCategory(u32);

impl ItemCategory {
    /// Crafting materials, the category salvage materials are picked from.
    pub const CRAFTING_MATERIAL: Self = Self(5);

    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Items belonging to one category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemListing {
    /// Total reported by the source; may exceed `items.len()` when entries
    /// could not be decoded.
    pub reported_count: usize,
    pub items: Vec<ItemData>,
}

/// Validation errors for [`KnownMaterial`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KnownMaterialValidationError {
    #[error("material {item_id} name must not be empty")]
    EmptyName { item_id: ItemId },
}

/// Curated material offered as a choice on the add-salvage form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownMaterial {
    id: ItemId,
    name: String,
    image_url: Option<String>,
}

impl KnownMaterial {
    /// Build a known material; the name is trimmed and must not be empty.
    pub fn new(
        id: ItemId,
        name: impl AsRef<str>,
        image_url: Option<String>,
    ) -> Result<Self, KnownMaterialValidationError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(KnownMaterialValidationError::EmptyName { item_id: id });
        }
        Ok(Self {
            id,
            name: name.to_owned(),
            image_url: image_url.filter(|url| !url.trim().is_empty()),
        })
    }

    /// Known material mirroring an item's name and icon.
    pub fn from_item(item: &ItemData) -> Result<Self, KnownMaterialValidationError> {
        Self::new(item.id, &item.name, item.image_url.clone())
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn id(raw: u32) -> ItemId {
        ItemId::new(raw).expect("valid item id")
    }

    #[rstest]
    #[case(0, Rarity::Junk)]
    #[case(4, Rarity::Rare)]
    #[case(7, Rarity::Legendary)]
    #[case(42, Rarity::Unknown(42))]
    fn rarity_maps_codes(#[case] code: i64, #[case] expected: Rarity) {
        assert_eq!(Rarity::from_code(code), expected);
    }

    #[rstest]
    fn known_material_trims_name() {
        let material = KnownMaterial::new(id(19_721), "  Glob of Ectoplasm ", None)
            .expect("valid material");
        assert_eq!(material.name(), "Glob of Ectoplasm");
    }

    #[rstest]
    fn known_material_rejects_blank_name() {
        assert_eq!(
            KnownMaterial::new(id(3), "   ", None),
            Err(KnownMaterialValidationError::EmptyName { item_id: id(3) })
        );
    }

    #[rstest]
    fn known_material_drops_blank_image() {
        let material =
            KnownMaterial::new(id(3), "Silk Scrap", Some(" ".to_owned())).expect("valid");
        assert!(material.image_url().is_none());
    }
}
