//! Driving port for browsing the external item catalogue.

use async_trait::async_trait;

use crate::domain::{Error, ItemCategory, ItemListing, ItemType};

/// Use-case port for the item type and category listing pages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemCatalogueQuery: Send + Sync {
    /// Item category tree.
    async fn item_types(&self) -> Result<Vec<ItemType>, Error>;

    /// Items within one category.
    async fn category_items(&self, category: ItemCategory) -> Result<ItemListing, Error>;
}
