//! Read-only access to the external item catalogue.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{ItemCatalogueQuery, ItemDataSource, ItemDataSourceError};
use crate::domain::{Error, ItemCategory, ItemListing, ItemType};

/// Service implementing [`ItemCatalogueQuery`] over an [`ItemDataSource`].
#[derive(Clone)]
pub struct ItemCatalogueService {
    source: Arc<dyn ItemDataSource>,
}

impl ItemCatalogueService {
    pub fn new(source: Arc<dyn ItemDataSource>) -> Self {
        Self { source }
    }
}

fn map_source_error(error: ItemDataSourceError) -> Error {
    Error::internal(format!("item source error: {error}"))
}

#[async_trait]
impl ItemCatalogueQuery for ItemCatalogueService {
    async fn item_types(&self) -> Result<Vec<ItemType>, Error> {
        self.source
            .fetch_item_types()
            .await
            .map_err(map_source_error)
    }

    async fn category_items(&self, category: ItemCategory) -> Result<ItemListing, Error> {
        let mut listing = self
            .source
            .fetch_category_items(category)
            .await
            .map_err(map_source_error)?;
        listing
            .items
            .sort_by(|left, right| left.name.cmp(&right.name).then(left.id.cmp(&right.id)));
        Ok(listing)
    }
}
