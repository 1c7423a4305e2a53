//! Driven port for the external item pricing source.
//!
//! The domain only needs lookup by id, the category tree, and a bulk listing
//! for one category. Adapters own the wire format and map their failures
//! into [`ItemDataSourceError`].

use async_trait::async_trait;

use crate::domain::{ItemCategory, ItemData, ItemId, ItemListing, ItemType};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling the item source.
    pub enum ItemDataSourceError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "item source transport failed: {message}",
        /// The call exceeded the configured timeout.
        Timeout { message: String } =>
            "item source timeout: {message}",
        /// The source has nothing at the requested path.
        NotFound { path: String } =>
            "item source has no entry at {path}",
        /// The source answered with a non-success status.
        Status { status: u16, message: String } =>
            "item source returned status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "item source response decode failed: {message}",
        /// The adapter could not build the request.
        InvalidRequest { message: String } =>
            "item source request invalid: {message}",
    }
}

/// Port for looking up item metadata.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemDataSource: Send + Sync {
    /// Fetch one item by id.
    async fn fetch_item(&self, id: ItemId) -> Result<ItemData, ItemDataSourceError>;

    /// Fetch the item category tree.
    async fn fetch_item_types(&self) -> Result<Vec<ItemType>, ItemDataSourceError>;

    /// Fetch every item in a category.
    async fn fetch_category_items(
        &self,
        category: ItemCategory,
    ) -> Result<ItemListing, ItemDataSourceError>;
}

/// Offline source that names every item after its id and knows no
/// categories. Used when the server runs without network access.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureItemDataSource;

#[async_trait]
impl ItemDataSource for FixtureItemDataSource {
    async fn fetch_item(&self, id: ItemId) -> Result<ItemData, ItemDataSourceError> {
        Ok(ItemData::new(id, format!("Item {id}")))
    }

    async fn fetch_item_types(&self) -> Result<Vec<ItemType>, ItemDataSourceError> {
        Ok(Vec::new())
    }

    async fn fetch_category_items(
        &self,
        _category: ItemCategory,
    ) -> Result<ItemListing, ItemDataSourceError> {
        Ok(ItemListing::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_names_items_after_their_id() {
        let id = ItemId::new(24_277).expect("valid id");
        let item = FixtureItemDataSource
            .fetch_item(id)
            .await
            .expect("fixture lookup succeeds");
        assert_eq!(item.name, "Item 24277");
    }

    #[test]
    fn status_errors_render_code_and_message() {
        let err = ItemDataSourceError::status(502_u16, "bad gateway");
        assert_eq!(err.to_string(), "item source returned status 502: bad gateway");
    }
}
