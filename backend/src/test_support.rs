//! Test utilities shared by unit tests (in `src/`) and integration tests (in
//! `tests/`). Compiled only for tests or with the `test-support` feature.

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{ItemDataSource, ItemDataSourceError};
use crate::domain::{
    Coins, ItemCatalogueService, ItemCategory, ItemData, ItemId, ItemListing, ItemPricing,
    ItemType, MaterialCatalogueService, SalvageLedgerService, SalvageViewBuilder,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::{InMemoryMaterialCatalogueRepository, InMemorySalvageRepository};

/// Item source double with canned items, per-id failures, and call counting.
#[derive(Debug, Default)]
pub struct StubItemDataSource {
    items: HashMap<ItemId, ItemData>,
    failing: HashSet<ItemId>,
    types: Vec<ItemType>,
    category_items: Vec<ItemData>,
    fetches: AtomicUsize,
    fetched_ids: Mutex<Vec<ItemId>>,
}

impl StubItemDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item returned by `fetch_item`.
    #[must_use]
    pub fn with_item(mut self, item: ItemData) -> Self {
        self.items.insert(item.id, item);
        self
    }

    /// Register a named item with an optional sell listing in copper.
    #[must_use]
    pub fn with_priced_item(self, id: u32, name: &str, lowest_listing: Option<u64>) -> Self {
        let item = ItemData::new(item_id(id), name).with_pricing(ItemPricing {
            lowest_listing: lowest_listing.map(Coins::from_copper),
            ..ItemPricing::default()
        });
        self.with_item(item)
    }

    /// Make `fetch_item` fail for `id`.
    #[must_use]
    pub fn failing_on(mut self, id: u32) -> Self {
        self.failing.insert(item_id(id));
        self
    }

    #[must_use]
    pub fn with_types(mut self, types: Vec<ItemType>) -> Self {
        self.types = types;
        self
    }

    /// Items listed for every category.
    #[must_use]
    pub fn with_category_items(mut self, items: Vec<ItemData>) -> Self {
        self.category_items = items;
        self
    }

    /// Number of `fetch_item` calls so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Ids passed to `fetch_item`, in call order.
    pub fn fetched_ids(&self) -> Vec<ItemId> {
        self.fetched_ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ItemDataSource for StubItemDataSource {
    async fn fetch_item(&self, id: ItemId) -> Result<ItemData, ItemDataSourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.fetched_ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(id);
        if self.failing.contains(&id) {
            return Err(ItemDataSourceError::status(503_u16, "stubbed failure"));
        }
        self.items
            .get(&id)
            .cloned()
            .ok_or_else(|| ItemDataSourceError::not_found(format!("item/{id}")))
    }

    async fn fetch_item_types(&self) -> Result<Vec<ItemType>, ItemDataSourceError> {
        Ok(self.types.clone())
    }

    async fn fetch_category_items(
        &self,
        _category: ItemCategory,
    ) -> Result<ItemListing, ItemDataSourceError> {
        Ok(ItemListing {
            reported_count: self.category_items.len(),
            items: self.category_items.clone(),
        })
    }
}

/// Parse a known-good id in test code.
///
/// # Panics
///
/// Panics when `raw` is zero.
pub fn item_id(raw: u32) -> ItemId {
    ItemId::new(raw).expect("test item ids are non-zero")
}

/// HTTP state backed by in-memory repositories and the given item source.
pub fn memory_http_state(source: Arc<dyn ItemDataSource>, max_in_flight: NonZeroUsize) -> HttpState {
    let view_builder = SalvageViewBuilder::new(source.clone(), max_in_flight);
    let ledger = Arc::new(SalvageLedgerService::new(
        Arc::new(InMemorySalvageRepository::new()),
        view_builder,
    ));
    let catalogue = Arc::new(MaterialCatalogueService::new(Arc::new(
        InMemoryMaterialCatalogueRepository::new(),
    )));
    HttpState::new(HttpStatePorts {
        salvage: ledger.clone(),
        salvage_query: ledger,
        materials: catalogue.clone(),
        materials_query: catalogue,
        items: Arc::new(ItemCatalogueService::new(source)),
    })
}
