//! Builders wiring repositories and the item source into HTTP state.

use std::num::NonZeroUsize;
use std::sync::Arc;

use salvage_ledger::domain::ports::{
    ItemDataSource, MaterialCatalogueRepository, SalvageRepository,
};
use salvage_ledger::domain::{
    ItemCatalogueService, MaterialCatalogueService, SalvageLedgerService, SalvageViewBuilder,
};
use salvage_ledger::inbound::http::state::{HttpState, HttpStatePorts};
use salvage_ledger::outbound::memory::{
    InMemoryMaterialCatalogueRepository, InMemorySalvageRepository,
};
use salvage_ledger::outbound::persistence::{
    DieselMaterialCatalogueRepository, DieselSalvageRepository,
};
use tracing::warn;

use super::ServerConfig;

/// Wire the domain services over one pair of repositories.
fn build_ports<S, M>(
    salvage_repo: Arc<S>,
    materials_repo: Arc<M>,
    item_source: Arc<dyn ItemDataSource>,
    max_in_flight: NonZeroUsize,
) -> HttpStatePorts
where
    S: SalvageRepository + 'static,
    M: MaterialCatalogueRepository + 'static,
{
    let view_builder = SalvageViewBuilder::new(item_source.clone(), max_in_flight);
    let ledger = Arc::new(SalvageLedgerService::new(salvage_repo, view_builder));
    let catalogue = Arc::new(MaterialCatalogueService::new(materials_repo));
    HttpStatePorts {
        salvage: ledger.clone(),
        salvage_query: ledger,
        materials: catalogue.clone(),
        materials_query: catalogue,
        items: Arc::new(ItemCatalogueService::new(item_source)),
    }
}

/// Build HTTP state using Diesel repositories when a pool is configured,
/// otherwise in-memory repositories.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let ports = match &config.db_pool {
        Some(pool) => build_ports(
            Arc::new(DieselSalvageRepository::new(pool.clone())),
            Arc::new(DieselMaterialCatalogueRepository::new(pool.clone())),
            config.item_source.clone(),
            config.max_in_flight,
        ),
        None => {
            warn!("no database configured; salvage records are kept in memory only");
            build_ports(
                Arc::new(InMemorySalvageRepository::new()),
                Arc::new(InMemoryMaterialCatalogueRepository::new()),
                config.item_source.clone(),
                config.max_in_flight,
            )
        }
    };
    HttpState::new(ports)
}
