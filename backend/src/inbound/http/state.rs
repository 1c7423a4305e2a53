//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ItemCatalogueQuery, MaterialCatalogueCommand, MaterialCatalogueQuery, SalvageCommand,
    SalvageQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub salvage: Arc<dyn SalvageCommand>,
    pub salvage_query: Arc<dyn SalvageQuery>,
    pub materials: Arc<dyn MaterialCatalogueCommand>,
    pub materials_query: Arc<dyn MaterialCatalogueQuery>,
    pub items: Arc<dyn ItemCatalogueQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub salvage: Arc<dyn SalvageCommand>,
    pub salvage_query: Arc<dyn SalvageQuery>,
    pub materials: Arc<dyn MaterialCatalogueCommand>,
    pub materials_query: Arc<dyn MaterialCatalogueQuery>,
    pub items: Arc<dyn ItemCatalogueQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::num::NonZeroUsize;
    /// use std::sync::Arc;
    ///
    /// use salvage_ledger::domain::ports::FixtureItemDataSource;
    /// use salvage_ledger::domain::{
    ///     ItemCatalogueService, MaterialCatalogueService, SalvageLedgerService,
    ///     SalvageViewBuilder,
    /// };
    /// use salvage_ledger::inbound::http::state::{HttpState, HttpStatePorts};
    /// use salvage_ledger::outbound::memory::{
    ///     InMemoryMaterialCatalogueRepository, InMemorySalvageRepository,
    /// };
    ///
    /// let source = Arc::new(FixtureItemDataSource);
    /// let builder = SalvageViewBuilder::new(source.clone(), NonZeroUsize::MIN);
    /// let ledger = Arc::new(SalvageLedgerService::new(
    ///     Arc::new(InMemorySalvageRepository::new()),
    ///     builder,
    /// ));
    /// let catalogue = Arc::new(MaterialCatalogueService::new(Arc::new(
    ///     InMemoryMaterialCatalogueRepository::new(),
    /// )));
    /// let state = HttpState::new(HttpStatePorts {
    ///     salvage: ledger.clone(),
    ///     salvage_query: ledger,
    ///     materials: catalogue.clone(),
    ///     materials_query: catalogue,
    ///     items: Arc::new(ItemCatalogueService::new(source)),
    /// });
    /// let _salvage = state.salvage.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            salvage,
            salvage_query,
            materials,
            materials_query,
            items,
        } = ports;
        Self {
            salvage,
            salvage_query,
            materials,
            materials_query,
            items,
        }
    }
}
