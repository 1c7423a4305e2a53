//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::sync::Arc;

use salvage_ledger::domain::ports::ItemDataSource;
use salvage_ledger::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) item_source: Arc<dyn ItemDataSource>,
    pub(crate) max_in_flight: NonZeroUsize,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration around the item source every page
    /// reads from.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        item_source: Arc<dyn ItemDataSource>,
        max_in_flight: NonZeroUsize,
    ) -> Self {
        Self {
            bind_addr,
            item_source,
            max_in_flight,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without one, salvage records and known materials live in memory and
    /// vanish on restart.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
