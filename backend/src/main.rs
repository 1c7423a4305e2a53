//! Backend entry-point: loads settings, wires adapters, and serves the pages.

mod server;

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use salvage_ledger::domain::ports::{FixtureItemDataSource, ItemDataSource};
use salvage_ledger::inbound::http::health::HealthState;
use salvage_ledger::outbound::item_api::ItemApiHttpSource;
use salvage_ledger::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{AppSettings, ServerConfig, create_server};

fn item_source(settings: &AppSettings) -> std::io::Result<Arc<dyn ItemDataSource>> {
    if settings.offline {
        warn!("offline mode: serving placeholder item data");
        return Ok(Arc::new(FixtureItemDataSource));
    }
    let base_url = settings.item_api_url().map_err(std::io::Error::other)?;
    info!(%base_url, "using item API");
    let source = ItemApiHttpSource::new(base_url, settings.item_api_timeout())
        .map_err(|e| std::io::Error::other(format!("item API client setup failed: {e}")))?;
    Ok(Arc::new(source))
}

async fn database_pool(settings: &AppSettings, url: &str) -> std::io::Result<DbPool> {
    if settings.skip_migrations {
        info!("skipping database migrations");
    } else {
        run_pending_migrations(url)
            .await
            .map_err(|e| std::io::Error::other(format!("database migrations failed: {e}")))?;
    }
    DbPool::new(PoolConfig::new(url).with_max_size(settings.db_pool_size()))
        .await
        .map_err(|e| std::io::Error::other(format!("database pool setup failed: {e}")))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(bind_addr, item_source(&settings)?, settings.max_in_flight());
    if let Some(url) = settings.database_url() {
        config = config.with_db_pool(database_pool(&settings, url).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "salvage ledger listening");
    server.await
}
