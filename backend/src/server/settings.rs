//! Application settings loaded via OrthoConfig from CLI flags and
//! `SALVAGE_*` environment variables.

use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ITEM_API_URL: &str = "http://www.gw2spidy.com/api/v0.9/json/";
const DEFAULT_ITEM_API_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_IN_FLIGHT: usize = 4;
const DEFAULT_DB_POOL_SIZE: u32 = 4;

/// Errors raised when a configured value cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {message}")]
    BindAddr { value: String, message: String },
    #[error("invalid item API URL {value:?}: {message}")]
    ItemApiUrl { value: String, message: String },
}

/// Startup configuration for the salvage ledger server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SALVAGE")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one the server keeps records in memory.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_pool_size: Option<u32>,
    /// Skip applying embedded migrations at startup.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
    /// Base URL of the gw2spidy JSON API.
    pub item_api_url: Option<String>,
    /// Per-request timeout for item API calls.
    pub item_api_timeout_secs: Option<u64>,
    /// Concurrent item lookups while building the salvage view.
    pub max_in_flight: Option<usize>,
    /// Serve placeholder item data instead of calling the item API.
    #[ortho_config(default = false)]
    pub offline: bool,
}

impl AppSettings {
    /// Return the bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.trim().parse().map_err(|err: std::net::AddrParseError| {
            SettingsError::BindAddr {
                value: value.to_owned(),
                message: err.to_string(),
            }
        })
    }

    /// Return the database URL when one is configured and non-blank.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn db_pool_size(&self) -> u32 {
        self.db_pool_size
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_DB_POOL_SIZE)
    }

    /// Return the item API base URL, falling back to the public gw2spidy
    /// endpoint.
    pub fn item_api_url(&self) -> Result<Url, SettingsError> {
        let value = self.item_api_url.as_deref().unwrap_or(DEFAULT_ITEM_API_URL);
        Url::parse(value.trim()).map_err(|err| SettingsError::ItemApiUrl {
            value: value.to_owned(),
            message: err.to_string(),
        })
    }

    pub fn item_api_timeout(&self) -> Duration {
        Duration::from_secs(
            self.item_api_timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_ITEM_API_TIMEOUT_SECS),
        )
    }

    /// Return the aggregation fan-out; zero is treated as sequential.
    pub fn max_in_flight(&self) -> NonZeroUsize {
        match self.max_in_flight {
            Some(value) => NonZeroUsize::new(value).unwrap_or(NonZeroUsize::MIN),
            None => NonZeroUsize::new(DEFAULT_MAX_IN_FLIGHT).unwrap_or(NonZeroUsize::MIN),
        }
    }
}
