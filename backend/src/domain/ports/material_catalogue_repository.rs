//! Port for the curated known-materials store.

use async_trait::async_trait;

use crate::domain::KnownMaterial;

use super::define_port_error;

define_port_error! {
    /// Errors raised by material catalogue adapters.
    pub enum MaterialCatalogueRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "material catalogue connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "material catalogue query failed: {message}",
    }
}

/// Storage contract for [`KnownMaterial`]s, keyed by item id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MaterialCatalogueRepository: Send + Sync {
    /// Every known material ordered by name, then id.
    async fn list_all(&self) -> Result<Vec<KnownMaterial>, MaterialCatalogueRepositoryError>;

    /// Insert or replace materials by id. When an id repeats within
    /// `materials`, the last occurrence wins.
    async fn upsert(
        &self,
        materials: &[KnownMaterial],
    ) -> Result<(), MaterialCatalogueRepositoryError>;
}
