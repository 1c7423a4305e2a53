//! Known-materials domain service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    MaterialCatalogueCommand, MaterialCatalogueQuery, MaterialCatalogueRepository,
    MaterialCatalogueRepositoryError,
};
use crate::domain::{Error, KnownMaterial};

/// Service implementing the material catalogue driving ports.
#[derive(Clone)]
pub struct MaterialCatalogueService<R> {
    repo: Arc<R>,
}

impl<R> MaterialCatalogueService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_repository_error(error: MaterialCatalogueRepositoryError) -> Error {
    Error::internal(format!("material catalogue error: {error}"))
}

#[async_trait]
impl<R> MaterialCatalogueQuery for MaterialCatalogueService<R>
where
    R: MaterialCatalogueRepository,
{
    async fn list_materials(&self) -> Result<Vec<KnownMaterial>, Error> {
        self.repo.list_all().await.map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> MaterialCatalogueCommand for MaterialCatalogueService<R>
where
    R: MaterialCatalogueRepository,
{
    async fn register_materials(&self, materials: Vec<KnownMaterial>) -> Result<usize, Error> {
        if materials.is_empty() {
            return Ok(0);
        }
        self.repo
            .upsert(&materials)
            .await
            .map_err(map_repository_error)?;
        info!(count = materials.len(), "known materials registered");
        Ok(materials.len())
    }
}
